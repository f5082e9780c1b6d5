use super::traits::{PlateFile, collect_lines};
use crate::core::error::{FormatErrorKind, PlateError};
use crate::core::models::matrix::PlateMatrix;
use crate::core::models::standard::{StandardCurve, StandardEntry};
use crate::core::models::well::{PlateLayout, ROW_ALPHABET, WellCoordinate};
use std::collections::HashMap;
use std::io::BufRead;
use tracing::{debug, trace, warn};

/// Standard wells and their known concentrations, before reads are attached.
///
/// Declaring the same well twice overwrites its concentration but keeps the position
/// of the first declaration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StandardDefinitions {
    wells: Vec<(WellCoordinate, f64)>,
    index: HashMap<WellCoordinate, usize>,
}

impl StandardDefinitions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares `well` as a standard with the given concentration (ng/µl).
    ///
    /// Returns the previous concentration if the well was already declared.
    pub fn insert(&mut self, well: WellCoordinate, concentration: f64) -> Option<f64> {
        match self.index.get(&well) {
            Some(&i) => {
                let previous = std::mem::replace(&mut self.wells[i].1, concentration);
                Some(previous)
            }
            None => {
                self.index.insert(well, self.wells.len());
                self.wells.push((well, concentration));
                None
            }
        }
    }

    pub fn len(&self) -> usize {
        self.wells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wells.is_empty()
    }

    /// Declared wells in first-declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (WellCoordinate, f64)> + '_ {
        self.wells.iter().copied()
    }

    /// Looks up the reads of every standard well in `raw` and sorts the result by
    /// ascending concentration.
    ///
    /// # Errors
    ///
    /// Returns [`PlateError::MissingWell`] if a declared well is not on `raw`.
    pub fn resolve(&self, raw: &PlateMatrix) -> Result<StandardCurve, PlateError> {
        let entries = self
            .wells
            .iter()
            .map(|&(well, concentration)| {
                raw.value(&well).map(|reads| StandardEntry {
                    well,
                    concentration,
                    reads,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(StandardCurve::from_entries(entries))
    }
}

/// Reader for a standards file: one `<well>\t<concentration>` definition per line.
pub struct StandardsFile;

impl PlateFile for StandardsFile {
    type Output = StandardDefinitions;
    type Error = PlateError;

    fn read_from(reader: &mut impl BufRead) -> Result<Self::Output, Self::Error> {
        let lines = collect_lines(reader)?;
        parse_standards(&lines)
    }
}

/// Builds the standard table: parses the definitions in `lines` and resolves their
/// reads against `raw`.
pub fn build_standard_table<I, S>(lines: I, raw: &PlateMatrix) -> Result<StandardCurve, PlateError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    parse_standards(lines)?.resolve(raw)
}

/// Parses standard definitions from text lines.
///
/// A line is a definition when it starts with one of the lowercase row letters `a` to
/// `p`, or when its first token is shaped like a lowercase well ID (so that `q3` is
/// reported instead of silently ignored). The first whitespace-separated token is the
/// well ID and the second the concentration; anything after is ignored.
///
/// # Errors
///
/// - [`PlateError::Format`] for a malformed well ID or a missing or non-numeric
///   concentration.
/// - [`PlateError::MissingWell`] for a well outside rows `a`-`p` and columns 1-24.
pub fn parse_standards<I, S>(lines: I) -> Result<StandardDefinitions, PlateError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut definitions = StandardDefinitions::new();

    for (line_num, line) in lines.into_iter().enumerate() {
        let line_num = line_num + 1;
        let line = line.as_ref();
        if !is_definition_line(line) {
            if !line.trim().is_empty() {
                trace!("Skipping non-standard line {}: {:?}", line_num, line);
            }
            continue;
        }

        let mut tokens = line.split_whitespace();
        let well_id = tokens.next().unwrap_or_default();
        let well: WellCoordinate = well_id.parse().map_err(|_| {
            PlateError::format(line_num, FormatErrorKind::InvalidWellId(well_id.to_string()))
        })?;
        if !PlateLayout::Plate384.contains(&well) {
            return Err(PlateError::MissingWell {
                well: well_id.to_string(),
                line: Some(line_num),
            });
        }

        let concentration_str = tokens.next().ok_or_else(|| {
            PlateError::format(
                line_num,
                FormatErrorKind::MissingConcentration {
                    well: well_id.to_string(),
                },
            )
        })?;
        let concentration: f64 = concentration_str.parse().map_err(|_| {
            PlateError::format(
                line_num,
                FormatErrorKind::InvalidConcentration {
                    well: well_id.to_string(),
                    value: concentration_str.to_string(),
                },
            )
        })?;

        if let Some(previous) = definitions.insert(well, concentration) {
            warn!(
                "Standard well '{}' declared again on line {}; replacing {} with {}.",
                well, line_num, previous, concentration
            );
        }
    }

    debug!("Parsed {} standard well definition(s).", definitions.len());
    Ok(definitions)
}

fn is_definition_line(line: &str) -> bool {
    let Some(first) = line.chars().next() else {
        return false;
    };
    if ROW_ALPHABET.contains(&first) {
        return true;
    }
    first.is_ascii_lowercase()
        && line
            .split_whitespace()
            .next()
            .is_some_and(looks_like_well_id)
}

fn looks_like_well_id(token: &str) -> bool {
    let digits = &token[1..];
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}
