use crate::core::io::sheet::{SheetNameError, validate_sheet_name};
use crate::core::models::quadrant::Quadrant;
use std::collections::BTreeMap;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid sheet name '{name}' for the {quadrant} plate: {source}")]
    InvalidSheetName {
        quadrant: Quadrant,
        name: String,
        source: SheetNameError,
    },
    #[error("Sheet name '{name}' is used for both the {first} and {second} plates")]
    DuplicateSheetName {
        name: String,
        first: Quadrant,
        second: Quadrant,
    },
}

/// One 96-well plate to export: the quadrant it comes from and the sheet it is written to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubPlateTarget {
    pub quadrant: Quadrant,
    pub sheet_name: String,
}

/// The sub-plates requested for a run, in export order (a1, b1, a2, b2).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubPlateSelection {
    targets: Vec<SubPlateTarget>,
}

impl SubPlateSelection {
    /// Validates and orders a quadrant to sheet-name mapping.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidSheetName`] or [`ConfigError::DuplicateSheetName`].
    pub fn new(names: BTreeMap<Quadrant, String>) -> Result<Self, ConfigError> {
        let mut targets: Vec<SubPlateTarget> = Vec::with_capacity(names.len());
        for (quadrant, name) in names {
            validate_sheet_name(&name).map_err(|source| ConfigError::InvalidSheetName {
                quadrant,
                name: name.clone(),
                source,
            })?;
            if let Some(existing) = targets
                .iter()
                .find(|t| t.sheet_name.eq_ignore_ascii_case(&name))
            {
                return Err(ConfigError::DuplicateSheetName {
                    name,
                    first: existing.quadrant,
                    second: quadrant,
                });
            }
            targets.push(SubPlateTarget {
                quadrant,
                sheet_name: name,
            });
        }
        Ok(Self { targets })
    }

    pub fn targets(&self) -> &[SubPlateTarget] {
        &self.targets
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn sheet_name(&self, quadrant: Quadrant) -> Option<&str> {
        self.targets
            .iter()
            .find(|t| t.quadrant == quadrant)
            .map(|t| t.sheet_name.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConversionConfig {
    pub reads_path: PathBuf,
    pub standards_path: PathBuf,
    pub sub_plates: SubPlateSelection,
}

#[derive(Default)]
pub struct ConversionConfigBuilder {
    reads_path: Option<PathBuf>,
    standards_path: Option<PathBuf>,
    sub_plates: BTreeMap<Quadrant, String>,
}

impl ConversionConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reads_path(mut self, path: PathBuf) -> Self {
        self.reads_path = Some(path);
        self
    }

    pub fn standards_path(mut self, path: PathBuf) -> Self {
        self.standards_path = Some(path);
        self
    }

    /// Requests the plate of `quadrant`, written to a sheet called `name`.
    ///
    /// Requesting the same quadrant again replaces its sheet name.
    pub fn sub_plate(mut self, quadrant: Quadrant, name: impl Into<String>) -> Self {
        self.sub_plates.insert(quadrant, name.into());
        self
    }

    pub fn build(self) -> Result<ConversionConfig, ConfigError> {
        Ok(ConversionConfig {
            reads_path: self
                .reads_path
                .ok_or(ConfigError::MissingParameter("reads_path"))?,
            standards_path: self
                .standards_path
                .ok_or(ConfigError::MissingParameter("standards_path"))?,
            sub_plates: SubPlateSelection::new(self.sub_plates)?,
        })
    }
}
