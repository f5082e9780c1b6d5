use super::traits::{PlateFile, collect_lines};
use crate::core::error::{FormatErrorKind, PlateError};
use crate::core::models::matrix::PlateMatrix;
use crate::core::models::well::PlateLayout;
use std::collections::BTreeMap;
use std::io::BufRead;
use tracing::{debug, trace};

const FIELD_SEPARATOR: char = '\t';

/// Lines of a reads export that did not form part of the plate grid.
///
/// Plate readers surround the grid with headers, block markers and footers; these are
/// kept with their 1-based line numbers so callers can report what was ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReadsMetadata {
    pub skipped_lines: BTreeMap<usize, String>,
}

/// Reader for a plate-reader export holding one 384-well plate of raw reads.
pub struct ReadsFile;

impl PlateFile for ReadsFile {
    type Output = (PlateMatrix, ReadsMetadata);
    type Error = PlateError;

    fn read_from(reader: &mut impl BufRead) -> Result<Self::Output, Self::Error> {
        let lines = collect_lines(reader)?;
        parse_reads(&lines)
    }
}

/// Builds the 384-well read matrix from raw text lines.
///
/// Equivalent to [`parse_reads`] without the skipped-line metadata.
pub fn build_raw_matrix<I, S>(lines: I) -> Result<PlateMatrix, PlateError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    parse_reads(lines).map(|(matrix, _)| matrix)
}

/// Parses raw text lines into the 384-well read matrix.
///
/// A line is a data row when, after trimming surrounding whitespace, splitting it on
/// tabs yields exactly 24 fields. Data rows are assigned to rows `a` to `p` in the order
/// they appear; every other line is skipped.
///
/// # Errors
///
/// Returns [`PlateError::Format`] if a field of a data row is not a number, or if the
/// input does not contain exactly 16 data rows.
pub fn parse_reads<I, S>(lines: I) -> Result<(PlateMatrix, ReadsMetadata), PlateError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let layout = PlateLayout::Plate384;
    let mut rows: Vec<Vec<f64>> = Vec::with_capacity(layout.rows());
    let mut metadata = ReadsMetadata::default();

    for (line_num, line) in lines.into_iter().enumerate() {
        let line_num = line_num + 1;
        let line = line.as_ref();
        let trimmed = line.trim();

        let fields: Vec<&str> = trimmed.split(FIELD_SEPARATOR).collect();
        if fields.len() != layout.columns() {
            if !trimmed.is_empty() {
                trace!(
                    "Skipping line {} ({} fields): {:?}",
                    line_num,
                    fields.len(),
                    trimmed
                );
                metadata.skipped_lines.insert(line_num, line.to_string());
            }
            continue;
        }

        let row = fields
            .iter()
            .enumerate()
            .map(|(i, field)| {
                let field = field.trim();
                field.parse::<f64>().map_err(|_| {
                    PlateError::format(
                        line_num,
                        FormatErrorKind::InvalidNumber {
                            column: i + 1,
                            value: field.to_string(),
                        },
                    )
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        rows.push(row);
    }

    if rows.len() != layout.rows() {
        return Err(PlateError::Format {
            line: None,
            kind: FormatErrorKind::RowCount {
                expected: layout.rows(),
                found: rows.len(),
            },
        });
    }

    debug!(
        "Parsed {} data rows, skipped {} non-data line(s).",
        rows.len(),
        metadata.skipped_lines.len()
    );
    let matrix = PlateMatrix::from_rows(layout, &rows)?;
    Ok((matrix, metadata))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn data_line(row: usize) -> String {
        (1..=24)
            .map(|c| format!("{:.1}", (row * 24 + c) as f64))
            .collect::<Vec<_>>()
            .join("\t")
    }

    fn plate_lines() -> Vec<String> {
        (0..16).map(data_line).collect()
    }

    #[test]
    fn builds_full_matrix_from_sixteen_data_rows() {
        let matrix = build_raw_matrix(plate_lines()).unwrap();
        assert!(matrix.is_complete_384());
        assert_eq!(
            matrix.row(0).unwrap(),
            (1..=24).map(f64::from).collect::<Vec<_>>()
        );
        assert_eq!(
            matrix.row(1).unwrap(),
            (25..=48).map(f64::from).collect::<Vec<_>>()
        );
        assert_eq!(matrix.value(&"p24".parse().unwrap()).unwrap(), 384.0);
    }

    #[test]
    fn header_and_footer_lines_are_skipped_and_recorded() {
        let mut lines = vec![
            "##BLOCKS= 1".to_string(),
            "Plate:\tPlate1\t1.3\tPlateFormat\tEndpoint".to_string(),
            String::new(),
        ];
        lines.extend(plate_lines());
        lines.push("~End".to_string());

        let (matrix, metadata) = parse_reads(&lines).unwrap();
        assert_eq!(matrix.at(0, 0), Some(1.0));
        assert_eq!(
            metadata.skipped_lines.keys().copied().collect::<Vec<_>>(),
            [1, 2, 20]
        );
        assert_eq!(metadata.skipped_lines[&20], "~End");
    }

    #[test]
    fn lines_with_23_or_25_fields_do_not_count_as_rows() {
        let mut lines = plate_lines();
        let short: Vec<String> = (1..=23).map(|c| c.to_string()).collect();
        let long: Vec<String> = (1..=25).map(|c| c.to_string()).collect();
        lines.insert(4, short.join("\t"));
        lines.insert(9, long.join("\t"));

        let matrix = build_raw_matrix(&lines).unwrap();
        assert_eq!(matrix.row(4).unwrap()[0], 4.0 * 24.0 + 1.0);
        assert_eq!(matrix.row(15).unwrap()[23], 384.0);
    }

    #[test]
    fn surrounding_whitespace_is_trimmed_before_splitting() {
        let lines: Vec<String> = plate_lines()
            .into_iter()
            .map(|l| format!("  {}\r", l))
            .collect();
        let matrix = build_raw_matrix(&lines).unwrap();
        assert_eq!(matrix.at(2, 0), Some(49.0));
    }

    #[test]
    fn non_numeric_field_is_a_format_error() {
        let mut lines = plate_lines();
        lines[2] = lines[2].replacen("49.0", "OVRFLW", 1);
        let err = build_raw_matrix(&lines).unwrap_err();
        match err {
            PlateError::Format { line, kind } => {
                assert_eq!(line, Some(3));
                assert_eq!(
                    kind,
                    FormatErrorKind::InvalidNumber {
                        column: 1,
                        value: "OVRFLW".into()
                    }
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn too_few_or_too_many_rows_is_a_format_error() {
        let mut lines = plate_lines();
        lines.pop();
        let err = build_raw_matrix(&lines).unwrap_err();
        assert!(matches!(
            err,
            PlateError::Format {
                line: None,
                kind: FormatErrorKind::RowCount {
                    expected: 16,
                    found: 15
                }
            }
        ));

        let mut lines = plate_lines();
        lines.push(data_line(0));
        let err = build_raw_matrix(&lines).unwrap_err();
        assert!(matches!(
            err,
            PlateError::Format {
                kind: FormatErrorKind::RowCount { found: 17, .. },
                ..
            }
        ));
    }

    #[test]
    fn read_from_parses_a_buffered_reader() {
        let text = format!("Header\n{}\n", plate_lines().join("\n"));
        let (matrix, metadata) = ReadsFile::read_from(&mut Cursor::new(text)).unwrap();
        assert_eq!(matrix.at(15, 0), Some(361.0));
        assert_eq!(metadata.skipped_lines.len(), 1);
    }

    #[test]
    fn read_from_path_reads_a_file_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pico.reads.txt");
        std::fs::write(&path, plate_lines().join("\n")).unwrap();

        let (matrix, _) = ReadsFile::read_from_path(&path).unwrap();
        assert!(matrix.is_complete_384());

        let missing = ReadsFile::read_from_path(dir.path().join("missing.txt"));
        assert!(matches!(missing, Err(PlateError::Io(_))));
    }
}
