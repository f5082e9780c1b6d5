use std::io;
use thiserror::Error;

/// Errors raised while building plate matrices and standard tables.
///
/// Every variant is fatal for the current conversion: a plate that fails to parse
/// cannot be partially trusted, so nothing is exported.
#[derive(Debug, Error)]
pub enum PlateError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Format error{}: {kind}", on_line(line))]
    Format {
        line: Option<usize>,
        kind: FormatErrorKind,
    },

    #[error(
        "Plate shape mismatch: expected {}x{} wells, found {}x{}",
        expected.0, expected.1, found.0, found.1
    )]
    Shape {
        expected: (usize, usize),
        found: (usize, usize),
    },

    #[error("Well '{well}'{} lies outside the 384-well plate (rows a-p, columns 1-24)", on_line(line))]
    MissingWell { well: String, line: Option<usize> },

    #[error("Invalid quadrant '{0}'. Expected one of a1, a2, b1, b2 (or top-left, top-right, bottom-left, bottom-right)")]
    InvalidQuadrant(String),
}

#[derive(Debug, Error, PartialEq)]
pub enum FormatErrorKind {
    #[error("field {column} is not a number (value: '{value}')")]
    InvalidNumber { column: usize, value: String },

    #[error("expected {expected} data rows of 24 tab-separated reads, found {found}")]
    RowCount { expected: usize, found: usize },

    #[error("invalid well ID '{0}' (expected a row letter followed by a column number, e.g. 'b7')")]
    InvalidWellId(String),

    #[error("missing concentration for well '{well}'")]
    MissingConcentration { well: String },

    #[error("invalid concentration for well '{well}' (value: '{value}')")]
    InvalidConcentration { well: String, value: String },
}

fn on_line(line: &Option<usize>) -> String {
    line.map(|l| format!(" on line {}", l)).unwrap_or_default()
}

impl PlateError {
    pub(crate) fn format(line: usize, kind: FormatErrorKind) -> Self {
        PlateError::Format {
            line: Some(line),
            kind,
        }
    }
}
