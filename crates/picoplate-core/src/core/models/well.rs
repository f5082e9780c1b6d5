use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;
use thiserror::Error;

/// Row letters of a 384-well plate, top to bottom.
///
/// A 96-well plate uses the first eight of them (`a` to `h`).
pub const ROW_ALPHABET: [char; 16] = [
    'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p',
];

/// The two physical plate formats handled by the converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlateLayout {
    /// 8 rows (`a`-`h`) by 12 columns.
    Plate96,
    /// 16 rows (`a`-`p`) by 24 columns.
    Plate384,
}

impl PlateLayout {
    pub const fn rows(&self) -> usize {
        match self {
            PlateLayout::Plate96 => 8,
            PlateLayout::Plate384 => 16,
        }
    }

    pub const fn columns(&self) -> usize {
        match self {
            PlateLayout::Plate96 => 12,
            PlateLayout::Plate384 => 24,
        }
    }

    pub const fn well_count(&self) -> usize {
        self.rows() * self.columns()
    }

    /// Row letters used by this layout, top to bottom.
    pub fn row_labels(&self) -> &'static [char] {
        &ROW_ALPHABET[..self.rows()]
    }

    /// 1-based column numbers used by this layout.
    pub fn column_labels(&self) -> RangeInclusive<u16> {
        1..=self.columns() as u16
    }

    pub fn contains(&self, well: &WellCoordinate) -> bool {
        (well.row as usize) < self.rows()
            && well.column >= 1
            && (well.column as usize) <= self.columns()
    }
}

impl fmt::Display for PlateLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-well", self.well_count())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseWellError {
    #[error("well ID is empty")]
    Empty,
    #[error("well ID must start with a row letter, found '{0}'")]
    InvalidRow(char),
    #[error("well ID has an invalid column number '{0}'")]
    InvalidColumn(String),
}

/// A single well addressed by row letter and column number, e.g. `b7`.
///
/// The row is stored as a 0-based offset from `a` and the column is 1-based, matching
/// how plate readers label their wells. A coordinate is not tied to a layout; use
/// [`PlateLayout::contains`] to check that it exists on a given plate. Parsing accepts
/// either letter case and normalizes to lowercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WellCoordinate {
    row: u8,
    column: u16,
}

impl WellCoordinate {
    pub const fn new(row: u8, column: u16) -> Self {
        Self { row, column }
    }

    /// Builds a coordinate from a row letter (either case) and a 1-based column.
    ///
    /// Returns `None` if `letter` is not an ASCII letter.
    pub fn from_letter(letter: char, column: u16) -> Option<Self> {
        if !letter.is_ascii_alphabetic() {
            return None;
        }
        let row = letter.to_ascii_lowercase() as u8 - b'a';
        Some(Self { row, column })
    }

    /// 0-based row offset from `a`.
    pub const fn row(&self) -> u8 {
        self.row
    }

    /// 1-based column number.
    pub const fn column(&self) -> u16 {
        self.column
    }

    pub fn row_letter(&self) -> char {
        (b'a' + self.row) as char
    }

    /// 0-based (row, column) position of this well in a dense matrix.
    pub fn matrix_index(&self) -> Option<(usize, usize)> {
        let column = (self.column as usize).checked_sub(1)?;
        Some((self.row as usize, column))
    }
}

impl fmt::Display for WellCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.row_letter(), self.column)
    }
}

impl FromStr for WellCoordinate {
    type Err = ParseWellError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut chars = s.chars();
        let letter = chars.next().ok_or(ParseWellError::Empty)?;
        if !letter.is_ascii_alphabetic() {
            return Err(ParseWellError::InvalidRow(letter));
        }

        let column_str = chars.as_str();
        if column_str.is_empty() || !column_str.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseWellError::InvalidColumn(column_str.to_string()));
        }
        // All digits: a failed parse can only be overflow, which is still off any plate.
        let column: u16 = column_str.parse().unwrap_or(u16::MAX);

        WellCoordinate::from_letter(letter, column).ok_or(ParseWellError::InvalidRow(letter))
    }
}
