use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Defines the interface for reading line-oriented plate-reader files.
///
/// Implementors parse a whole text file into a typed value. Parsing is all-or-nothing:
/// a malformed file yields an error and no partial result.
pub trait PlateFile {
    /// The value produced by a successful parse.
    type Output;

    /// The error type for parsing and I/O failures.
    type Error: Error + From<io::Error>;

    /// Parses a file from any buffered reader.
    ///
    /// # Errors
    ///
    /// Returns an error if reading fails or the content is malformed.
    fn read_from(reader: &mut impl BufRead) -> Result<Self::Output, Self::Error>;

    /// Opens `path` and parses it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsing fails.
    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Self::Output, Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }
}

/// Collects every line of `reader`, propagating the first I/O error.
pub(crate) fn collect_lines(reader: &mut impl BufRead) -> io::Result<Vec<String>> {
    reader.lines().collect()
}
