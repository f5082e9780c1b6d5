use super::sheet::{RESERVED_SHEET_NAMES, Sheet, SheetNameError, validate_sheet_name};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("File I/O error for '{path}': {source}", path = path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("CSV writing error for '{path}': {source}", path = path.display())]
    Csv { path: PathBuf, source: csv::Error },
    #[error("Invalid sheet name '{name}': {source}")]
    InvalidSheetName {
        name: String,
        source: SheetNameError,
    },
    #[error("Sheet '{0}' was already written in this export")]
    DuplicateSheet(String),
}

/// Destination for the named sheets produced by a conversion.
///
/// A sink receives every sheet of one run, in order, followed by a single call to
/// [`ExportSink::finish`].
pub trait ExportSink {
    /// Writes one sheet.
    ///
    /// # Errors
    ///
    /// Returns an error if the sheet cannot be written, or if a sheet with the same
    /// name was already written.
    fn write_sheet(&mut self, sheet: &Sheet) -> Result<(), ExportError>;

    /// Completes the export once every sheet has been written.
    fn finish(&mut self) -> Result<(), ExportError> {
        Ok(())
    }
}

/// Writes each sheet as `<directory>/<sheet name>.csv`.
///
/// Blocks are rendered into a dense grid, so every record of a file has the same
/// number of fields. The directory is created on the first write, leaving nothing on
/// disk when a run fails before exporting.
#[derive(Debug)]
pub struct CsvDirectorySink {
    directory: PathBuf,
    written: Vec<PathBuf>,
}

impl CsvDirectorySink {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            written: Vec::new(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Paths of the files written so far, in write order.
    pub fn written_paths(&self) -> &[PathBuf] {
        &self.written
    }

    pub fn path_for(&self, sheet_name: &str) -> PathBuf {
        self.directory.join(format!("{}.csv", sheet_name))
    }
}

impl ExportSink for CsvDirectorySink {
    fn write_sheet(&mut self, sheet: &Sheet) -> Result<(), ExportError> {
        let name = sheet.name();
        if !RESERVED_SHEET_NAMES.contains(&name) {
            validate_sheet_name(name).map_err(|source| ExportError::InvalidSheetName {
                name: name.to_string(),
                source,
            })?;
        }

        let path = self.path_for(name);
        // Sheet names are unique regardless of case, as on case-insensitive file systems.
        if self
            .written
            .iter()
            .any(|written| written.as_os_str().eq_ignore_ascii_case(path.as_os_str()))
        {
            return Err(ExportError::DuplicateSheet(name.to_string()));
        }

        fs::create_dir_all(&self.directory).map_err(|source| ExportError::Io {
            path: self.directory.clone(),
            source,
        })?;

        let csv_err = |source| ExportError::Csv {
            path: path.clone(),
            source,
        };
        let mut writer = csv::WriterBuilder::new()
            .flexible(false)
            .from_path(&path)
            .map_err(csv_err)?;
        for row in sheet.to_grid() {
            writer
                .write_record(row.iter().map(|cell| cell.to_string()))
                .map_err(csv_err)?;
        }
        writer.flush().map_err(|source| ExportError::Io {
            path: path.clone(),
            source,
        })?;

        debug!("Wrote sheet '{}' to {:?}", name, &path);
        self.written.push(path);
        Ok(())
    }

    fn finish(&mut self) -> Result<(), ExportError> {
        info!(
            "Exported {} sheet(s) to {:?}",
            self.written.len(),
            &self.directory
        );
        Ok(())
    }
}

/// Keeps every sheet in memory, for callers that lay out or serialize the results
/// themselves.
#[derive(Debug, Default)]
pub struct MemorySink {
    sheets: Vec<Sheet>,
    names: HashSet<String>,
    finished: bool,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|sheet| sheet.name() == name)
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn into_sheets(self) -> Vec<Sheet> {
        self.sheets
    }
}

impl ExportSink for MemorySink {
    fn write_sheet(&mut self, sheet: &Sheet) -> Result<(), ExportError> {
        if !self.names.insert(sheet.name().to_ascii_lowercase()) {
            return Err(ExportError::DuplicateSheet(sheet.name().to_string()));
        }
        self.sheets.push(sheet.clone());
        Ok(())
    }

    fn finish(&mut self) -> Result<(), ExportError> {
        self.finished = true;
        Ok(())
    }
}
