use super::config::ConfigError;
use crate::core::error::PlateError;
use crate::core::io::export::ExportError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to read '{path}': {source}")]
    Input {
        path: String,
        #[source]
        source: PlateError,
    },

    #[error(transparent)]
    Plate(#[from] PlateError),

    #[error("Export failed: {0}")]
    Export(#[from] ExportError),
}
