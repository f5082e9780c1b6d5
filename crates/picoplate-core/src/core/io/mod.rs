//! Input/output for plate-reader data.
//!
//! Readers turn the text exported by the plate reader into typed matrices and standard
//! tables; the export side lays results out as named sheets and hands them to an
//! [`export::ExportSink`].

pub mod export;
pub mod reads;
pub mod sheet;
pub mod standards;
pub mod traits;
