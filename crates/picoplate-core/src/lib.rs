//! # picoplate Core Library
//!
//! Converts fluorescence-assay plate-reader output (PicoGreen/RiboGreen reads exported
//! from a 384-well plate) into its four interleaved 96-well sub-plates, and associates
//! named standard wells with their known concentrations.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer layout so that the geometry and parsing logic can
//! be tested without touching the file system.
//!
//! - **[`core`]: The Foundation.** Stateless data models (`PlateMatrix`, `WellCoordinate`,
//!   `StandardCurve`), the pure 384 → 96 plate geometry, and I/O utilities for reading
//!   plate-reader text and exporting tabular sheets.
//!
//! - **[`engine`]: Shared Infrastructure.** Error taxonomy, run configuration and
//!   progress reporting used by the workflows.
//!
//! - **[`workflows`]: The Public API.** Ties `core` and `engine` together into a single
//!   conversion run that builds every output before handing it to an export sink.

pub mod core;
pub mod engine;
pub mod workflows;
