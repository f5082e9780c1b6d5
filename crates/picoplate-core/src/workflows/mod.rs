//! # Workflows Module
//!
//! Top-level entry points of the library.
//!
//! - **Conversion Workflow** ([`convert`]) - Parses a 384-well reads export and a
//!   standards file, extracts the requested 96-well sub-plates and writes every sheet
//!   to an export sink.
//!
//! All outputs of a run are built in memory before the first sheet is written, so a
//! parsing or geometry error never leaves a partial export behind.

pub mod convert;
