//! # Core Module
//!
//! Fundamental building blocks for working with microplate reads.
//!
//! - **Plate Representation** ([`models`]) - Well coordinates, plate layouts, dense read
//!   matrices, quadrants and the standard curve
//! - **Plate Geometry** ([`geometry`]) - The interleaving of four 96-well plates inside
//!   one 384-well plate
//! - **Sub-plate Extraction** ([`extraction`]) - Copying one quadrant out of a 384-well
//!   read matrix into its own 96-well matrix
//! - **File I/O** ([`io`]) - Parsing reader exports and standards files, and writing
//!   named sheets to an export sink
//! - **Errors** ([`error`]) - Failures raised while parsing or reshaping plate data

pub mod error;
pub mod extraction;
pub mod geometry;
pub mod io;
pub mod models;
