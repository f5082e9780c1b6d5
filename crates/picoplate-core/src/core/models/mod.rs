//! Data models describing plates, wells and the standard curve.
//!
//! All models are immutable once built: a [`matrix::PlateMatrix`] is created once from
//! its source and only read afterwards.

pub mod matrix;
pub mod quadrant;
pub mod standard;
pub mod well;
