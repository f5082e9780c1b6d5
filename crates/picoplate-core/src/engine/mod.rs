//! # Engine Module
//!
//! Shared infrastructure for conversion runs.
//!
//! - **Configuration** ([`config`]) - Input files and the sub-plates to export, with a
//!   validating builder
//! - **Progress Monitoring** ([`progress`]) - Phase and task events for user feedback
//! - **Error Handling** ([`error`]) - The error type returned by workflows

pub mod config;
pub mod error;
pub mod progress;
