//! Rendering collected records.
//!
//! # Submodules
//!
//! - [`table`]: grid-bordered text table written to standard output
//! - [`json`]: optional JSON report written to a file

pub mod json;
pub mod table;
