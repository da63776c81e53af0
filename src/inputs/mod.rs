// src/inputs/mod.rs

//! Input sets and their expansion into a tool command line.
//!
//! - [`input_set`] holds the declarative [`InputSet`] and its `expand` step.
//! - [`patterns`] compiles include/exclude globs and walks directory sources.
//! - [`staging`] places resolved files into the scratch directory.
//! - [`expanded`] turns the result into an argument vector.

pub mod expanded;
pub mod input_set;
pub mod patterns;
pub mod staging;

pub use expanded::ExpandedInputs;
pub use input_set::InputSet;
pub use patterns::FileFilter;
