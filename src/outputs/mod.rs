//! Output generation for harvested datasets.
//!
//! # Submodules
//!
//! - [`csv`]: Writes the complete ordered dataset to a CSV file
//!
//! The sink receives the dataset only once harvesting has finished; a
//! failed harvest therefore never produces a partial file.

pub mod csv;
