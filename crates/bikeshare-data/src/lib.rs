//! Data layer for the bikeshare explorer.
//!
//! Responsible for reading a city's trip CSV into a dataset, filtering it by
//! month and weekday, computing the four trip reports and running the
//! top-level analysis pipeline.

pub mod analysis;
pub mod filter;
pub mod reader;
pub mod reporters;

pub use bikeshare_core as core;
