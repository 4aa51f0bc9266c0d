//! Core domain types for the bikeshare explorer.
//!
//! Cities, filters, trip records and datasets, the error hierarchy, calendar
//! helpers, frequency counting, number formatting and CLI settings shared by
//! every other crate in the workspace.

pub mod calculations;
pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
pub mod time_utils;

pub use error::{BikeshareError, DataLoadError, InvalidFilterError, Result};
