//! Terminal output layer for the bikeshare explorer.
//!
//! Provides colour themes, the text rendering of the four trip reports and
//! the aligned raw-record table shown by the pager.

pub mod report_view;
pub mod table_view;
pub mod themes;

pub use bikeshare_core as core;
