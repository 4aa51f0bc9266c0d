//! Runtime layer for the bikeshare explorer.
//!
//! Drives the prompt / report / raw-display loop on top of the data and UI
//! crates, and provides the non-interactive one-shot path.

pub mod pager;
pub mod prompt;
pub mod session;

pub use bikeshare_core as core;
pub use bikeshare_data as data;
