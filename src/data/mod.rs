//! Data loading
//!
//! Season records and pity tables come from RON files or saved API
//! responses, with built-in defaults when nothing is on disk.

pub mod error;
pub mod loader;

pub use error::DataError;
pub use loader::{SeasonData, data_directory, export_default_data, read_record};
