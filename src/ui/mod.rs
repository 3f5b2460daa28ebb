//! Terminal user interface

mod app;

pub use app::{App, SeasonStatus, Tab};
