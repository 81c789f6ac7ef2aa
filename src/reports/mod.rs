//! Refresh reports
//!
//! A [`RefreshReport`] pairs the [`RefreshSummary`](crate::engine::RefreshSummary)
//! of a refresh with the measures of the components that were asked for. It
//! is rendered for the terminal by [`generate_console`], with optional ANSI
//! colors, or as a JSON document by [`generate_json`].

mod console;
mod json;
mod refresh_report;

pub use console::generate as generate_console;
pub use json::generate as generate_json;
pub use refresh_report::{RefreshReport, ReportRow};
