//! Command-line interface for live-measures
//!
//! The tool works on a JSON state file describing a code base: its component
//! tree, analyses, issues and persisted measures.
//!
//! ## Commands
//!
//! - **refresh**: recompute the measures of the given components and of their
//!   ancestors, then save the state file
//! - **init**: generate a default configuration file
//! - **validate**: check a configuration file
//!
//! The `run` function parses command-line arguments using clap and routes to
//! the matching handler. Output goes through a [`Host`] so that commands can
//! be exercised from tests.

mod common;
mod host;
mod init;
mod refresh;
mod run;
mod validate;

pub use common::{ColorMode, LogLevel};
pub use host::Host;
pub use init::{InitArgs, init_config};
pub use refresh::{RefreshArgs, refresh_measures};
pub use run::run;
pub use validate::{ValidateArgs, validate_config};
