//! Settings consumed by the built-in formulas
//!
//! The configuration is a small TOML document. Every key is optional and
//! falls back to the value found in `default_config.toml`, which is embedded
//! in the binary and checked by the build script.

#[expect(clippy::module_inception, reason = "the configuration type lives in its own file")]
mod config;

pub use config::{CONFIG_FILE_NAME, Config, DEFAULT_CONFIG_TOML};
