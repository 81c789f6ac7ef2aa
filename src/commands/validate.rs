use crate::config::Config;
use crate::{Host, Result};
use camino::Utf8PathBuf;
use clap::Parser;
use ohno::IntoAppError;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file [default: live-measures.toml]
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,
}

/// Check that a configuration file loads and holds valid values.
///
/// On failure the error is reported on the host's error stream and the host
/// is asked to exit with status 1.
///
/// # Errors
///
/// Returns the validation error
pub fn validate_config<H: Host>(host: &mut H, args: &ValidateArgs) -> Result<()> {
    let workspace_root = Utf8PathBuf::from(".");
    let config_path = args.config.as_deref();

    match Config::load(&workspace_root, config_path) {
        Ok(_) => {
            let mut output = host.output();
            writeln!(output, "Configuration file is valid").into_app_err("writing to output")?;
            if let Some(path) = config_path {
                writeln!(output, "Config file: {path}").into_app_err("writing to output")?;
            } else {
                writeln!(output, "Using default configuration (no config file specified)").into_app_err("writing to output")?;
            }
            Ok(())
        }
        Err(e) => {
            let _ = writeln!(host.error(), "❌ Configuration validation failed: {e}");
            host.exit(1);
            Err(e)
        }
    }
}
