use crate::config::{CONFIG_FILE_NAME, Config};
use crate::{Host, Result};
use camino::Utf8PathBuf;
use clap::Parser;
use ohno::IntoAppError;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Output configuration file path
    #[arg(value_name = "PATH", default_value = CONFIG_FILE_NAME)]
    pub output: Utf8PathBuf,
}

/// Write the default configuration file, with its comments.
///
/// # Errors
///
/// Returns an error if the file cannot be written
pub fn init_config<H: Host>(host: &mut H, args: &InitArgs) -> Result<()> {
    Config::save_default(&args.output)?;
    writeln!(host.output(), "Generated default configuration file: {}", args.output).into_app_err("writing to output")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::host::TestHost;
    use camino::Utf8Path;

    #[test]
    fn test_init_writes_loadable_config() {
        let dir = tempfile::tempdir().unwrap();
        let output = Utf8Path::from_path(dir.path()).unwrap().join(CONFIG_FILE_NAME);

        let mut host = TestHost::new();
        init_config(&mut host, &InitArgs { output: output.clone() }).unwrap();

        assert!(host.output_str().contains("Generated default configuration file"));
        let config = Config::load(Utf8Path::new("."), Some(output.as_path())).unwrap();
        assert!((config.development_cost_per_line - 30.0).abs() < f64::EPSILON);
    }
}
