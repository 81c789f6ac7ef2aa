use crate::Result;
use camino::{Utf8Path, Utf8PathBuf};
use ohno::{IntoAppError, app_err};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../default_config.toml");

/// Name of the configuration file looked up when none is given explicitly
pub const CONFIG_FILE_NAME: &str = "live-measures.toml";

/// Highest number of decimals a measure may keep
const MAX_DECIMAL_SCALE: u32 = 6;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Cost to develop one line of code, in minutes
    #[serde(default = "default_development_cost_per_line")]
    pub development_cost_per_line: f64,

    /// Upper debt-ratio bounds of the A, B, C and D maintainability ratings
    #[serde(default = "default_rating_grid")]
    pub rating_grid: [f64; 4],

    /// Decimals kept for decimal metrics without their own scale
    #[serde(default = "default_decimal_scale")]
    pub default_decimal_scale: u32,
}

const fn default_development_cost_per_line() -> f64 {
    30.0
}

const fn default_rating_grid() -> [f64; 4] {
    [0.05, 0.1, 0.2, 0.5]
}

const fn default_decimal_scale() -> u32 {
    1
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// An explicit `config_path` must exist. Without one, `live-measures.toml`
    /// is looked up in `base_dir`, and the defaults are used if it is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or holds invalid values
    pub fn load(base_dir: &Utf8Path, config_path: Option<&Utf8Path>) -> Result<Self> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading configuration file '{path}'"))?;
            (path.to_path_buf(), text)
        } else {
            let path: Utf8PathBuf = base_dir.join(CONFIG_FILE_NAME);
            match fs::read_to_string(&path) {
                Ok(text) => (path, text),
                Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
                Err(e) => return Err(e).into_app_err_with(|| format!("reading configuration file '{path}'")),
            }
        };

        let config: Self = toml::from_str(&text).into_app_err_with(|| format!("parsing configuration file '{final_path}'"))?;
        config.validate()?;

        Ok(config)
    }

    /// Save the default configuration to a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save_default(output_path: &Utf8Path) -> Result<()> {
        fs::write(output_path, DEFAULT_CONFIG_TOML).into_app_err_with(|| format!("writing default configuration to {output_path}"))?;
        Ok(())
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error if a value is out of range or the rating grid is not ascending
    pub fn validate(&self) -> Result<()> {
        if !self.development_cost_per_line.is_finite() || self.development_cost_per_line <= 0.0 {
            return Err(app_err!(
                "development_cost_per_line must be greater than 0, got {}",
                self.development_cost_per_line
            ));
        }

        if self.rating_grid.iter().any(|bound| !bound.is_finite() || *bound < 0.0) {
            return Err(app_err!("rating_grid bounds must be non-negative numbers, got {:?}", self.rating_grid));
        }

        if self.rating_grid.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(app_err!("rating_grid bounds must be strictly ascending, got {:?}", self.rating_grid));
        }

        if self.default_decimal_scale > MAX_DECIMAL_SCALE {
            return Err(app_err!(
                "default_decimal_scale must be at most {MAX_DECIMAL_SCALE}, got {}",
                self.default_decimal_scale
            ));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_TOML).expect("default_config.toml should be valid TOML that deserializes to Config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        config.validate().unwrap();
        assert!((config.development_cost_per_line - 30.0).abs() < f64::EPSILON);
        assert_eq!(config.default_decimal_scale, 1);
    }

    #[test]
    fn test_embedded_defaults_match_serde_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_validate_development_cost() {
        let config = Config {
            development_cost_per_line: 0.0,
            ..Config::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("development_cost_per_line"));

        let config = Config {
            development_cost_per_line: f64::NAN,
            ..Config::default()
        };
        let _ = config.validate().unwrap_err();
    }

    #[test]
    fn test_validate_rating_grid_not_ascending() {
        let config = Config {
            rating_grid: [0.1, 0.05, 0.2, 0.5],
            ..Config::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("strictly ascending"));
    }

    #[test]
    fn test_validate_rating_grid_negative() {
        let config = Config {
            rating_grid: [-0.1, 0.05, 0.2, 0.5],
            ..Config::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("non-negative"));

        let config = Config {
            rating_grid: [0.0, 0.05, 0.2, 0.5],
            ..Config::default()
        };
        config.validate().unwrap();
    }

    #[test]
    fn test_validate_decimal_scale() {
        let config = Config {
            default_decimal_scale: 7,
            ..Config::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("default_decimal_scale"));
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let base = Utf8Path::from_path(dir.path()).unwrap();
        let config = Config::load(base, None).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_implicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let base = Utf8Path::from_path(dir.path()).unwrap();
        fs::write(base.join(CONFIG_FILE_NAME), "development_cost_per_line = 12.5\n").unwrap();

        let config = Config::load(base, None).unwrap();
        assert!((config.development_cost_per_line - 12.5).abs() < f64::EPSILON);
        assert_eq!(config.rating_grid, default_rating_grid());
    }

    #[test]
    fn test_load_explicit_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let base = Utf8Path::from_path(dir.path()).unwrap();
        let missing = base.join("nope.toml");
        let err = Config::load(base, Some(&missing)).unwrap_err();
        assert!(err.to_string().contains("reading configuration file"));
    }

    #[test]
    fn test_load_rejects_unknown_keys() {
        let dir = tempfile::tempdir().unwrap();
        let base = Utf8Path::from_path(dir.path()).unwrap();
        let path = base.join("custom.toml");
        fs::write(&path, "colour = true\n").unwrap();

        let err = Config::load(base, Some(&path)).unwrap_err();
        assert!(err.to_string().contains("parsing configuration file"));
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let base = Utf8Path::from_path(dir.path()).unwrap();
        let path = base.join("custom.toml");
        fs::write(&path, "default_decimal_scale = 9\n").unwrap();

        let err = Config::load(base, Some(&path)).unwrap_err();
        assert!(err.to_string().contains("default_decimal_scale must be at most 6"));
    }

    #[test]
    fn test_save_default() {
        let dir = tempfile::tempdir().unwrap();
        let base = Utf8Path::from_path(dir.path()).unwrap();
        let path = base.join("out.toml");
        Config::save_default(&path).unwrap();

        let config = Config::load(base, Some(&path)).unwrap();
        assert_eq!(config, Config::default());
    }
}
