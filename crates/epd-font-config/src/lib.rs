//! Font conversion configuration
//!
//! Settings come from `fontconvert.toml`, then environment variables, then
//! command-line flags applied by the binary.

use epd_font_core::{DEFAULT_DPI, DEFAULT_METRICS_REFERENCE};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default configuration file, looked up in the current directory.
pub const DEFAULT_CONFIG_FILE: &str = "fontconvert.toml";

/// Errors raised while loading a configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FontConvertConfig {
    /// Rasterization and packing settings
    pub render: RenderConfig,
    /// Code point coverage settings
    pub intervals: IntervalConfig,
}

/// Rasterization and packing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Panel resolution in dots per inch
    pub dpi: f32,
    /// Threshold glyphs to two colors instead of 16 gray levels
    pub two_color: bool,
    /// Compress each glyph bitmap
    pub compress: bool,
}

/// Code point coverage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IntervalConfig {
    /// Extra `"min,max"` intervals on top of the built-in set
    pub additional: Vec<String>,
    /// Character whose font provides line height, ascender and descender
    pub metrics_reference: char,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            dpi: DEFAULT_DPI,
            two_color: false,
            compress: false,
        }
    }
}

impl Default for IntervalConfig {
    fn default() -> Self {
        Self {
            additional: Vec::new(),
            metrics_reference: DEFAULT_METRICS_REFERENCE,
        }
    }
}

impl FontConvertConfig {
    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `fontconvert.toml` from the current directory, or defaults if it
    /// is missing or unreadable
    pub fn load_or_default() -> Self {
        match Self::load_from_file(DEFAULT_CONFIG_FILE) {
            Ok(config) => {
                log::debug!("loaded {DEFAULT_CONFIG_FILE}");
                config
            }
            Err(ConfigError::Read { .. }) => Self::default(),
            Err(err) => {
                log::warn!("{err}; using defaults");
                Self::default()
            }
        }
    }

    /// Merge configuration with environment variables
    ///
    /// Environment variables take precedence over configuration file values.
    pub fn merge_with_env(&mut self) {
        self.merge_with(|key| std::env::var(key).ok());
    }

    /// Apply overrides from a variable lookup
    fn merge_with(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("FONTCONVERT_DPI") {
            match val.parse::<f32>() {
                Ok(dpi) if dpi > 0.0 => self.render.dpi = dpi,
                _ => log::warn!("ignoring invalid FONTCONVERT_DPI={val}"),
            }
        }
        if let Some(val) = var("FONTCONVERT_TWO_COLOR") {
            self.render.two_color = parse_flag(&val);
        }
        if let Some(val) = var("FONTCONVERT_COMPRESS") {
            self.render.compress = parse_flag(&val);
        }
    }

    /// Load configuration with environment variable overrides
    ///
    /// An explicit `path` must exist and parse; without one the default file
    /// is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::load_from_file(path)?,
            None => Self::load_or_default(),
        };
        config.merge_with_env();
        Ok(config)
    }
}

fn parse_flag(val: &str) -> bool {
    val == "1" || val.eq_ignore_ascii_case("true")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = FontConvertConfig::default();
        assert_eq!(config.render.dpi, DEFAULT_DPI);
        assert_eq!(config.render.dpi, 150.0);
        assert!(!config.render.two_color);
        assert!(!config.render.compress);
        assert_eq!(config.intervals.metrics_reference, '|');
        assert!(config.intervals.additional.is_empty());
    }

    #[test]
    fn test_toml_serialization() {
        let mut config = FontConvertConfig::default();
        config.intervals.additional.push("0x2500,0x257F".to_string());
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: FontConvertConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.intervals.additional, vec!["0x2500,0x257F"]);
        assert_eq!(parsed.render.dpi, 150.0);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[render]\ncompress = true\n\n[intervals]\nadditional = [\"0x20AD,0x20AD\"]").unwrap();

        let config = FontConvertConfig::load_from_file(file.path()).unwrap();
        assert!(config.render.compress);
        assert!(!config.render.two_color);
        assert_eq!(config.render.dpi, 150.0);
        assert_eq!(config.intervals.additional, vec!["0x20AD,0x20AD"]);
        assert_eq!(config.intervals.metrics_reference, '|');
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        let err = FontConvertConfig::load(Some(missing.as_path())).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[render]\ndpi = \"lots\"").unwrap();
        let err = FontConvertConfig::load_from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_merge_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("FONTCONVERT_DPI", "300"),
            ("FONTCONVERT_TWO_COLOR", "TRUE"),
            ("FONTCONVERT_COMPRESS", "0"),
        ]);
        let mut config = FontConvertConfig::default();
        config.render.compress = true;
        config.merge_with(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.render.dpi, 300.0);
        assert!(config.render.two_color);
        assert!(!config.render.compress);
    }

    #[test]
    fn test_invalid_dpi_is_ignored() {
        let mut config = FontConvertConfig::default();
        config.merge_with(|key| (key == "FONTCONVERT_DPI").then(|| "-5".to_string()));
        assert_eq!(config.render.dpi, 150.0);
    }
}
