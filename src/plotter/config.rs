use crate::plotter::validation::ValidationMode;
use crate::Utils::logger::parse_level;
use simplelog::LevelFilter;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// file looked up in the working directory at start-up
pub const CONFIG_FILE: &str = "function_plotter.toml";

/// Settings of the plotter. Every field has a default, so an absent or empty
/// configuration file is valid.
///
/// ```toml
/// validation = "strict"      # or "permissive"
/// output = "function_plot.png"
/// width = 800
/// height = 600
/// log_level = "info"
/// log_file = "plotter.log"
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PlotterConfig {
    pub validation: ValidationMode,
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
    pub log_level: LevelFilter,
    pub log_file: Option<PathBuf>,
}

impl Default for PlotterConfig {
    fn default() -> Self {
        PlotterConfig {
            validation: ValidationMode::Strict,
            output: PathBuf::from("function_plot.png"),
            width: 800,
            height: 600,
            log_level: LevelFilter::Info,
            log_file: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    Io(String),
    Syntax(String),
    UnknownKey(String),
    InvalidValue { key: String, expected: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::Io(msg) => write!(f, "cannot read configuration: {}", msg),
            ConfigError::Syntax(msg) => write!(f, "configuration is not valid TOML: {}", msg),
            ConfigError::UnknownKey(key) => write!(f, "unknown configuration key '{}'", key),
            ConfigError::InvalidValue { key, expected } => {
                write!(f, "configuration key '{}' expects {}", key, expected)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

fn string_value<'a>(
    key: &str,
    value: &'a toml::Value,
    expected: &'static str,
) -> Result<&'a str, ConfigError> {
    value.as_str().ok_or(ConfigError::InvalidValue {
        key: key.to_string(),
        expected,
    })
}

fn dimension(key: &str, value: &toml::Value) -> Result<u32, ConfigError> {
    value
        .as_integer()
        .filter(|&v| v > 0)
        .and_then(|v| u32::try_from(v).ok())
        .ok_or(ConfigError::InvalidValue {
            key: key.to_string(),
            expected: "a positive integer",
        })
}

impl PlotterConfig {
    /// Reads settings from TOML text; missing keys keep their defaults.
    pub fn from_toml_str(input: &str) -> Result<PlotterConfig, ConfigError> {
        let table: toml::Table =
            toml::from_str(input).map_err(|e: toml::de::Error| ConfigError::Syntax(e.to_string()))?;
        let mut config = PlotterConfig::default();
        for (key, value) in &table {
            match key.as_str() {
                "validation" => {
                    const EXPECTED: &str = "\"strict\" or \"permissive\"";
                    config.validation = match string_value(key, value, EXPECTED)? {
                        "strict" => ValidationMode::Strict,
                        "permissive" => ValidationMode::Permissive,
                        _ => {
                            return Err(ConfigError::InvalidValue {
                                key: key.clone(),
                                expected: EXPECTED,
                            });
                        }
                    };
                }
                "output" => {
                    config.output = PathBuf::from(string_value(key, value, "a file path")?);
                }
                "width" => config.width = dimension(key, value)?,
                "height" => config.height = dimension(key, value)?,
                "log_level" => {
                    const EXPECTED: &str = "one of off, error, warn, info, debug, trace";
                    config.log_level = parse_level(string_value(key, value, EXPECTED)?).ok_or(
                        ConfigError::InvalidValue {
                            key: key.clone(),
                            expected: EXPECTED,
                        },
                    )?;
                }
                "log_file" => {
                    config.log_file = Some(PathBuf::from(string_value(key, value, "a file path")?));
                }
                other => return Err(ConfigError::UnknownKey(other.to_string())),
            }
        }
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise returns the defaults.
    pub fn load(path: &Path) -> Result<PlotterConfig, ConfigError> {
        if !path.exists() {
            return Ok(PlotterConfig::default());
        }
        let text = fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
        PlotterConfig::from_toml_str(&text)
    }
}
