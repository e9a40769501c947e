// Configuration loading and parsing (config/dashboard.toml).

use honor_core::analytics::color::NamedScale;
use honor_core::analytics::filter::PlayerFilter;
use honor_core::analytics::ranking::DEFAULT_TOP_N;
use honor_core::dataset::Dataset;
use serde::Deserialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name of the dashboard config inside `config/` and `defaults/`.
pub const CONFIG_FILE: &str = "dashboard.toml";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// dashboard.toml structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub data: DataConfig,
    /// Filters of the main table and the radar comparison.
    #[serde(default)]
    pub filters: FilterSelection,
    #[serde(default)]
    pub comparison: ComparisonConfig,
    /// The scatter plot has its own, independent filters.
    #[serde(default)]
    pub scatter: FilterSelection,
    #[serde(default)]
    pub ranking: RankingConfig,
    #[serde(default)]
    pub color: ColorConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// Path of the player CSV, relative to the working directory.
    pub players: String,
}

/// Accepted positions and teams. An omitted list means "every value in the
/// dataset"; an explicit empty list accepts nothing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterSelection {
    pub positions: Option<Vec<String>>,
    pub teams: Option<Vec<String>>,
}

impl FilterSelection {
    pub fn to_filter(&self, dataset: &Dataset) -> PlayerFilter {
        let all = PlayerFilter::all(dataset);
        PlayerFilter {
            positions: match &self.positions {
                Some(list) => list.iter().cloned().collect(),
                None => all.positions,
            },
            teams: match &self.teams {
                Some(list) => list.iter().cloned().collect(),
                None => all.teams,
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ComparisonConfig {
    /// Player names for the radar comparison, in picker order.
    #[serde(default)]
    pub players: Vec<String>,
    /// Also build the chart against the positional mean.
    #[serde(default = "default_true")]
    pub with_mean: bool,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        ComparisonConfig {
            players: Vec::new(),
            with_mean: true,
        }
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct RankingConfig {
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

impl Default for RankingConfig {
    fn default() -> Self {
        RankingConfig {
            top_n: DEFAULT_TOP_N,
        }
    }
}

fn default_top_n() -> usize {
    DEFAULT_TOP_N
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ColorConfig {
    #[serde(default)]
    pub scale: NamedScale,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate `config/dashboard.toml` relative to `base_dir`.
///
/// Does not copy defaults; prefer `load_config()`.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join(CONFIG_FILE);
    let text = read_file(&path)?;
    let config: Config = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        source: e,
    })?;
    validate(&config)?;
    Ok(config)
}

/// Ensure all config files exist by copying missing ones from `defaults/`.
/// Returns the list of files that were copied. Skips `.example` files.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    if !defaults_dir.exists() {
        if !config_dir.exists() {
            return Err(ConfigError::DefaultsCopyError {
                message: format!(
                    "neither defaults/ nor config/ directory found in {}; \
                     run from the project root or ensure defaults/ is present",
                    base_dir.display()
                ),
            });
        }
        return Ok(vec![]);
    }

    std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create config directory: {e}"),
    })?;

    let entries = std::fs::read_dir(&defaults_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to read defaults directory: {e}"),
    })?;

    let mut copied = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| ConfigError::DefaultsCopyError {
            message: format!("failed to read defaults entry: {e}"),
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name() else {
            continue;
        };
        if file_name.to_str().is_some_and(|n| n.ends_with(".example")) {
            continue;
        }
        let target = config_dir.join(file_name);

        // create_new makes the existence check and the creation one step, so
        // a user's edited config is never truncated.
        match std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&target)
        {
            Ok(mut dest) => {
                let content = std::fs::read(&path).map_err(|e| ConfigError::DefaultsCopyError {
                    message: format!("failed to read {}: {e}", path.display()),
                })?;
                dest.write_all(&content).map_err(|e| ConfigError::DefaultsCopyError {
                    message: format!("failed to write {}: {e}", target.display()),
                })?;
                copied.push(target);
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {}
            Err(e) => {
                return Err(ConfigError::DefaultsCopyError {
                    message: format!("failed to create {}: {e}", target.display()),
                });
            }
        }
    }

    Ok(copied)
}

/// Loads config relative to the current working directory, copying defaults
/// first.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_files(&cwd)?;
    load_config_from(&cwd)
}

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.data.players.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "data.players".into(),
            message: "must not be empty".into(),
        });
    }

    if config.ranking.top_n == 0 {
        return Err(ConfigError::ValidationError {
            field: "ranking.top_n".into(),
            message: "must be > 0".into(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
