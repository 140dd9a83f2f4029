// Configuration loading and parsing (analysis.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::workload::ranking::{Metric, RemainderPolicy};

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
// Top-level assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub data: DataPaths,
    pub analysis: AnalysisConfig,
    pub chart: ChartConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataPaths {
    /// Path to the historical pitching CSV (Lahman shape).
    pub records: String,
    /// Path to the cohort CSV (free-text names under a `Name` column).
    pub cohort: String,
}

#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub target_year: i32,
    pub metric: Metric,
    pub quantile_count: usize,
    pub remainder_policy: RemainderPolicy,
}

#[derive(Debug, Clone)]
pub struct ChartConfig {
    pub enabled: bool,
}

// ---------------------------------------------------------------------------
// analysis.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the entire analysis.toml file.
#[derive(Debug, Clone, Deserialize)]
struct AnalysisFile {
    data: DataPaths,
    analysis: AnalysisSection,
    #[serde(default)]
    chart: ChartSection,
}

#[derive(Debug, Clone, Deserialize)]
struct AnalysisSection {
    target_year: i32,
    metric: String,
    quantile_count: usize,
    /// Optional; defaults to the last group absorbing the remainder.
    #[serde(default)]
    remainder_policy: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct ChartSection {
    enabled: bool,
}

impl Default for ChartSection {
    fn default() -> Self {
        ChartSection { enabled: true }
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate configuration from `config/analysis.toml` relative to
/// the given `base_dir`.
///
/// This is the lower-level loading primitive that does not auto-copy
/// defaults. Prefer `load_config()` which handles default initialization
/// automatically.
pub(crate) fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join("analysis.toml");
    let text = read_file(&path)?;
    let file: AnalysisFile = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        source: e,
    })?;

    let metric = Metric::parse(&file.analysis.metric).ok_or_else(|| {
        ConfigError::ValidationError {
            field: "analysis.metric".into(),
            message: format!("unknown metric `{}`", file.analysis.metric),
        }
    })?;

    let remainder_policy = match &file.analysis.remainder_policy {
        None => RemainderPolicy::default(),
        Some(raw) => RemainderPolicy::parse(raw).ok_or_else(|| ConfigError::ValidationError {
            field: "analysis.remainder_policy".into(),
            message: format!("unknown remainder policy `{raw}`"),
        })?,
    };

    let config = Config {
        data: file.data,
        analysis: AnalysisConfig {
            target_year: file.analysis.target_year,
            metric,
            quantile_count: file.analysis.quantile_count,
            remainder_policy,
        },
        chart: ChartConfig {
            enabled: file.chart.enabled,
        },
    };

    validate(&config)?;

    Ok(config)
}

/// Ensure `config/analysis.toml` exists by copying it from `defaults/` when
/// missing. Returns the list of files that were copied.
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

    let mut copied = Vec::new();

    let entries = std::fs::read_dir(&defaults_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to read defaults directory: {e}"),
    })?;

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
        let target = config_dir.join(file_name);

        match std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&target)
        {
            Ok(mut dest) => {
                let content = std::fs::read(&path).map_err(|e| ConfigError::DefaultsCopyError {
                    message: format!("failed to read {}: {e}", path.display()),
                })?;
                std::io::Write::write_all(&mut dest, &content).map_err(|e| {
                    ConfigError::DefaultsCopyError {
                        message: format!("failed to write {}: {e}", target.display()),
                    }
                })?;
                copied.push(target);
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                // File already exists in config/, skip it
            }
            Err(e) => {
                return Err(ConfigError::DefaultsCopyError {
                    message: format!("failed to create {}: {e}", target.display()),
                });
            }
        }
    }

    Ok(copied)
}

/// Convenience wrapper: loads config relative to the current working
/// directory. Ensures default config files are copied before loading.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_files(&cwd)?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.analysis.quantile_count == 0 {
        return Err(ConfigError::ValidationError {
            field: "analysis.quantile_count".into(),
            message: "must be greater than 0".into(),
        });
    }

    // Professional records start in 1871; anything outside this range is a
    // typo, not a season.
    let year = config.analysis.target_year;
    if !(1871..=2100).contains(&year) {
        return Err(ConfigError::ValidationError {
            field: "analysis.target_year".into(),
            message: format!("implausible season year {year}"),
        });
    }

    if config.data.records.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "data.records".into(),
            message: "must not be empty".into(),
        });
    }

    if config.data.cohort.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "data.cohort".into(),
            message: "must not be empty".into(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
