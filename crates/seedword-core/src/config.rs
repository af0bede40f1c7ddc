//! Configuration resolution for seedword.
//!
//! Implements hierarchical config resolution:
//! 1. Built-in defaults
//! 2. Global config (`<config dir>/seedword/settings.json`)
//! 3. Project config (`.seedword/settings.json`)
//! 4. Environment variables
//! 5. CLI arguments (highest priority, applied by the binary)
//!
//! Files are merged key by key, so a project file that only sets
//! `candidates.max_results` keeps the wordlist settings of the global file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use seedword_crypto::{DEFAULT_MAX_CANDIDATES, WordList, WordListBackend, open_wordlist};

use crate::error::{Error, Result};

/// Complete seedword configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub wordlist: WordListConfig,
    #[serde(default)]
    pub candidates: CandidateConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Which wordlist to load and how to index it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WordListConfig {
    pub backend: WordListBackend,
    /// External newline-separated list. The embedded English list is used
    /// when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Word completion settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CandidateConfig {
    pub max_results: usize,
}

impl Default for CandidateConfig {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_CANDIDATES,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default `EnvFilter` directive when `RUST_LOG` is unset.
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            json: false,
        }
    }
}

impl Config {
    /// Open the wordlist this configuration selects.
    pub fn open_wordlist(&self) -> Result<Box<dyn WordList>> {
        let list = open_wordlist(self.wordlist.backend, self.wordlist.path.as_deref())?;
        tracing::debug!(
            backend = %self.wordlist.backend,
            external = self.wordlist.path.is_some(),
            "opened wordlist"
        );
        Ok(list)
    }
}

/// Load configuration with hierarchical resolution.
pub fn load_config(project_dir: Option<&Path>) -> Result<Config> {
    load_config_from(global_config_path().as_deref(), project_dir, |key| {
        std::env::var(key).ok()
    })
}

/// Load configuration from explicit sources.
///
/// `env` looks up environment variables; [`load_config`] passes the process
/// environment.
pub fn load_config_from(
    global_path: Option<&Path>,
    project_dir: Option<&Path>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<Config> {
    let mut merged = serde_json::to_value(Config::default())?;

    if let Some(path) = global_path.filter(|p| p.exists()) {
        merge_json(&mut merged, load_config_file(path)?);
    }

    if let Some(dir) = project_dir {
        let path = project_config_path(dir);
        if path.exists() {
            merge_json(&mut merged, load_config_file(&path)?);
        }
    }

    let mut config: Config = serde_json::from_value(merged)
        .map_err(|e| Error::Config(format!("Invalid configuration: {e}")))?;

    apply_env_overrides(&mut config, env)?;

    Ok(config)
}

/// Get the global config file path.
pub fn global_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("seedword").join("settings.json"))
}

/// Get the project config file path inside `dir`.
pub fn project_config_path(dir: &Path) -> PathBuf {
    dir.join(".seedword").join("settings.json")
}

fn load_config_file(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        let msg = format!("Failed to read config file {}: {e}", path.display());
        Error::Config(msg)
    })?;
    serde_json::from_str(&content).map_err(|e| {
        let msg = format!("Failed to parse config file {}: {e}", path.display());
        Error::Config(msg)
    })
}

fn merge_json(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base), Value::Object(overlay)) => {
            for (key, value) in overlay {
                merge_json(base.entry(key).or_insert(Value::Null), value);
            }
        }
        (base, overlay) => *base = overlay,
    }
}

fn apply_env_overrides(config: &mut Config, env: impl Fn(&str) -> Option<String>) -> Result<()> {
    if let Some(val) = env("SEEDWORD_WORDLIST_BACKEND") {
        config.wordlist.backend = val.parse()?;
    }
    if let Some(val) = env("SEEDWORD_WORDLIST_PATH") {
        config.wordlist.path = (!val.is_empty()).then(|| PathBuf::from(val));
    }
    if let Some(val) = env("SEEDWORD_MAX_CANDIDATES") {
        config.candidates.max_results = val.parse().map_err(|_| {
            let msg = format!("SEEDWORD_MAX_CANDIDATES must be a number, got '{val}'");
            Error::Config(msg)
        })?;
    }
    if let Some(val) = env("SEEDWORD_LOG_LEVEL") {
        config.logging.level = val;
    }
    if let Some(val) = env("SEEDWORD_LOG_JSON") {
        config.logging.json = parse_flag(&val).ok_or_else(|| {
            let msg = format!("SEEDWORD_LOG_JSON must be true or false, got '{val}'");
            Error::Config(msg)
        })?;
    }
    Ok(())
}

fn parse_flag(val: &str) -> Option<bool> {
    match val.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "" | "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
