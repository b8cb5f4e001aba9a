//! Runtime settings: built-in defaults, optional TOML file, then environment.
//!
//! - `Settings::default()` → built-in values
//! - `Settings::from_toml_file(path)` → file values over defaults
//! - `load(&cli_path)` → `--config FILE` or ~/.bb84/config.toml, then env
//!
//! The API key is only ever taken from `CEREBRAS_API_KEY`.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Return the canned analysis instead of calling the model.
    pub use_mock: bool,
    pub default_num_bits: i64,
    pub default_strategy: String,
    pub max_num_bits: usize,
    pub analysis: AnalysisSettings,
    #[serde(skip)]
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    pub endpoint: String,
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            use_mock: true,
            default_num_bits: 16,
            default_strategy: "intermediate".to_string(),
            max_num_bits: 100_000,
            analysis: AnalysisSettings::default(),
            api_key: None,
        }
    }
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            endpoint: "https://api.cerebras.ai/v1/completions".to_string(),
            model: "qwen-3-32b".to_string(),
            temperature: 0.1,
            max_tokens: 200,
            timeout_secs: 45,
        }
    }
}

impl Settings {
    /// Load from TOML file; keys missing from the file keep their defaults.
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let txt = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let settings: Settings = toml::from_str(&txt)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(settings)
    }

    /// Apply `USE_MOCK`, `CEREBRAS_API_KEY` and `BB84_ANALYSIS_MODEL`.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(v) = lookup("USE_MOCK") {
            self.use_mock = v.trim().eq_ignore_ascii_case("true");
        }
        if let Some(key) = lookup("CEREBRAS_API_KEY").filter(|k| !k.trim().is_empty()) {
            self.api_key = Some(key);
        }
        if let Some(model) = lookup("BB84_ANALYSIS_MODEL").filter(|m| !m.trim().is_empty()) {
            self.analysis.model = model;
        }
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).context("serializing settings")
    }
}

/// ~/.bb84/config.toml
pub fn default_config_path() -> Option<PathBuf> {
    dirs_next::home_dir().map(|h| h.join(".bb84").join("config.toml"))
}

pub fn resolve_config_path(cli_path: &Option<PathBuf>) -> Option<PathBuf> {
    if let Some(p) = cli_path {
        return Some(p.clone());
    }
    default_config_path()
}

/// Resolve settings for this process.
///
/// An explicit `--config` file must load; a broken default file only warns.
pub fn load(cli_path: &Option<PathBuf>) -> Result<Settings> {
    let mut settings = match (cli_path, resolve_config_path(cli_path)) {
        (Some(_), Some(p)) => Settings::from_toml_file(&p)?,
        (None, Some(p)) if p.exists() => match Settings::from_toml_file(&p) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("(warn) failed loading {}: {e:#}; using defaults", p.display());
                Settings::default()
            }
        },
        _ => Settings::default(),
    };
    settings.apply_env(|k| std::env::var(k).ok());
    crate::debug_log!(
        "settings use_mock={} model={} key_set={}",
        settings.use_mock,
        settings.analysis.model,
        settings.api_key.is_some()
    );
    Ok(settings)
}

pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Create config parent dir {}", parent.display()))?;
    }
    Ok(())
}
