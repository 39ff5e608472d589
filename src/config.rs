use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use glob::Pattern;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = ".transcanrc.json";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Ignore patterns: literal directory paths or glob patterns.
    #[serde(default)]
    pub ignores: Vec<String>,
    /// Directories to scan, relative to `source_root`. Empty means the whole
    /// source root.
    #[serde(default)]
    pub includes: Vec<String>,
    #[serde(default = "default_source_root")]
    pub source_root: String,
    /// Extensions parsed as markup templates (tokenizer + block reducer).
    #[serde(default = "default_markup_extensions")]
    pub markup_extensions: Vec<String>,
    /// Extensions parsed as general source (call-style patterns).
    #[serde(default = "default_source_extensions")]
    pub source_extensions: Vec<String>,
    /// Language code stamped on catalog records.
    #[serde(default = "default_language_code")]
    pub language_code: String,
    /// Files per dispatched scan batch.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

fn default_source_root() -> String {
    ".".to_string()
}

fn default_markup_extensions() -> Vec<String> {
    vec![".html".to_string()]
}

fn default_source_extensions() -> Vec<String> {
    vec![".py".to_string()]
}

fn default_language_code() -> String {
    "en".to_string()
}

fn default_batch_size() -> usize {
    100
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ignores: Vec::new(),
            includes: Vec::new(),
            source_root: default_source_root(),
            markup_extensions: default_markup_extensions(),
            source_extensions: default_source_extensions(),
            language_code: default_language_code(),
            batch_size: default_batch_size(),
        }
    }
}

impl Config {
    /// All recognized extensions, markup first.
    pub fn extensions(&self) -> Vec<String> {
        let mut all = self.markup_extensions.clone();
        all.extend(self.source_extensions.iter().cloned());
        all
    }

    /// Validate configuration values.
    ///
    /// Returns an error if any glob patterns in `ignores` are invalid or the
    /// batch size is zero.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            if pattern.contains('*') || pattern.contains('?') {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in 'ignores': \"{}\"", pattern)
                })?;
            }
        }

        if self.batch_size == 0 {
            anyhow::bail!("'batchSize' must be at least 1");
        }

        Ok(())
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

pub struct ConfigLoadResult {
    pub config: Config,
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}
