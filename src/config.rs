//! TOML configuration.
//!
//! Every section is optional; a missing section takes the defaults below,
//! which reproduce the assistant's stock behavior (top 3 paragraphs, 2x
//! heading boost, tokens longer than two characters).

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Path used when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "./config/bookbot.toml";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub corpus: CorpusConfig,
    #[serde(default)]
    pub retrieval: RetrievalConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CorpusConfig {
    #[serde(default = "default_root")]
    pub root: PathBuf,
    #[serde(default = "default_include_globs")]
    pub include_globs: Vec<String>,
    #[serde(default)]
    pub exclude_globs: Vec<String>,
    /// Files (relative to `root`) loaded ahead of everything else.
    #[serde(default = "default_lead_files")]
    pub lead_files: Vec<String>,
    #[serde(default)]
    pub follow_symlinks: bool,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            include_globs: default_include_globs(),
            exclude_globs: Vec::new(),
            lead_files: default_lead_files(),
            follow_symlinks: false,
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from("./docs")
}

/// The book summary plus one `.mdx` page per module directory.
fn default_include_globs() -> Vec<String> {
    vec![
        "physical-ai-humanoid-robotics-summary.mdx".to_string(),
        "modules/*/*.mdx".to_string(),
    ]
}

fn default_lead_files() -> Vec<String> {
    vec!["physical-ai-humanoid-robotics-summary.mdx".to_string()]
}

#[derive(Debug, Deserialize, Clone)]
pub struct RetrievalConfig {
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    #[serde(default = "default_min_token_len")]
    pub min_token_len: usize,
    #[serde(default = "default_heading_boost")]
    pub heading_boost: u32,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
            min_token_len: default_min_token_len(),
            heading_boost: default_heading_boost(),
        }
    }
}

/// Upper bound on `retrieval.heading_boost`.
pub const MAX_HEADING_BOOST: u32 = 1000;

fn default_max_results() -> usize {
    3
}
fn default_min_token_len() -> usize {
    3
}
fn default_heading_boost() -> u32 {
    2
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Include panic text in 500 responses. Leave off outside development.
    #[serde(default)]
    pub expose_error_details: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            expose_error_details: false,
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:5001".to_string()
}

impl Config {
    /// All defaults. Used when no config file exists at the default path.
    pub fn minimal() -> Self {
        Self::default()
    }

    pub fn validate(&self) -> Result<()> {
        if self.retrieval.max_results == 0 {
            bail!("retrieval.max_results must be >= 1");
        }
        if self.retrieval.min_token_len == 0 {
            bail!("retrieval.min_token_len must be >= 1");
        }
        if !(1..=MAX_HEADING_BOOST).contains(&self.retrieval.heading_boost) {
            bail!(
                "retrieval.heading_boost must be in [1, {}]",
                MAX_HEADING_BOOST
            );
        }
        if self.corpus.include_globs.is_empty() {
            bail!("corpus.include_globs must not be empty");
        }
        if self.server.bind.trim().is_empty() {
            bail!("server.bind must not be empty");
        }
        Ok(())
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;
    config.validate()?;

    Ok(config)
}

/// Like [`load_config`], but a missing file at the default location falls
/// back to [`Config::minimal`]. An explicitly named file must exist.
pub fn load_or_default(path: &Path) -> Result<Config> {
    if !path.exists() && path == Path::new(DEFAULT_CONFIG_PATH) {
        warn!(
            "No config file at {}; using built-in defaults",
            path.display()
        );
        return Ok(Config::minimal());
    }
    load_config(path)
}
