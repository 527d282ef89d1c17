use anyhow::{Context, Result};
use serde::Deserialize;

/// Default run parameters, optionally overridden by a `run.toml` file and
/// then by explicit CLI flags.
#[derive(Clone, Debug, Deserialize)]
pub struct RunConfig {
    #[serde(default = "default_cutoff")]
    pub cutoff: u32,
    #[serde(default)]
    pub topn: Option<usize>,
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default = "default_n_iter")]
    pub n_iter: u32,
    #[serde(default = "default_languages")]
    pub languages: usize,
}

fn default_cutoff() -> u32 {
    4
}
fn default_seed() -> u64 {
    42
}
fn default_n_iter() -> u32 {
    3
}
fn default_languages() -> usize {
    10
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            cutoff: default_cutoff(),
            topn: None,
            seed: default_seed(),
            n_iter: default_n_iter(),
            languages: default_languages(),
        }
    }
}

/// Loads `run.toml` if present, else the built-in defaults.
pub fn load(path: Option<&str>) -> Result<RunConfig> {
    match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path).context(format!("error reading run config {}", path))?;
            toml::from_str(&raw).context(format!("error parsing run config {}", path))
        }
        None => Ok(RunConfig::default()),
    }
}
