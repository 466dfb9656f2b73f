use serde::Deserialize;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::host::ViewportConfig;
use crate::polygon::EdgeMetric;

fn default_verbose() -> bool {
    false
}

/// Settings read from `mapsketch.toml`. Command line flags win over these.
#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    #[serde(default)]
    pub viewport: ViewportConfig,
    #[serde(default)]
    pub edge_metric: EdgeMetric,
    #[serde(default)]
    pub clipboard_file: Option<PathBuf>,
    #[serde(default)]
    pub script: Option<PathBuf>,
    #[serde(default = "default_verbose")]
    pub verbose: bool,
}

impl FileConfig {
    /// Load the first config file found on the search path.
    pub fn load() -> Option<Self> {
        let config_paths = get_config_paths();

        for path in config_paths {
            if path.exists()
                && let Ok(contents) = std::fs::read_to_string(&path)
            {
                match toml::from_str(&contents) {
                    Ok(config) => {
                        tracing::debug!(path = %path.display(), "loaded config");
                        return Some(config);
                    }
                    Err(e) => {
                        tracing::warn!("Failed to parse config file {:?}: {}", path, e);
                    }
                }
            }
        }
        None
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&contents).context("Failed to parse config file")
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from("mapsketch.toml"));
    paths.push(PathBuf::from(".mapsketch.toml"));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("mapsketch").join("config.toml"));
        paths.push(config_dir.join("mapsketch.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".mapsketch.toml"));
        paths.push(home.join(".config").join("mapsketch").join("config.toml"));
    }

    paths
}
