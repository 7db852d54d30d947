use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Marker substring counted in each source when the config names none.
pub const DEFAULT_PATTERN: &str = "Go";

/// Global configuration loaded from `~/.config/tally/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TallyConfig {
    /// Maximum number of fetch-and-count workers running at once.
    pub worker_limit: usize,
    /// Substring counted in each source.
    pub pattern: String,
    /// Optional HTTP connect timeout in seconds (None = built-in default).
    #[serde(default)]
    pub connect_timeout_secs: Option<u64>,
    /// Optional whole-request HTTP timeout in seconds, covering the body read
    /// (None = built-in default).
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl Default for TallyConfig {
    fn default() -> Self {
        Self {
            worker_limit: 5,
            pattern: DEFAULT_PATTERN.to_string(),
            connect_timeout_secs: None,
            request_timeout_secs: None,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("tally")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<TallyConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = TallyConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: TallyConfig = toml::from_str(&data)?;
    Ok(cfg)
}
