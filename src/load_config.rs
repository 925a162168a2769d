/// `load_config` module: builds the runtime [`DigestConfig`] from defaults, an
/// optional YAML file and environment overrides.
///
/// # Precedence
/// 1. Built-in defaults (`data/events.json`, `data/event_ids.json`, `output/`,
///    `https://api.restful-api.dev`, 5 second fetch timeout)
/// 2. Keys present in the YAML file passed with `--config`
/// 3. `EVENT_STORE_BASE_URL` and `EVENT_STORE_TIMEOUT_SECS` from the environment
///
/// # Errors
/// All errors use `anyhow::Error` and are surfaced at the CLI boundary.
use anyhow::{Context, Result};
use event_digest_core::pipeline::DigestPaths;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, error, info};

pub const DEFAULT_BASE_URL: &str = "https://api.restful-api.dev";
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 5;

pub const BASE_URL_ENV: &str = "EVENT_STORE_BASE_URL";
pub const TIMEOUT_ENV: &str = "EVENT_STORE_TIMEOUT_SECS";

#[derive(Debug, Clone)]
pub struct DigestConfig {
    pub paths: DigestPaths,
    pub store: StoreConfig,
}

/// Remote object store settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub base_url: String,
    pub fetch_timeout: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
        }
    }
}

impl DigestConfig {
    pub fn trace_loaded(&self) {
        info!(
            events = %self.paths.events.display(),
            event_ids = %self.paths.event_ids.display(),
            output_dir = %self.paths.output_dir.display(),
            base_url = %self.store.base_url,
            fetch_timeout_secs = self.store.fetch_timeout.as_secs(),
            "Loaded DigestConfig"
        );
        debug!(?self, "Config loaded (full debug)");
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    #[serde(default)]
    paths: PathsSection,
    #[serde(default)]
    store: StoreSection,
}

#[derive(Debug, Default, Deserialize)]
struct PathsSection {
    events: Option<PathBuf>,
    event_ids: Option<PathBuf>,
    output_dir: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct StoreSection {
    base_url: Option<String>,
    fetch_timeout_secs: Option<u64>,
}

/// Loads configuration; `path` is the optional YAML file given on the command line.
pub fn load_config(path: Option<&Path>) -> Result<DigestConfig> {
    let raw = match path {
        Some(path) => read_config_file(path)?,
        None => {
            info!("No config file given, using defaults");
            RawConfig::default()
        }
    };

    let defaults = DigestPaths::default();
    let paths = DigestPaths {
        events: raw.paths.events.unwrap_or(defaults.events),
        event_ids: raw.paths.event_ids.unwrap_or(defaults.event_ids),
        output_dir: raw.paths.output_dir.unwrap_or(defaults.output_dir),
    };

    let mut store = StoreConfig::default();
    if let Some(base_url) = raw.store.base_url {
        store.base_url = base_url;
    }
    if let Some(secs) = raw.store.fetch_timeout_secs {
        store.fetch_timeout = Duration::from_secs(secs);
    }

    if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
        info!(base_url = %base_url, "{BASE_URL_ENV} found in env");
        store.base_url = base_url;
    }
    if let Ok(raw_secs) = std::env::var(TIMEOUT_ENV) {
        let secs = raw_secs.trim().parse::<u64>().map_err(|e| {
            error!(error = ?e, var = %raw_secs, "{TIMEOUT_ENV} must be a whole number of seconds");
            anyhow::anyhow!("{TIMEOUT_ENV} must be a whole number of seconds: {e}")
        })?;
        store.fetch_timeout = Duration::from_secs(secs);
    }

    let config = DigestConfig { paths, store };
    config.trace_loaded();
    Ok(config)
}

fn read_config_file(path: &Path) -> Result<RawConfig> {
    info!(config_path = ?path, "Loading configuration from file");
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;

    match serde_yaml::from_str(&content) {
        Ok(raw) => {
            info!(config_path = ?path, "Parsed config YAML successfully");
            Ok(raw)
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path, "Failed to parse config YAML");
            Err(anyhow::anyhow!("Failed to parse config YAML: {e}"))
        }
    }
}
