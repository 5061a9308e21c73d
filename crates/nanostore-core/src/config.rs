use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::retry::RetryPolicy;

/// Resolver endpoints offered in the download form before the user adds any.
pub const DEFAULT_RESOLVERS: &[&str] = &[
    "https://confederacy.babbage.systems",
    "https://staging-confederacy.babbage.systems",
    "http://localhost:3002",
];

/// Storage hosts offered in the upload form before the user adds any.
pub const DEFAULT_PUBLISHERS: &[&str] = &[
    "https://nanostore.babbage.systems",
    "https://staging-nanostore.babbage.systems",
    "http://localhost:3104",
];

/// Retry policy parameters (optional section in config.toml).
///
/// The default is a single attempt; raise `max_attempts` to opt into
/// exponential backoff on transient transport failures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of attempts per request (including the first).
    pub max_attempts: u32,
    /// Base delay in seconds for exponential backoff (e.g. 0.25 = 250ms).
    pub base_delay_secs: f64,
    /// Maximum backoff delay in seconds.
    pub max_delay_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 1,
            base_delay_secs: 0.25,
            max_delay_secs: 30,
        }
    }
}

impl RetryConfig {
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts.max(1),
            base_delay: Duration::from_secs_f64(self.base_delay_secs.max(0.0)),
            max_delay: Duration::from_secs(self.max_delay_secs),
        }
    }
}

/// Where and how often to look for the local client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresenceConfig {
    /// URL answered by the local client when it is running.
    pub url: String,
    /// Poll interval in milliseconds.
    pub interval_ms: u64,
}

impl Default for PresenceConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:3301/v1/version".to_string(),
            interval_ms: 1000,
        }
    }
}

impl PresenceConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms.max(1))
    }

    /// Limit for a single probe: the interval, kept between 1s and 5s.
    pub fn probe_timeout(&self) -> Duration {
        self.interval()
            .clamp(Duration::from_secs(1), Duration::from_secs(5))
    }
}

/// Global configuration loaded from `~/.config/nanostore/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NanostoreConfig {
    /// Default resolver set for downloads; the first entry starts out selected.
    pub resolvers: Vec<String>,
    /// Default storage hosts for uploads; the first entry starts out selected.
    #[serde(default = "default_publishers")]
    pub publishers: Vec<String>,
    /// Retention used when an upload does not name one.
    pub default_retention_minutes: u64,
    /// Connection-establishment limit for every HTTP request. Transfers themselves are unbounded.
    pub connect_timeout_secs: u64,
    #[serde(default)]
    pub presence: PresenceConfig,
    /// Optional retry policy; if missing, a single attempt is made.
    #[serde(default)]
    pub retry: Option<RetryConfig>,
}

fn default_publishers() -> Vec<String> {
    DEFAULT_PUBLISHERS.iter().map(|s| s.to_string()).collect()
}

impl Default for NanostoreConfig {
    fn default() -> Self {
        Self {
            resolvers: DEFAULT_RESOLVERS.iter().map(|s| s.to_string()).collect(),
            publishers: default_publishers(),
            default_retention_minutes: 180,
            connect_timeout_secs: 15,
            presence: PresenceConfig::default(),
            retry: None,
        }
    }
}

impl NanostoreConfig {
    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry.clone().unwrap_or_default().policy()
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs.max(1))
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("nanostore")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<NanostoreConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = NanostoreConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: NanostoreConfig = toml::from_str(&data)?;
    Ok(cfg)
}
