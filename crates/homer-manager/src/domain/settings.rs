//! Manager runtime settings.
//!
//! [`ManagerSettings`] is the single source of truth for paths, the listen
//! address, and the remote icon repository.  It is built once at startup from
//! defaults, an optional TOML file, and CLI/environment overrides, then shared
//! read-only.
//!
//! Every field carries a serde default so a settings file only needs the keys
//! it changes:
//!
//! ```toml
//! config_path = "/data/config.yml"
//!
//! [icons]
//! cache_ttl_secs = 600
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::Url;
use serde::{Deserialize, Serialize};

/// All runtime settings for the manager.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManagerSettings {
    /// Location of the dashboard's `config.yml`.
    #[serde(default = "default_config_path")]
    pub config_path: PathBuf,
    /// Directory downloaded icons are written to and served from.
    #[serde(default = "default_assets_dir")]
    pub assets_dir: PathBuf,
    /// Prefix written into an item's `logo` field for a downloaded icon.
    #[serde(default = "default_assets_url_prefix")]
    pub assets_url_prefix: String,
    /// HTTP listen address.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: SocketAddr,
    /// `tracing` level used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub icons: IconSourceSettings,
}

/// Where icons come from and how long the manifest stays fresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconSourceSettings {
    /// `owner/name` of the icon repository.
    #[serde(default = "default_repository")]
    pub repository: String,
    /// Branch or tag the manifest and raw files are read from.
    #[serde(default = "default_git_ref")]
    pub git_ref: String,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_raw_base")]
    pub raw_base: String,
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
    /// Timeout applied to every outbound request.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl IconSourceSettings {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Recursive tree listing of the repository at `git_ref`.
    pub fn tree_url(&self) -> String {
        format!(
            "{}/repos/{}/git/trees/{}?recursive=1",
            self.api_base.trim_end_matches('/'),
            self.repository,
            self.git_ref
        )
    }

    /// Raw file URL for one icon: `<raw_base>/<repo>/<ref>/<format>/<name>.<format>`.
    ///
    /// Each appended segment is percent-encoded, so a name containing `#`,
    /// `?`, `%` or a space still addresses a single file.
    ///
    /// # Errors
    ///
    /// Returns a description of the problem when `raw_base` is not an
    /// absolute URL that can carry a path.
    pub fn raw_url(&self, name: &str, format: &str) -> Result<Url, String> {
        let mut url = Url::parse(&self.raw_base)
            .map_err(|e| format!("invalid raw_base `{}`: {e}", self.raw_base))?;
        url.path_segments_mut()
            .map_err(|()| format!("raw_base `{}` cannot carry a path", self.raw_base))?
            .pop_if_empty()
            .extend(self.repository.split('/'))
            .push(&self.git_ref)
            .push(format)
            .push(&format!("{name}.{format}"));
        Ok(url)
    }
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_config_path() -> PathBuf {
    PathBuf::from("./assets/config.yml")
}
fn default_assets_dir() -> PathBuf {
    PathBuf::from("./assets/tools")
}
fn default_assets_url_prefix() -> String {
    "assets/tools".to_string()
}
fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 3000))
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_repository() -> String {
    "selfhst/icons".to_string()
}
fn default_git_ref() -> String {
    "main".to_string()
}
fn default_api_base() -> String {
    "https://api.github.com".to_string()
}
fn default_raw_base() -> String {
    "https://raw.githubusercontent.com".to_string()
}
fn default_cache_ttl_secs() -> u64 {
    60 * 60
}
fn default_timeout_secs() -> u64 {
    15
}

impl Default for ManagerSettings {
    fn default() -> Self {
        Self {
            config_path: default_config_path(),
            assets_dir: default_assets_dir(),
            assets_url_prefix: default_assets_url_prefix(),
            bind_addr: default_bind_addr(),
            log_level: default_log_level(),
            icons: IconSourceSettings::default(),
        }
    }
}

impl Default for IconSourceSettings {
    fn default() -> Self {
        Self {
            repository: default_repository(),
            git_ref: default_git_ref(),
            api_base: default_api_base(),
            raw_base: default_raw_base(),
            cache_ttl_secs: default_cache_ttl_secs(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
