//! IconCatalog: cached view of the remote icon repository plus downloads into
//! the local asset directory.
//!
//! # Caching policy
//!
//! ```text
//! list_available()
//!   cache fresh (age < ttl)  ─► return cached list, no remote call
//!   otherwise                ─► query remote
//!        ok                  ─► regroup, replace cache, return
//!        error + stale cache ─► log, return stale list
//!        error + no cache    ─► propagate error
//! ```
//!
//! There is no background refresh.  Two callers racing past expiry may both
//! query the remote; the last one to finish wins the cache slot.  The lock
//! is never held across an `.await`.

use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use homer_core::{group_icon_entries, is_safe_file_name, IconFormat, IconInfo, TreeEntry};
use tracing::{debug, info, warn};

use super::error::CatalogError;
use crate::infrastructure::local_assets;

/// Remote source of the icon manifest and raw icon files.
///
/// The production implementation talks HTTP; tests use a recording double.
#[async_trait]
pub trait IconSource: Send + Sync {
    /// Fetches the recursive file listing of the icon repository.
    async fn fetch_tree(&self) -> Result<Vec<TreeEntry>, CatalogError>;

    /// Fetches the raw bytes of `<format>/<name>.<format>`.
    async fn fetch_icon(&self, name: &str, format: IconFormat) -> Result<Vec<u8>, CatalogError>;
}

struct CachedIcons {
    icons: Arc<Vec<IconInfo>>,
    fetched_at: Instant,
}

/// Icon listing cache and downloader.
pub struct IconCatalog {
    source: Box<dyn IconSource>,
    ttl: Duration,
    assets_dir: PathBuf,
    url_prefix: String,
    cache: Mutex<Option<CachedIcons>>,
}

impl IconCatalog {
    /// Creates a catalog with an empty cache.
    ///
    /// `url_prefix` is what [`download`](Self::download) prepends to the file
    /// name in the returned path, e.g. `assets/tools`.
    pub fn new(
        source: impl IconSource + 'static,
        ttl: Duration,
        assets_dir: impl Into<PathBuf>,
        url_prefix: impl Into<String>,
    ) -> Self {
        Self {
            source: Box::new(source),
            ttl,
            assets_dir: assets_dir.into(),
            url_prefix: url_prefix.into(),
            cache: Mutex::new(None),
        }
    }

    pub fn assets_dir(&self) -> &std::path::Path {
        &self.assets_dir
    }

    pub fn url_prefix(&self) -> &str {
        &self.url_prefix
    }

    /// Returns every icon available remotely, sorted by name.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Upstream`] only when the remote query fails
    /// and no earlier result is cached.
    pub async fn list_available(&self) -> Result<Arc<Vec<IconInfo>>, CatalogError> {
        let stale = {
            let cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
            match cache.as_ref() {
                Some(cached) if cached.fetched_at.elapsed() < self.ttl => {
                    debug!(count = cached.icons.len(), "icon catalog cache hit");
                    return Ok(Arc::clone(&cached.icons));
                }
                Some(cached) => Some(Arc::clone(&cached.icons)),
                None => None,
            }
        };

        match self.source.fetch_tree().await {
            Ok(entries) => {
                let icons = Arc::new(group_icon_entries(&entries));
                info!(
                    entries = entries.len(),
                    icons = icons.len(),
                    "icon catalog refreshed"
                );
                *self.cache.lock().unwrap_or_else(PoisonError::into_inner) = Some(CachedIcons {
                    icons: Arc::clone(&icons),
                    fetched_at: Instant::now(),
                });
                Ok(icons)
            }
            Err(e) => match stale {
                Some(icons) => {
                    warn!(error = %e, "icon catalog refresh failed; serving stale list");
                    Ok(icons)
                }
                None => Err(e),
            },
        }
    }

    /// Downloads one icon into the asset directory and returns the path to
    /// store in an item's `logo` field, e.g. `assets/tools/jellyfin.png`.
    ///
    /// An existing file with the same name and format is overwritten.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::InvalidName`] if `name` is not a flat file name.
    /// - [`CatalogError::Download`] if the remote fetch fails.
    /// - [`CatalogError::Storage`] if the file cannot be written.
    pub async fn download(&self, name: &str, format: IconFormat) -> Result<String, CatalogError> {
        if !is_safe_file_name(name) {
            return Err(CatalogError::InvalidName(name.to_string()));
        }

        let bytes = self.source.fetch_icon(name, format).await?;
        let file_name = format!("{name}.{format}");
        let path = local_assets::save_icon(&self.assets_dir, &file_name, &bytes).await?;

        info!(path = %path.display(), bytes = bytes.len(), "icon downloaded");
        Ok(format!("{}/{file_name}", self.url_prefix.trim_end_matches('/')))
    }

    /// Image files already present in the asset directory, sorted.
    pub async fn list_local(&self) -> Vec<String> {
        local_assets::list_local_icons(&self.assets_dir).await
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
