//! HTTP implementation of [`IconSource`] against a GitHub-hosted icon
//! repository.
//!
//! The manifest comes from the git trees API; icon bytes come from the raw
//! content host.  Both URLs are derived from [`IconSourceSettings`], so a
//! mirror can be substituted by changing `api_base` / `raw_base`.

use async_trait::async_trait;
use homer_core::{IconFormat, TreeEntry};
use reqwest::header::ACCEPT;
use reqwest::{Client, Response};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::application::{CatalogError, IconSource};
use crate::domain::IconSourceSettings;

const USER_AGENT_VALUE: &str = "Homer-Config-Manager";
const TREE_ACCEPT: &str = "application/vnd.github.v3+json";

/// Longest slice of an error body carried into an error message.
const MAX_DETAIL_LEN: usize = 200;

#[derive(Debug, Deserialize)]
struct TreeResponse {
    #[serde(default)]
    tree: Vec<TreeEntry>,
    #[serde(default)]
    truncated: bool,
}

pub struct GithubIconSource {
    client: Client,
    settings: IconSourceSettings,
}

impl GithubIconSource {
    /// Builds the HTTP client with the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Upstream`] if the TLS backend cannot be
    /// initialised.
    pub fn new(settings: IconSourceSettings) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(settings.timeout())
            .user_agent(USER_AGENT_VALUE)
            .build()
            .map_err(|e| CatalogError::Upstream {
                status: None,
                detail: format!("failed to build HTTP client: {e}"),
            })?;
        Ok(Self { client, settings })
    }
}

#[async_trait]
impl IconSource for GithubIconSource {
    async fn fetch_tree(&self) -> Result<Vec<TreeEntry>, CatalogError> {
        let url = self.settings.tree_url();
        debug!(%url, "querying icon repository");

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, TREE_ACCEPT)
            .send()
            .await
            .map_err(|e| CatalogError::Upstream {
                status: None,
                detail: e.to_string(),
            })?;

        if !response.status().is_success() {
            let (status, detail) = failure(response).await;
            return Err(CatalogError::Upstream {
                status: Some(status),
                detail,
            });
        }

        let payload = response
            .json::<TreeResponse>()
            .await
            .map_err(|e| CatalogError::Upstream {
                status: None,
                detail: format!("invalid tree listing: {e}"),
            })?;

        if payload.truncated {
            warn!(%url, "icon repository listing was truncated by the server");
        }
        Ok(payload.tree)
    }

    async fn fetch_icon(&self, name: &str, format: IconFormat) -> Result<Vec<u8>, CatalogError> {
        let url = self
            .settings
            .raw_url(name, format.as_str())
            .map_err(|detail| CatalogError::Download {
                status: None,
                detail,
            })?;
        debug!(%url, "downloading icon");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| CatalogError::Download {
                status: None,
                detail: e.to_string(),
            })?;

        if !response.status().is_success() {
            let (status, detail) = failure(response).await;
            return Err(CatalogError::Download {
                status: Some(status),
                detail,
            });
        }

        let bytes = response.bytes().await.map_err(|e| CatalogError::Download {
            status: None,
            detail: e.to_string(),
        })?;
        Ok(bytes.to_vec())
    }
}

/// Status code and a short, single-line excerpt of the body.
async fn failure(response: Response) -> (u16, String) {
    let status = response.status();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "<unavailable>".to_string());
    let mut detail: String = body.split_whitespace().collect::<Vec<_>>().join(" ");
    if detail.len() > MAX_DETAIL_LEN {
        let cut = (0..=MAX_DETAIL_LEN)
            .rev()
            .find(|&i| detail.is_char_boundary(i))
            .unwrap_or(0);
        detail.truncate(cut);
        detail.push_str("...");
    }
    if detail.is_empty() {
        detail = status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string();
    }
    (status.as_u16(), detail)
}
