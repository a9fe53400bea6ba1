//! Authenticated GitHub REST client
//!
//! [`GitHubClient`] owns the transport, the rate limit tracker and the listing
//! caches. Every upstream call goes through [`GitHubClient::request`], which
//! gates on the tracker, sends the fixed headers and decodes the JSON body.

use std::sync::Arc;

use radar_core::{GitHubSettings, Secrets};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::cache::TtlCache;
use crate::http::{header_set, HttpHeaders, HttpRequest, HttpTransport, ReqwestTransport};
use crate::models::{NormalizedItem, Repository};
use crate::rate_limit::{RateLimitInfo, RateLimitTracker};
use crate::types::RawErrorBody;
use crate::{Error, Result};

/// Media type sent in the Accept header
pub const ACCEPT_GITHUB_JSON: &str = "application/vnd.github+json";

/// Per-call header overrides
///
/// Headers given here replace the client's fixed headers of the same name.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub headers: HttpHeaders,
}

impl RequestOptions {
    pub fn header(mut self, name: &str, value: &str) -> Self {
        header_set(&mut self.headers, name, value);
        self
    }
}

/// GitHub API client for read-only dashboard queries
pub struct GitHubClient {
    transport: Arc<dyn HttpTransport>,
    token: String,
    settings: GitHubSettings,
    rate_limit: Arc<RateLimitTracker>,
    pub(crate) repo_cache: TtlCache<Vec<Repository>>,
    pub(crate) item_cache: TtlCache<Vec<NormalizedItem>>,
}

impl GitHubClient {
    /// Create a client that talks to GitHub over HTTPS
    pub fn new(token: impl Into<String>, settings: GitHubSettings) -> Result<Self> {
        Self::with_transport(token, settings, Arc::new(ReqwestTransport::default()))
    }

    /// Create a client using the token from the environment or secrets file
    ///
    /// Token is loaded from (in priority order):
    /// 1. GITHUB_TOKEN environment variable
    /// 2. ~/.config/radar/secrets.toml
    pub fn from_secrets(settings: GitHubSettings) -> Result<Self> {
        let secrets = Secrets::load()?;

        let token = secrets.github_token().ok_or_else(|| {
            Error::Config(
                "GitHub token not found. Set GITHUB_TOKEN environment variable \
                 or add token to ~/.config/radar/secrets.toml"
                    .to_string(),
            )
        })?;

        Self::new(token, settings)
    }

    /// Create a client on top of an arbitrary transport
    pub fn with_transport(
        token: impl Into<String>,
        settings: GitHubSettings,
        transport: Arc<dyn HttpTransport>,
    ) -> Result<Self> {
        let token = token.into().trim().to_string();
        if token.is_empty() {
            return Err(Error::Config("GitHub token is empty".to_string()));
        }

        info!(api_url = %settings.api_url, cache_ttl = ?settings.cache_ttl, "Created GitHub client");

        Ok(Self {
            transport,
            token,
            rate_limit: Arc::new(RateLimitTracker::new()),
            repo_cache: TtlCache::new(settings.cache_ttl),
            item_cache: TtlCache::new(settings.cache_ttl),
            settings,
        })
    }

    /// Share a rate limit tracker with other clients
    pub fn with_rate_limit(mut self, tracker: Arc<RateLimitTracker>) -> Self {
        self.rate_limit = tracker;
        self
    }

    pub fn settings(&self) -> &GitHubSettings {
        &self.settings
    }

    /// Read-only snapshot of the tracked quota
    pub fn get_rate_limit_info(&self) -> RateLimitInfo {
        self.rate_limit.snapshot()
    }

    /// Drop every cached listing
    pub fn clear_cache(&self) {
        self.repo_cache.clear();
        self.item_cache.clear();
        info!("Cleared GitHub cache");
    }

    /// Turn an endpoint path into an absolute URL
    ///
    /// Absolute URLs are returned unchanged.
    pub fn resolve_url(&self, endpoint: &str) -> String {
        if endpoint.starts_with("https://") || endpoint.starts_with("http://") {
            return endpoint.to_string();
        }
        format!(
            "{}/{}",
            self.settings.api_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    /// Issue one authenticated GET and decode the JSON body
    pub async fn request<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: &RequestOptions,
    ) -> Result<T> {
        self.rate_limit.check()?;

        let url = self.resolve_url(endpoint);
        let mut headers: HttpHeaders = vec![
            ("Authorization".to_string(), format!("Bearer {}", self.token)),
            ("Accept".to_string(), ACCEPT_GITHUB_JSON.to_string()),
            ("User-Agent".to_string(), self.settings.user_agent.clone()),
        ];
        for (name, value) in &options.headers {
            header_set(&mut headers, name, value);
        }

        debug!(url = %url, "GitHub request");
        let response = self
            .transport
            .send(HttpRequest {
                url: url.clone(),
                headers,
            })
            .await?;

        self.rate_limit.update_from_headers(&response.headers);

        if !response.is_success() {
            let body = String::from_utf8_lossy(&response.body);
            let message = serde_json::from_str::<RawErrorBody>(&body)
                .ok()
                .and_then(|b| b.message)
                .unwrap_or_else(|| {
                    format!("{} {}", response.status, response.status_text())
                        .trim_end()
                        .to_string()
                });
            debug!(url = %url, status = response.status, %message, "GitHub request failed");
            return Err(Error::Upstream {
                status: response.status,
                message,
            });
        }

        serde_json::from_slice(&response.body).map_err(|source| Error::Decode { url, source })
    }
}

impl std::fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClient")
            .field("api_url", &self.settings.api_url)
            .field("rate_limit", &self.rate_limit.snapshot())
            .finish_non_exhaustive()
    }
}
