//! WebHDFS client configuration and directory listing.

use async_trait::async_trait;
use hg_error::{ConfigError, ListingError, Result};
use hg_traits::{DirectoryLister, EntryKind, ListEntry};
use reqwest::{Client, StatusCode, Url};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::trace;

/// Default namenode HTTP port serving WebHDFS.
pub const DEFAULT_WEBHDFS_PORT: u16 = 50070;

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for WebHDFS access.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebHdfsConfig {
    /// Port used when a namenode host does not name one
    pub port: u16,

    /// Value passed as `user.name` (simple authentication)
    pub user: Option<String>,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Use HTTPS instead of HTTP for bare host names
    pub https: bool,
}

impl Default for WebHdfsConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_WEBHDFS_PORT,
            user: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            https: false,
        }
    }
}

impl WebHdfsConfig {
    /// Create a new WebHdfsConfig with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the `user.name` parameter.
    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    /// Set the request timeout in seconds.
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Use HTTPS for bare host names.
    pub fn with_https(mut self, https: bool) -> Self {
        self.https = https;
        self
    }

    /// Base URL of a namenode.
    ///
    /// `host` may be a bare name (`nn1`), carry a port (`nn1:50470`), or be a
    /// full URL (`https://nn1:50470`).
    pub fn base_url(&self, host: &str) -> Result<Url> {
        let host = host.trim().trim_end_matches('/');
        let candidate = if host.contains("://") {
            host.to_string()
        } else {
            let scheme = if self.https { "https" } else { "http" };
            format!("{scheme}://{host}")
        };

        let mut url = Url::parse(&candidate).map_err(|e| {
            ConfigError::Invalid(format!("Invalid namenode address '{host}': {e}"))
        })?;

        if url.host_str().is_none() {
            return Err(ConfigError::Invalid(format!("Namenode address '{host}' has no host")).into());
        }
        if url.port().is_none() {
            url.set_port(Some(self.port)).map_err(|_| {
                ConfigError::Invalid(format!("Cannot set port on namenode address '{host}'"))
            })?;
        }

        Ok(url)
    }
}

/// Directory lister backed by a namenode's WebHDFS REST endpoint.
#[derive(Debug, Clone)]
pub struct WebHdfsLister {
    client: Client,
    base_url: Url,
    user: Option<String>,
}

impl WebHdfsLister {
    /// Create a lister for one namenode. No request is made.
    pub fn new(host: &str, config: &WebHdfsConfig) -> Result<Self> {
        let base_url = config.base_url(host)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ConfigError::Invalid(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url,
            user: config.user.clone(),
        })
    }

    /// `LISTSTATUS` URL for `path`.
    pub fn list_url(&self, path: &str) -> Url {
        let mut url = self.base_url.clone();
        url.set_path(&format!("/webhdfs/v1{path}"));
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("op", "LISTSTATUS");
            if let Some(user) = &self.user {
                query.append_pair("user.name", user);
            }
        }
        url
    }
}

#[async_trait]
impl DirectoryLister for WebHdfsLister {
    async fn list(&self, path: &str) -> std::result::Result<Vec<ListEntry>, ListingError> {
        let url = self.list_url(path);
        trace!(url = %url, "Sending LISTSTATUS");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ListingError::Transport {
                path: path.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| ListingError::Transport {
            path: path.to_string(),
            message: format!("failed to read response body: {e}"),
        })?;

        if !status.is_success() {
            return Err(parse_remote_error(path, status, &body));
        }

        parse_list_status(path, &body)
    }

    fn endpoint(&self) -> String {
        self.base_url.to_string()
    }
}

#[derive(Deserialize)]
struct ListStatusResponse {
    #[serde(rename = "FileStatuses")]
    file_statuses: FileStatuses,
}

#[derive(Deserialize)]
struct FileStatuses {
    #[serde(rename = "FileStatus", default)]
    file_status: Vec<FileStatus>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileStatus {
    path_suffix: String,
    #[serde(rename = "type", default)]
    kind: EntryKind,
    #[serde(default)]
    length: u64,
}

#[derive(Deserialize)]
struct RemoteExceptionResponse {
    #[serde(rename = "RemoteException")]
    remote_exception: RemoteException,
}

#[derive(Deserialize)]
struct RemoteException {
    exception: String,
    #[serde(default)]
    message: String,
}

/// Decode a successful `LISTSTATUS` body.
pub fn parse_list_status(
    path: &str,
    body: &str,
) -> std::result::Result<Vec<ListEntry>, ListingError> {
    let response: ListStatusResponse =
        serde_json::from_str(body).map_err(|e| ListingError::Decode {
            path: path.to_string(),
            message: e.to_string(),
        })?;

    Ok(response
        .file_statuses
        .file_status
        .into_iter()
        .map(|status| ListEntry {
            path_suffix: status.path_suffix,
            kind: status.kind,
            length: status.length,
        })
        .collect())
}

/// Map an error response to a [`ListingError`].
///
/// 404 and `FileNotFoundException` become [`ListingError::NotFound`]; other
/// bodies carrying a `RemoteException` become [`ListingError::Remote`].
pub fn parse_remote_error(path: &str, status: StatusCode, body: &str) -> ListingError {
    let remote = serde_json::from_str::<RemoteExceptionResponse>(body)
        .ok()
        .map(|r| r.remote_exception);

    match remote {
        Some(e) if e.exception == "FileNotFoundException" => ListingError::NotFound(path.to_string()),
        _ if status == StatusCode::NOT_FOUND => ListingError::NotFound(path.to_string()),
        Some(e) => ListingError::Remote {
            path: path.to_string(),
            exception: e.exception,
            message: e.message,
        },
        None => ListingError::Remote {
            path: path.to_string(),
            exception: format!("HTTP {status}"),
            message: body.chars().take(200).collect(),
        },
    }
}
