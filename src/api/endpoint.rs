//! Resolution of the API base path from the deployment context.
//!
//! The client addresses the card service either at its default mount
//! (`/api`) or, when deployed as a sub-application under `/tcg`, at the
//! namespaced mount (`/tcg/api`). Local development hosts always use the
//! default mount. Resolution happens once, when the session is built.

use reqwest::Url;
use thiserror::Error;
use tracing::info;

/// Default API mount.
pub const DEFAULT_API_BASE: &str = "/api";

/// API mount used when the client is served under the `/tcg` prefix.
pub const NAMESPACED_API_BASE: &str = "/tcg/api";

/// Route prefix of the mounted sub-application.
const SUB_APP_PREFIX: &str = "/tcg";

/// Hosts treated as local development.
const LOCAL_HOSTS: [&str; 2] = ["localhost", "127.0.0.1"];

/// Map a hostname and route path to an API base path.
///
/// Pure and total: unknown hosts fall back to [`DEFAULT_API_BASE`].
///
/// # Examples
///
/// ```
/// use tcgs::api::resolve;
///
/// assert_eq!(resolve("localhost", "/tcg/search"), "/api");
/// assert_eq!(resolve("cards.example.com", "/tcg/search"), "/tcg/api");
/// assert_eq!(resolve("cards.example.com", "/search"), "/api");
/// ```
pub fn resolve(hostname: &str, path: &str) -> &'static str {
    if LOCAL_HOSTS.contains(&hostname) {
        DEFAULT_API_BASE
    } else if is_sub_app_path(path) {
        NAMESPACED_API_BASE
    } else {
        DEFAULT_API_BASE
    }
}

/// Any path starting with `/tcg`, including `/tcgplayer`.
fn is_sub_app_path(path: &str) -> bool {
    path.starts_with(SUB_APP_PREFIX)
}

/// Where the client believes it is deployed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentContext {
    pub hostname: String,
    pub path: String,
}

impl DeploymentContext {
    pub fn new(hostname: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            hostname: hostname.into(),
            path: path.into(),
        }
    }

    /// Context described by a server URL such as `https://cards.example.com/tcg/`.
    pub fn from_url(url: &Url) -> Self {
        Self::new(url.host_str().unwrap_or_default(), url.path())
    }

    pub fn api_base(&self) -> &'static str {
        resolve(&self.hostname, &self.path)
    }
}

/// Errors building an [`ApiEndpoint`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EndpointError {
    /// The server URL cannot carry a path (e.g. `mailto:`).
    #[error("Server URL cannot be used as an API root: {url}")]
    NotABase { url: String },

    /// The configured API base could not be joined onto the server URL.
    #[error("Invalid API base '{base}': {reason}")]
    InvalidBase { base: String, reason: String },
}

/// Root URL of the card service: server origin plus API base path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiEndpoint {
    root: Url,
}

impl ApiEndpoint {
    /// Build the API root for `server_url`.
    ///
    /// `base_override`, when set, wins over [`resolve`]. It may be a path
    /// (`/v2/api`) or an absolute URL.
    pub fn new(server_url: &Url, base_override: Option<&str>) -> Result<Self, EndpointError> {
        if server_url.cannot_be_a_base() {
            return Err(EndpointError::NotABase {
                url: server_url.to_string(),
            });
        }

        let context = DeploymentContext::from_url(server_url);
        let base = match base_override {
            Some(base) => base,
            None => context.api_base(),
        };

        let root = server_url
            .join(base)
            .map_err(|e| EndpointError::InvalidBase {
                base: base.to_string(),
                reason: e.to_string(),
            })?;
        if root.cannot_be_a_base() {
            return Err(EndpointError::NotABase {
                url: root.to_string(),
            });
        }

        info!(
            host = %context.hostname,
            path = %context.path,
            overridden = base_override.is_some(),
            root = %root,
            "Resolved API endpoint"
        );
        Ok(Self { root })
    }

    pub fn root(&self) -> &Url {
        &self.root
    }

    /// URL of one resource under the API root, without a query string.
    pub fn resource(&self, name: &str) -> Url {
        let mut url = self.root.clone();
        url.set_query(None);
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(name);
        }
        url
    }
}
