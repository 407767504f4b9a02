use std::{env, fmt};
use url::Url;

use super::ConfigError;

/// The portal's public API endpoint.
pub const DEFAULT_API_URL: &str = "https://login.seppmail.cloud/api/v1/";

/// Sent with every request. Ideally replaced with something unique per deployment,
/// as the portal operators use it when debugging.
pub const DEFAULT_USER_AGENT: &str = "seppmailcloud-rest-example/1.0";

const API_URL_VAR: &str = "SEPPMAIL_API_URL";
const API_USER_VAR: &str = "SEPPMAIL_API_USER";
const API_SECRET_VAR: &str = "SEPPMAIL_API_SECRET";
const USER_AGENT_VAR: &str = "SEPPMAIL_USER_AGENT";

/// Everything the client needs to know to reach the portal.
#[derive(Clone)]
pub struct PortalConfig {
    /// Always ends with `/`, so relative paths join underneath it.
    pub base_url: Url,
    pub username: String,
    pub password: String,
    pub user_agent: String,
}

impl PortalConfig {
    pub fn new(
        base_url: &str,
        username: impl Into<String>,
        password: impl Into<String>,
        user_agent: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: normalize_base_url(base_url)?,
            username: username.into(),
            password: password.into(),
            user_agent: user_agent.into(),
        })
    }

    /// Reads the configuration from `SEPPMAIL_*` environment variables.
    /// The API user and secret are required; everything else has a default.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_url = lookup(API_URL_VAR).unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let username = lookup(API_USER_VAR).ok_or(ConfigError::Missing(API_USER_VAR))?;
        let password = lookup(API_SECRET_VAR).ok_or(ConfigError::Missing(API_SECRET_VAR))?;
        let user_agent = lookup(USER_AGENT_VAR).unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());

        Self::new(&base_url, username, password, user_agent)
    }
}

// Keep the secret out of logs.
impl fmt::Debug for PortalConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PortalConfig")
            .field("base_url", &self.base_url.as_str())
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

/// `Url::join` replaces the last path segment unless the base ends with a slash,
/// so `.../api/v1` would otherwise lose its `v1`.
fn normalize_base_url(raw: &str) -> Result<Url, ConfigError> {
    let mut with_slash = raw.trim().to_string();
    if !with_slash.ends_with('/') {
        with_slash.push('/');
    }

    Url::parse(&with_slash).map_err(|source| ConfigError::InvalidUrl {
        url: raw.to_string(),
        source,
    })
}
