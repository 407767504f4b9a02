use reqwest::StatusCode;
use tracing::{debug, info, warn};

use super::{
    http_client::{endpoint_url, send_authenticated, Params, RequestMethod},
    login,
    retry::{retry_delay, DEFAULT_RETRY_BUDGET},
    ConfigError, LoginError, PortalConfig, RequestError,
};

/// A session against the SEPPmail Cloud portal.
///
/// Log in once, then issue as many requests as needed with the same token.
#[derive(Debug)]
pub struct PortalClient {
    config: PortalConfig,
    http: reqwest::Client,
    /// The bearer token from the most recent successful login.
    token: Option<String>,
}

impl PortalClient {
    /// Creates a client around the given configuration. No network traffic happens yet.
    pub fn new(config: PortalConfig) -> Result<Self, ConfigError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            config,
            http,
            token: None,
        })
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Forgets the current token. The portal has no logout endpoint, so this is purely local.
    pub fn logout(&mut self) {
        self.token = None;
    }

    /// Logs in and stores the token for further requests.
    ///
    /// Failures are reported as diagnostics only; use [`PortalClient::try_login`]
    /// to get at the reason.
    pub async fn login(&mut self) -> bool {
        match self.try_login().await {
            Ok(()) => true,
            Err(err) => {
                warn!("Login failed: {err}");
                false
            }
        }
    }

    /// Logs in, replacing any previous token. On failure the client is left unauthenticated.
    pub async fn try_login(&mut self) -> Result<(), LoginError> {
        self.token = None;

        let token = login::obtain_access_token(&self.http, &self.config).await?;
        info!(username = %self.config.username, "logged in to portal");
        self.token = Some(token);
        Ok(())
    }

    /// Performs a GET with the default retry budget.
    pub async fn get(&self, path: &str) -> Result<Vec<u8>, RequestError> {
        self.request(path, None, DEFAULT_RETRY_BUDGET, RequestMethod::Get)
            .await
    }

    /// Performs a form-encoded POST with the default retry budget.
    pub async fn post(&self, path: &str, params: &Params) -> Result<Vec<u8>, RequestError> {
        self.request(path, Some(params), DEFAULT_RETRY_BUDGET, RequestMethod::Post)
            .await
    }

    /// Issues an authenticated request and returns the raw response body.
    ///
    /// Only a 200 counts as success. A 4xx is returned immediately, as retrying
    /// would not change the outcome. Anything else is presumed transient and is
    /// retried up to `retry_budget` more times, waiting a little longer before each;
    /// once the budget is spent the call fails with [`RequestError::RetriesExhausted`].
    ///
    /// `params` are sent as a form body for POST, and ignored for GET.
    pub async fn request(
        &self,
        path: &str,
        params: Option<&Params>,
        retry_budget: u32,
        method: RequestMethod,
    ) -> Result<Vec<u8>, RequestError> {
        let Some(token) = self.token.as_deref() else {
            return Err(RequestError::NotAuthenticated);
        };

        let url = endpoint_url(&self.config.base_url, path)?;
        let mut remaining = retry_budget;
        let mut attempt: u32 = 1;

        loop {
            debug!(%method, path, attempt, "sending portal request");
            let response =
                send_authenticated(&self.http, url.clone(), token, params, method).await?;
            let status = response.status();

            if status == StatusCode::OK {
                let body = response.bytes().await.map_err(RequestError::Body)?;
                return Ok(body.to_vec());
            }

            // This body is only for diagnostics, so a failed read isn't worth surfacing.
            let body = response.text().await.unwrap_or_default();

            if status.is_client_error() {
                return Err(RequestError::ClientError { status, body });
            }

            if remaining == 0 {
                return Err(RequestError::RetriesExhausted {
                    status,
                    path: path.to_string(),
                });
            }

            let delay = retry_delay(remaining);
            warn!(
                status = status.as_u16(),
                %body,
                remaining,
                ?delay,
                "transient failure from portal, retrying"
            );
            tokio::time::sleep(delay).await;

            remaining -= 1;
            attempt += 1;
        }
    }
}
