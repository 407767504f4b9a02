use reqwest::{header, StatusCode};
use serde::{Deserialize, Serialize};

use super::{LoginError, PortalConfig};

/// Token issuance, relative to the API base.
/// Permissions are requested alongside so the response mirrors what the web portal receives.
const ACCESS_TOKEN_ENDPOINT: &str = "login/access-token?return_permissions=true";

/// The form body expected by the token endpoint.
#[derive(Serialize)]
struct LoginForm<'a> {
    username: &'a str,
    password: &'a str,
}

/// We only care about the token; the permissions and anything else are ignored.
#[derive(Deserialize)]
struct AccessTokenResponse {
    access_token: Option<String>,
}

/// Exchanges the configured credentials for a bearer token.
pub async fn obtain_access_token(
    client: &reqwest::Client,
    config: &PortalConfig,
) -> Result<String, LoginError> {
    let url = config.base_url.join(ACCESS_TOKEN_ENDPOINT)?;

    let result = client
        .post(url)
        .header(header::ACCEPT, "application/json")
        .form(&LoginForm {
            username: &config.username,
            password: &config.password,
        })
        .send()
        .await
        .map_err(LoginError::Transport)?;

    let status = result.status();
    let response_text = result.text().await.map_err(LoginError::Transport)?;

    if status != StatusCode::OK {
        return Err(LoginError::Status {
            status,
            body: response_text,
        });
    }

    match serde_json::from_str::<AccessTokenResponse>(&response_text) {
        Ok(AccessTokenResponse {
            access_token: Some(token),
        }) => Ok(token),
        Ok(_) => Err(LoginError::MissingToken),
        Err(source) => Err(LoginError::Parse {
            source,
            body: response_text,
        }),
    }
}
