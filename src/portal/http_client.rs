use reqwest::{header, Method, Response};
use std::{fmt, str::FromStr};
use url::Url;

use super::{RequestError, UnsupportedMethod};

/// The methods the portal client will issue on behalf of a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMethod {
    Get,
    Post,
}

impl RequestMethod {
    fn as_reqwest(self) -> Method {
        match self {
            RequestMethod::Get => Method::GET,
            RequestMethod::Post => Method::POST,
        }
    }
}

impl fmt::Display for RequestMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_reqwest().as_str())
    }
}

impl FromStr for RequestMethod {
    type Err = UnsupportedMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GET" => Ok(RequestMethod::Get),
            "POST" => Ok(RequestMethod::Post),
            other => Err(UnsupportedMethod(other.to_string())),
        }
    }
}

impl TryFrom<Method> for RequestMethod {
    type Error = UnsupportedMethod;

    fn try_from(method: Method) -> Result<Self, Self::Error> {
        method.as_str().parse()
    }
}

/// Form parameters for a POST body.
pub type Params = [(String, String)];

/// Appends a caller's path to the API base.
///
/// The path is appended as text rather than resolved, so an absolute URL ends up
/// as a path segment under the base. Anything that still normalises to a location
/// outside the base (such as `..` segments) is rejected before the token is sent.
pub fn endpoint_url(base: &Url, path: &str) -> Result<Url, RequestError> {
    let joined = format!("{}{}", base.as_str(), path.trim_start_matches('/'));
    let url = Url::parse(&joined).map_err(|source| RequestError::InvalidPath {
        path: path.to_string(),
        source,
    })?;

    if url.origin() != base.origin() || !url.path().starts_with(base.path()) {
        return Err(RequestError::OutsideBase {
            path: path.to_string(),
        });
    }

    Ok(url)
}

/// Performs a single authenticated attempt. Status handling is left to the caller.
pub async fn send_authenticated(
    client: &reqwest::Client,
    url: Url,
    token: &str,
    params: Option<&Params>,
    method: RequestMethod,
) -> Result<Response, RequestError> {
    // The user agent is set on the client itself.
    let mut builder = client
        .request(method.as_reqwest(), url)
        .header(header::ACCEPT, "application/json")
        .bearer_auth(token);

    // Parameters only ever travel as a form body; GET carries none.
    if let (RequestMethod::Post, Some(params)) = (method, params) {
        builder = builder.form(params);
    }

    builder.send().await.map_err(RequestError::Transport)
}
