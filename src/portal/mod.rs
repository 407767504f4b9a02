mod client;
mod config;
mod error;
mod http_client;
mod login;
mod retry;

pub use client::PortalClient;
pub use config::PortalConfig;
pub use error::{ConfigError, LoginError, RequestError, UnsupportedMethod};
pub use http_client::{Params, RequestMethod};
pub use retry::DEFAULT_RETRY_BUDGET;
