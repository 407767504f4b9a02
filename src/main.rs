use anyhow::{Context, Result};
use seppmailctl::portal::{PortalClient, PortalConfig, RequestMethod};
use std::env;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Sales orders are fetched from this month onwards unless told otherwise.
const DEFAULT_TIME_START: &str = "2023-1-1";

/// The data fetch is cheap to repeat by hand, so only retry once.
const FETCH_RETRY_BUDGET: u32 = 1;

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    // A .env file is a convenience, not a requirement.
    dotenv::dotenv().ok();

    let config = PortalConfig::from_env().context("unable to load portal configuration")?;
    let mut client = PortalClient::new(config)?;

    if !client.login().await {
        warn!("Login failed");
        return Ok(());
    }

    // `salesorders/csv` returns the same data as CSV; `version` is handy for debugging.
    let path = env::var("SEPPMAIL_PATH").unwrap_or_else(|_| {
        let time_start =
            env::var("SEPPMAIL_TIME_START").unwrap_or_else(|_| DEFAULT_TIME_START.to_string());
        format!("salesorders?time_start={time_start}")
    });
    let method = match env::var("SEPPMAIL_METHOD") {
        Ok(method) => method.parse::<RequestMethod>()?,
        Err(_) => RequestMethod::Get,
    };

    info!(%method, path, "fetching from portal");
    match client.request(&path, None, FETCH_RETRY_BUDGET, method).await {
        Ok(body) => println!("{}", render_payload(&body)),
        Err(err) if err.is_fatal() => {
            error!("{err}");
            return Err(err.into());
        }
        Err(err) => warn!("{err}"),
    }

    Ok(())
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

/// JSON is pretty-printed; anything else (such as CSV) is shown as text.
fn render_payload(body: &[u8]) -> String {
    match serde_json::from_slice::<serde_json::Value>(body) {
        Ok(json) => format!("{json:#}"),
        Err(_) => String::from_utf8_lossy(body).into_owned(),
    }
}
