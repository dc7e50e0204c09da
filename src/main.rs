use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::AppState;
use rhc_core::config::{data_dir_from_env_value, port_from_env_value};
use rhc_core::{AssessmentService, AssessmentStore, CoreConfig};
use rhc_mail::{SmtpConfig, SmtpMailer};

/// Main entry point for the Remote Home Check scorer.
///
/// Resolves configuration once, prepares the data directories and serves the REST API on
/// `0.0.0.0:$PORT`.
///
/// # Environment Variables
/// - `PORT`: listening port (default: 5000)
/// - `RHC_ENV`: deployment name, logged at startup (the container image sets `production`)
/// - `RHC_DATA_DIR`: root of stored assessments and reports (default: `data`)
/// - `SMTP_SERVER`, `SMTP_PORT` (default: 587), `SMTP_USERNAME`, `SMTP_PASSWORD`, `SMTP_FROM`:
///   relay used to email results; emails are skipped when incomplete
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - `PORT` or `SMTP_PORT` is not a valid port,
/// - the data directories cannot be created, or
/// - the server address cannot be bound or the server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("rhc=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let port = port_from_env_value(std::env::var("PORT").ok())?;
    let env_name = std::env::var("RHC_ENV").unwrap_or_else(|_| "development".into());
    let data_dir = data_dir_from_env_value(std::env::var("RHC_DATA_DIR").ok());

    tracing::info!(
        "++ Remote Home Check ({}) using data directory {}",
        env_name,
        data_dir.display()
    );

    let smtp = SmtpConfig::from_lookup(|key| std::env::var(key).ok())?;
    smtp.log_summary();

    let cfg = Arc::new(CoreConfig::new(data_dir)?);
    let store = AssessmentStore::open(cfg)?;
    let service = AssessmentService::new(store, Arc::new(SmtpMailer::new(smtp)));

    let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, port));
    api_rest::serve(addr, AppState::new(service)).await
}
