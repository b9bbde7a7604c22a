use anyhow::Result;
use weatherboard::{WeatherboardConfig, WeatherboardError, telemetry, web};

#[tokio::main]
async fn main() -> Result<()> {
    let config = WeatherboardConfig::load().inspect_err(report)?;
    telemetry::init(&config.logging)?;

    tracing::info!(
        version = weatherboard::VERSION,
        fetching_enabled = config.weather.credential().is_some(),
        "Starting weatherboard"
    );

    web::run(config).await.inspect_err(report)
}

/// Print the friendly hint for known failures before the full error chain
fn report(err: &anyhow::Error) {
    if let Some(known) = err.downcast_ref::<WeatherboardError>() {
        eprintln!("{}", known.user_message());
    }
}
