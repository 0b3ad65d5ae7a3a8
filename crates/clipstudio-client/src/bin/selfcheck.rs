//! Resolve the environment, probe the backend and report what the client
//! would do. Exits non-zero only when the client cannot be built.

use std::sync::Arc;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use clipstudio_client::{ApiClient, ClipStudio};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing()?;

    let client = Arc::new(ApiClient::from_env()?);
    let profile = client.profile();

    println!(
        "clipstudio-selfcheck: environment={} base_url={} timeout_ms={}",
        profile.environment,
        profile.base_url,
        profile.timeout.as_millis()
    );

    let reachable = client.probe().await;
    let status = client.health_status();
    println!(
        "clipstudio-selfcheck: reachable={} checked_at={}",
        reachable,
        status
            .last_checked_at
            .map(|t| t.to_rfc3339())
            .unwrap_or_else(|| "never".to_string())
    );

    let studio = ClipStudio::new(client);
    let voices = studio.tts.voices().await;
    println!(
        "clipstudio-selfcheck: voices={}{}",
        voices.len(),
        if reachable { "" } else { " (mock)" }
    );

    println!("clipstudio-selfcheck: ok");
    Ok(())
}

fn init_tracing() -> anyhow::Result<()> {
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::from_default_env().add_directive("clipstudio_client=info".parse()?);

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer().with_ansi(true).with_target(false))
            .with(env_filter)
            .init();
    }
    Ok(())
}
