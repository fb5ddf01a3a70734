use std::{net::SocketAddr, sync::Arc};

use tokio::net::TcpListener;
use tracing::{info, warn};
use tts_client::TtsClient;

use server::config::ServerConfig;
use server::{build_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let _ = dotenv::dotenv();

    info!("Starting voiceover relay server...");

    let config = ServerConfig::from_env();
    info!(
        "Server configuration loaded: port={}, upstream_timeout={}s, request_timeout={}s",
        config.port, config.upstream_timeout_secs, config.request_timeout_secs
    );

    let tts = match config.api_key.as_deref() {
        Some(key) => Some(Arc::new(TtsClient::with_endpoint(
            key,
            &config.upstream_endpoint,
            config.upstream_timeout(),
        )?)),
        None => {
            warn!("GOOGLE_TTS_API_KEY not set; synthesis requests will fail until it is configured");
            None
        }
    };

    let state = AppState {
        tts,
        config: config.clone(),
    };
    let app = build_router(state);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind {addr}: {e}. Try a different PORT."))?;

    info!("Server listening on http://{addr}");
    axum::serve(listener, app).await?;
    Ok(())
}
