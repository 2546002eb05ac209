//! Seasonal scene server — serves continuously refreshed AI-generated
//! scenes themed to the calendar.
//!
//! # Usage
//!
//! ```bash
//! # SwarmUI backend (default)
//! cargo run -p driftscape-web -- --swarmui-url http://10.0.1.25:7801
//!
//! # OpenAI-compatible backend
//! OPENAI_IMAGE_API_KEY=sk-... cargo run -p driftscape-web -- --provider openai
//!
//! # Preview a date (e.g. Christmas) without waiting for it
//! DATE=12-25 cargo run -p driftscape-web
//! ```
//!
//! Then open the printed URL in a browser. The page polls for new scenes;
//! the server generates at most one image per refresh interval, and only
//! while viewers are connected.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use driftscape::prelude::*;
use driftscape_web::{AppState, ServeConfig, spawn_web};
use tracing::info;

/// Continuously refreshed seasonal AI scene server.
#[derive(Parser)]
#[command(name = "driftscape-web")]
#[command(about = "Serve continuously refreshed seasonal AI-generated scenes")]
struct Args {
    /// Port to listen on.
    #[arg(long, default_value_t = 4002)]
    port: u16,

    /// Image generation backend.
    #[arg(long, value_enum, default_value_t = Provider::Swarmui)]
    provider: Provider,

    // ── SwarmUI settings ───────────────────────────────────────
    /// SwarmUI API base URL.
    #[arg(long, default_value = "http://localhost:7801")]
    swarmui_url: String,

    /// SwarmUI model name.
    #[arg(long, default_value = "Flux/flux1-schnell-fp8")]
    model: String,

    /// CFG scale.
    #[arg(long, default_value_t = 1.0)]
    cfg_scale: f64,

    /// Generation steps.
    #[arg(long, default_value_t = 6)]
    steps: u32,

    /// Image width.
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Image height.
    #[arg(long, default_value_t = 720)]
    height: u32,

    /// Generation seed (-1 = random).
    #[arg(long, default_value_t = -1, allow_negative_numbers = true)]
    seed: i64,

    // ── OpenAI settings ────────────────────────────────────────
    /// OpenAI-compatible API base URL. Key comes from OPENAI_IMAGE_API_KEY.
    #[arg(long, default_value = "https://api.openai.com/v1")]
    openai_base: String,

    /// OpenAI image model.
    #[arg(long, default_value = "dall-e-3")]
    openai_model: String,

    /// OpenAI image size.
    #[arg(long, default_value = "1024x1024")]
    openai_size: String,

    // ── Server settings ────────────────────────────────────────
    /// Minimum seconds between image generations.
    #[arg(long, default_value_t = 60)]
    refresh_secs: u64,

    /// Client poll frequency in seconds.
    #[arg(long, default_value_t = 10)]
    poll_secs: u64,

    /// Image generation timeout in seconds.
    #[arg(long, default_value_t = 300)]
    timeout_secs: u64,
}

/// Available image backends.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum Provider {
    Swarmui,
    Openai,
}

#[tokio::main]
async fn main() -> Result<(), String> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let timeout = Duration::from_secs(args.timeout_secs);

    let blender = Arc::new(SeasonBlender::builtin()?);

    let provider = match args.provider {
        Provider::Swarmui => {
            info!(
                "image provider: swarmui ({}), model {}",
                args.swarmui_url, args.model
            );
            ImageProvider::SwarmUi(SwarmUiClient::new(SwarmUiConfig {
                base_url: args.swarmui_url,
                model: args.model,
                width: args.width,
                height: args.height,
                cfg_scale: args.cfg_scale,
                steps: args.steps,
                seed: args.seed,
                timeout,
            })?)
        }
        Provider::Openai => {
            let api_key = std::env::var("OPENAI_IMAGE_API_KEY")
                .map_err(|_| "Set OPENAI_IMAGE_API_KEY for the openai provider")?;
            info!(
                "image provider: openai ({}), model {} (key set)",
                args.openai_base, args.openai_model
            );
            ImageProvider::OpenAi(OpenAiImageClient::new(OpenAiImageConfig {
                base_url: args.openai_base,
                api_key,
                model: args.openai_model,
                size: args.openai_size,
                timeout,
            })?)
        }
    };

    let config = ServeConfig {
        bind_addr: SocketAddr::from(([0, 0, 0, 0], args.port)),
        refresh_interval: Duration::from_secs(args.refresh_secs),
        poll_interval: Duration::from_secs(args.poll_secs),
        ..ServeConfig::default()
    };

    let app = AppState::new(blender, Arc::new(provider), config);
    let addr = spawn_web(app).await?;
    info!("serving on http://{addr}");

    tokio::signal::ctrl_c()
        .await
        .map_err(|e| format!("failed to listen for shutdown signal: {e}"))?;
    info!("shutdown signal received, exiting");
    Ok(())
}
