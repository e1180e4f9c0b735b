//! AI Interviewer Service entry point

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use ai_interviewer_agent::TurnOrchestrator;
use ai_interviewer_config::{load_settings, Settings};
use ai_interviewer_model::{HostedInterviewModel, HostedModelConfig};
use ai_interviewer_pipeline::{
    FfmpegConfig, FfmpegConverter, HttpSttAdapter, HttpSttConfig, HttpTtsAdapter, HttpTtsConfig,
};
use ai_interviewer_server::{create_router, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Priority: env vars > config/{env}.yaml > config/default.yaml > defaults
    let env = std::env::var("AI_INTERVIEWER_ENV").ok();
    let settings = match load_settings(env.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            // Tracing not yet initialized, use eprintln for early logging
            eprintln!("Warning: failed to load config: {e}. Using defaults.");
            Settings::default()
        }
    };

    init_tracing(&settings);
    tracing::info!("Starting AI Interviewer Service v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        environment = ?settings.environment,
        config = env.as_deref().unwrap_or("default"),
        "Configuration loaded"
    );

    // Synthesized audio artifacts are served from here
    tokio::fs::create_dir_all(&settings.audio.dir).await?;

    let model = Arc::new(HostedInterviewModel::new(HostedModelConfig {
        endpoint: settings.model.endpoint.clone(),
        start_op: settings.model.start_op.clone(),
        continue_op: settings.model.continue_op.clone(),
        timeout_secs: settings.model.timeout_secs,
        connect_timeout_secs: settings.model.connect_timeout_secs,
    })?);

    // Eager connection attempt is an optimization only; operations
    // re-establish the session lazily, so startup never fails on this.
    match model.connect().await {
        Ok(()) => tracing::info!(endpoint = %settings.model.endpoint, "interview model connected"),
        Err(e) => tracing::warn!(
            error = %e,
            "interview model not reachable at startup, will retry on first request"
        ),
    }

    let converter = Arc::new(FfmpegConverter::new(FfmpegConfig {
        ffmpeg_path: settings.media.ffmpeg_path.clone(),
        sample_rate: settings.media.sample_rate,
        timeout_ms: settings.media.timeout_ms,
        work_dir: settings.media.work_dir.clone().map(Into::into),
    }));

    let stt = Arc::new(HttpSttAdapter::new(HttpSttConfig {
        url: settings.speech.stt_url.clone(),
        timeout_secs: settings.speech.stt_timeout_secs,
    })?);

    let tts = Arc::new(HttpTtsAdapter::new(HttpTtsConfig {
        url: settings.speech.tts_url.clone(),
        voice: settings.speech.tts_voice.clone(),
        timeout_secs: settings.speech.tts_timeout_secs,
        audio_dir: settings.audio.dir.clone().into(),
        public_base: settings.audio.public_base.clone(),
    })?);

    let orchestrator = TurnOrchestrator::new(model.clone(), converter, stt, tts);

    let port = settings.server.port;
    let state = AppState::new(settings, orchestrator, model);
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}

/// Initialize tracing from settings (RUST_LOG wins when set)
fn init_tracing(settings: &Settings) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "ai_interviewer={},tower_http=debug",
            settings.observability.log_level
        )
        .into()
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);
    let fmt_layer = if settings.observability.log_json {
        tracing_subscriber::fmt::layer().json().boxed()
    } else {
        tracing_subscriber::fmt::layer().boxed()
    };
    subscriber.with(fmt_layer).init();
}
