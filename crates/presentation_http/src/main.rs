//! Talkscribe HTTP Server
//!
//! Main entry point for the HTTP API server.

use std::{sync::Arc, time::Duration};

use application::{
    PendingCleanupRegistry, RetryPolicy, SpeechToTextService, TextToSpeechService,
};
use axum::extract::DefaultBodyLimit;
use infrastructure::{
    AppConfig, LanguageDetectionAdapter, S3BlobStore, SpeechSynthesisAdapter, TranscriptionAdapter,
};
use axum::http::{HeaderValue, Method};
use presentation_http::{
    RateLimiterConfig, RateLimiterLayer, routes, spawn_bucket_cleanup_task,
    spawn_job_cleanup_task, state::AppState,
};
use tokio::{net::TcpListener, signal};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        eprintln!("Failed to load config, using defaults: {e}");
        AppConfig::default()
    });

    init_tracing(&config.server.log_format);

    info!("Talkscribe v{} starting...", env!("CARGO_PKG_VERSION"));
    info!(
        host = %config.server.host,
        port = %config.server.port,
        speech_provider = %config.speech.base_url,
        bucket = %config.storage.bucket,
        "Configuration loaded"
    );

    // Initialize adapters
    let blob_store = Arc::new(
        S3BlobStore::new(&config.storage)
            .map_err(|e| anyhow::anyhow!("Failed to initialize blob store: {e}"))?,
    );
    let transcription = Arc::new(
        TranscriptionAdapter::new(&config.speech)
            .map_err(|e| anyhow::anyhow!("Failed to initialize transcription client: {e}"))?,
    );
    let detector = Arc::new(
        LanguageDetectionAdapter::new(&config.speech)
            .map_err(|e| anyhow::anyhow!("Failed to initialize language detection: {e}"))?,
    );
    let synthesizer = Arc::new(
        SpeechSynthesisAdapter::new(&config.speech)
            .map_err(|e| anyhow::anyhow!("Failed to initialize speech synthesis: {e}"))?,
    );

    // Initialize services
    let registry = Arc::new(PendingCleanupRegistry::new());
    let speech_to_text = Arc::new(SpeechToTextService::new(
        blob_store,
        transcription,
        Arc::clone(&registry),
    ));
    let text_to_speech = Arc::new(TextToSpeechService::with_retry(
        detector,
        synthesizer,
        RetryPolicy::new(
            config.tts.max_attempts,
            Duration::from_millis(config.tts.retry_delay_ms),
        ),
    ));

    let state = AppState {
        speech_to_text: Arc::clone(&speech_to_text),
        text_to_speech,
    };

    // Build router
    let app = routes::create_router(state);

    // Configure CORS layer
    let cors_layer = if config.server.allowed_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        CorsLayer::new()
            .allow_origin(parse_allowed_origins(&config.server.allowed_origins))
            .allow_methods([Method::GET, Method::POST])
            .allow_headers(Any)
    };

    // Configure rate limiter
    let rate_limit_window = Duration::from_secs(config.security.rate_limit_window_secs);
    let rate_limiter = RateLimiterLayer::new(&RateLimiterConfig {
        enabled: config.security.rate_limit_enabled,
        max_requests: config.security.rate_limit_max_requests,
        window: rate_limit_window,
    });

    // Evict idle client buckets so the per-IP map does not grow forever
    let bucket_cleanup_handle = spawn_bucket_cleanup_task(rate_limiter.state(), rate_limit_window);

    // Add middleware (order matters: first added = outermost)
    let app = app
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .layer(rate_limiter)
        .layer(DefaultBodyLimit::max(config.server.max_upload_bytes));

    // Spawn the job cleanup sweep
    let cleanup_handle = spawn_job_cleanup_task(
        speech_to_text,
        Some(Duration::from_secs(config.cleanup.interval_secs)),
    );

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{addr}");

    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs.unwrap_or(30));

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_timeout))
        .await?;

    cleanup_handle.abort();
    bucket_cleanup_handle.abort();
    info!("Server shutdown complete");

    Ok(())
}

/// Parse configured CORS origins, warning about any that are not valid
/// header values instead of dropping them silently.
fn parse_allowed_origins(origins: &[String]) -> Vec<HeaderValue> {
    let mut parsed = Vec::with_capacity(origins.len());
    for origin in origins {
        match origin.parse::<HeaderValue>() {
            Ok(value) => parsed.push(value),
            Err(e) => warn!(origin = %origin, error = %e, "Ignoring invalid CORS origin"),
        }
    }
    parsed
}

fn init_tracing(log_format: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "talkscribe_server=debug,tower_http=debug".into());

    if log_format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

/// Wait for shutdown signals (SIGINT, SIGTERM) and handle graceful shutdown
async fn shutdown_signal(timeout: Duration) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }

    info!("Waiting up to {timeout:?} for connections to close...");
    // Connection draining is handled by axum's graceful_shutdown
}
