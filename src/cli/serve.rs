//! Serve command implementation

use crate::admission::start_sweeper;
use crate::api::{create_router, AppState};
use crate::cli::ServeArgs;
use crate::config::{LogFormat, RelayConfig};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Load configuration with CLI overrides
pub fn load_config_with_overrides(
    args: &ServeArgs,
) -> Result<RelayConfig, Box<dyn std::error::Error>> {
    // Load from file if it exists, otherwise use defaults
    let mut config = if args.config.exists() {
        RelayConfig::load(Some(&args.config))?
    } else {
        tracing::debug!("Config file not found, using defaults");
        RelayConfig::default()
    };

    // Apply environment variable overrides
    config = config.with_env_overrides();

    // Apply CLI overrides (highest priority)
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(ref host) = args.host {
        config.server.host = host.clone();
    }
    if let Some(ref log_level) = args.log_level {
        config.logging.level = log_level.clone();
    }

    Ok(config)
}

/// Initialize tracing based on configuration
pub fn init_tracing(
    config: &crate::config::LoggingConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let filter_str = crate::logging::build_filter_directives(config);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    // Warn if content logging is enabled
    if config.enable_content_logging {
        eprintln!("WARNING: Content logging is enabled. Prompt previews will be logged.");
        eprintln!("         This may include sensitive data. Use only for debugging.");
    }

    match config.format {
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .try_init()?;
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .try_init()?;
        }
    }

    Ok(())
}

/// Wait for shutdown signal (SIGINT or SIGTERM)
async fn shutdown_signal(cancel_token: CancellationToken) {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install CTRL+C handler");
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
            tracing::info!("Received SIGINT, shutting down...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down...");
        }
    }

    cancel_token.cancel();
}

/// Main serve command handler
pub async fn run_serve(args: ServeArgs) -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load and merge configuration
    let config = load_config_with_overrides(&args)?;
    config.validate()?;

    // 2. Initialize tracing
    init_tracing(&config.logging)?;

    tracing::info!("Starting relay server");
    tracing::debug!(?config, "Loaded configuration");

    if config.auth.api_token.is_none() {
        tracing::warn!("No API token configured, POST /telegram is unprotected");
    }

    // 3. Build application state and router
    let config = Arc::new(config);
    let state = Arc::new(AppState::new(Arc::clone(&config)));
    let app = create_router(Arc::clone(&state));

    if !state.telegram.is_configured() {
        tracing::warn!("No bot token configured, webhook replies will not be delivered");
    }

    // 4. Start the rate-limit history sweeper (unless disabled)
    let cancel_token = CancellationToken::new();
    let sweeper_handle = if args.no_sweeper {
        tracing::info!("Rate-limit history sweeper disabled");
        None
    } else {
        Some(start_sweeper(
            Arc::clone(&state.limiter),
            Duration::from_secs(config.limits.sweep_interval_seconds),
            cancel_token.clone(),
        ))
    };

    // 5. Bind and serve
    let addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!(addr = %addr, model = %config.backend.model, "Relay API server listening");

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal(cancel_token.clone()))
    .await?;

    // 6. Cleanup
    if let Some(handle) = sweeper_handle {
        tracing::info!("Waiting for sweeper to stop");
        handle.await?;
    }

    tracing::info!("Relay server stopped");
    Ok(())
}
