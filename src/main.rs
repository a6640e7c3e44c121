use anyhow::Context;
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use quote_board::services::auth_client::HttpAuthClient;
use quote_board::services::quote_client::HttpQuoteClient;
use quote_board::services::session_cookie::{signing_key, SessionCookie};
use quote_board::services::views::Views;
use quote_board::utils::config::AppConfig;
use quote_board::{build_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quote_board=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting quote board server");

    // Load configuration
    let config = AppConfig::from_env();
    tracing::info!(
        "Configuration loaded: bind={}, quote api={}, auth api={}, secure cookies={}",
        config.bind_address(),
        config.api_base_url,
        config.auth_api_base_url,
        config.secure_cookies
    );

    let views = Views::new().context("failed to compile templates")?;

    // One connection pool shared by both remote clients
    let http = reqwest::Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("failed to build HTTP client")?;

    let app_state = AppState {
        quotes: Arc::new(HttpQuoteClient::with_client(http.clone(), config.api_base_url.clone())),
        auth: Arc::new(HttpAuthClient::with_client(http, config.auth_api_base_url.clone())),
        views: Arc::new(views),
        session: SessionCookie::new(config.secure_cookies),
        cookie_key: signing_key(config.session_secret.as_deref()),
    };

    let app = build_router(app_state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout_seconds))),
    );

    // Parse the bind address
    let addr: SocketAddr = config
        .bind_address()
        .parse()
        .with_context(|| format!("invalid bind address {}", config.bind_address()))?;
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Received terminate signal, starting graceful shutdown");
        },
    }
}
