// src/main.rs
use anyhow::Result;
use audit_history::application::ports::{
    gateway::BackendGateway, security::TokenVerifier, time::Clock,
};
use audit_history::application::services::{ApplicationDependencies, ApplicationServices};
use audit_history::config::AppConfig;
use audit_history::infrastructure::{
    gateway::PostgrestClient,
    repositories::AuditRepository,
    security::{token::JwtVerifier, token_cache::TokenCache},
    time::SystemClock,
};
use audit_history::presentation::http::{routes::build_router, state::HttpState};
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    if let Err(err) = bootstrap().await {
        tracing::error!(error = %err, "fatal error");
        eprintln!("fatal error: {err}");
        std::process::exit(1);
    }
}

async fn bootstrap() -> Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;
    init_tracing(&config);

    let state = build_state(&config)?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    let address: SocketAddr = listener.local_addr()?;
    tracing::info!("listening on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn build_state(config: &AppConfig) -> Result<HttpState> {
    let gateway: Arc<dyn BackendGateway> = Arc::new(PostgrestClient::new(config)?);
    let repository = Arc::new(AuditRepository::new(Arc::clone(&gateway)));
    let verifier: Arc<dyn TokenVerifier> =
        Arc::new(JwtVerifier::new(config.supabase_jwt_secret()));
    let clock: Arc<dyn Clock> = Arc::new(SystemClock::default());

    let cache = Arc::new(TokenCache::new(
        config.cache_jwt_ttl(),
        config.cache_share_token_ttl(),
    ));
    let _sweeper = cache.spawn_sweeper(config.cache_cleanup_interval());

    let services = Arc::new(ApplicationServices::new(ApplicationDependencies {
        repository,
        verifier,
        cache,
        clock,
        jwt_ttl: config.cache_jwt_ttl(),
        default_page_size: config.default_page_size(),
        max_page_size: config.max_page_size(),
    }));

    Ok(HttpState::new(services))
}

fn init_tracing(config: &AppConfig) {
    let env_filter = std::env::var("RUST_LOG")
        .ok()
        .unwrap_or_else(|| format!("{},tower_http=info", config.log_level()));

    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(env_filter))
        .with(tracing_subscriber::fmt::layer());

    if subscriber.try_init().is_err() {
        tracing::warn!("tracing subscriber already initialised");
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install CTRL+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install terminate handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    tracing::info!("shutdown signal received");
}
