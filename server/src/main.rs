use std::net::{Ipv4Addr, SocketAddr};

use anyhow::Context;
use tokio::{net::TcpListener, signal};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use todo_core::TodoStore;
use todo_server::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv = dotenvy::dotenv();
    let cfg = Config::from_env().context("failed to load configuration")?;
    init_tracing(&cfg.log_level);

    match dotenv {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(e) if e.not_found() => warn!(".env file not found"),
        Err(e) => warn!(error = %e, "ignoring unreadable .env"),
    }

    info!(
        port = cfg.port,
        db_path = %cfg.db_path.display(),
        front_url = %cfg.front_url,
        log_level = %cfg.log_level,
        "configuration loaded"
    );

    let allowed_origin = cfg
        .allowed_origin()
        .with_context(|| format!("FRONT_URL is not a valid origin: {:?}", cfg.front_url))?;

    let store = TodoStore::open(&cfg.db_path)
        .await
        .with_context(|| format!("failed to initialize database at {}", cfg.db_path.display()))?;

    let app = todo_server::app(store.clone(), allowed_origin);

    let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, cfg.port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("HTTP server listening on {}", addr);

    todo_server::run(listener, app, shutdown_signal())
        .await
        .context("server error")?;

    store.close().await;
    info!("Server has shut down gracefully.");
    Ok(())
}

fn init_tracing(default_level: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_level(true)
                .with_target(false),
        )
        .init();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received Ctrl+C, shutting down"),
        _ = terminate => info!("received SIGTERM, shutting down"),
    }
}
