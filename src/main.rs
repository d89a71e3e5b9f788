use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::{net::TcpListener, signal};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use as_webhook::args::Args;
use as_webhook::config::Config;
use as_webhook::dispatcher::{Dispatcher, DEFAULT_TIMEOUT};
use as_webhook::registration::Registration;
use as_webhook::resolver::Resolver;
use as_webhook::server::{self, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    if let Some(path) = args.generate_registration.as_deref() {
        let registration = Registration::generate(&args.server, args.as_token.as_deref());
        registration
            .write_to_file(path)
            .with_context(|| format!("failed to write registration to {}", path.display()))?;

        println!("Registration file generated at: {}", path.display());
        println!("Configuration:");
        println!("  - Server URL: {}", registration.url);
        println!("  - AS Token: {}", registration.as_token);
        println!("  - HS Token: {}", registration.hs_token);
        return Ok(());
    }

    let config = match Config::load(&args.config) {
        Ok(config) => config,
        Err(error) => {
            warn!(
                path = %args.config.display(),
                error = %error,
                "could not load config file, using defaults"
            );
            Config::new_default()
        }
    };

    for route in &config.routes {
        info!(route = %route.name, url = %route.webhook_url, "route loaded");
    }

    // A selector that does not compile is a configuration error; refuse to
    // serve rather than drop the route.
    let resolver = Resolver::new(&config).context("route table rejected")?;
    let dispatcher = Dispatcher::new(DEFAULT_TIMEOUT);
    let state = AppState::new(resolver, dispatcher);

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    info!(address = %addr, routes = state.resolver.route_count(), "application service listening");

    axum::serve(listener, server::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("shutdown complete");
    Ok(())
}

/// Complete when a shutdown signal is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received SIGINT"),
        _ = terminate => info!("received SIGTERM"),
    }
}
