// Framework bootstrap for the booking server runtime.

use crate::domain::destination::Destination;
use crate::domain::ports::SearchHandler;
use crate::frameworks::config::{DispatchMode, Settings};
use crate::interface_adapters::routes;
use crate::interface_adapters::state::{AppState, SystemClock};
use crate::use_cases::dispatch::{IntentDispatcher, OverlayFeed};
use crate::use_cases::showcase::Showcase;

use std::net::SocketAddr;
use std::{io::Result, sync::Arc};

fn init_runtime() {
    let _ = dotenvy::dotenv();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

// Serve on an already-bound listener until Ctrl-C.
pub async fn run(listener: tokio::net::TcpListener) -> Result<()> {
    let settings = Settings::load().map_err(std::io::Error::other)?;
    run_with_settings(listener, settings).await
}

pub async fn run_with_settings(listener: tokio::net::TcpListener, settings: Settings) -> Result<()> {
    let state = build_state(&settings)?;
    tracing::info!(dispatch_mode = ?settings.dispatch_mode, "booking server configured");
    serve(listener, state, shutdown_signal()).await
}

async fn serve<F>(listener: tokio::net::TcpListener, state: Arc<AppState>, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let address = listener.local_addr()?;
    let showcase = state.showcase.clone();
    let overlay = state.overlay.clone();

    // Open overlay streams would hold graceful shutdown forever.
    let rotation = showcase.clone();
    let shutdown = async move {
        shutdown.await;
        if let Some(feed) = overlay {
            feed.close();
        }
        rotation.stop();
    };

    let app = routes::app(state);
    tracing::info!(%address, "listening");

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .inspect_err(|e| {
            tracing::error!(error = %e, "server error");
        });

    // No rotation timer outlives the server.
    showcase.stop();
    served
}

pub async fn run_with_config() -> Result<()> {
    init_runtime();

    let settings = Settings::load()
        .inspect_err(|e| tracing::error!(error = %e, "invalid configuration"))
        .map_err(std::io::Error::other)?;
    let address = SocketAddr::from(([0, 0, 0, 0], settings.port));

    // Bind TCP listener with error handling
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .inspect_err(|e| {
            tracing::error!(%address, error = %e, "failed to bind");
        })?;

    run_with_settings(listener, settings).await
}

fn build_state(settings: &Settings) -> Result<Arc<AppState>> {
    let redirect = settings.external_redirect().map_err(std::io::Error::other)?;
    tracing::debug!(reservation_base_url = %redirect.base_url(), "reservation redirect configured");

    let overlay = match settings.dispatch_mode {
        DispatchMode::Redirect => None,
        DispatchMode::Overlay => Some(OverlayFeed::new(settings.overlay_capacity)),
    };
    let handler = overlay
        .clone()
        .map(|feed| Arc::new(feed) as Arc<dyn SearchHandler>);

    let showcase = Arc::new(Showcase::new(Destination::default()));
    showcase.start(settings.destination_rotation(), settings.testimonial_rotation());

    Ok(Arc::new(AppState {
        clock: Arc::new(SystemClock),
        dispatcher: IntentDispatcher::new(handler, redirect),
        overlay,
        showcase,
    }))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        // Without a signal handler, keep serving until the process is killed.
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
