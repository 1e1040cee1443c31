use anyhow::anyhow;
use axum::serve;
use clima::{app, build_app_state, create_folder, get_config_info, get_log_level, setup_logger};
use clima_provider::{HttpFetcher, MeteostatProvider, DEFAULT_REQUEST_TIMEOUT, DEFAULT_USER_AGENT};
use futures::TryFutureExt;
use log::{error, info};
use std::{net::SocketAddr, str::FromStr};
use tokio::{net::TcpListener, signal};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = get_config_info();
    let log_level = get_log_level(&cli);

    setup_logger()
        .level(log_level)
        .level_for("clima", log_level)
        .level_for("clima_provider", log_level)
        .level_for("http_response", log_level)
        .level_for("http_request", log_level)
        .level_for("hyper", log::LevelFilter::Warn)
        .level_for("reqwest", log::LevelFilter::Warn)
        .apply()?;

    let period = cli.period()?;
    let map_dir = cli.map_dir();
    let static_dir = cli.static_dir();
    let host = cli.host();
    let port = cli.port();

    create_folder(&map_dir);

    let socket_addr = SocketAddr::from_str(&format!("{}:{}", host, port))
        .map_err(|e| anyhow!("invalid address: {}", e))?;

    let fetcher = HttpFetcher::new(DEFAULT_USER_AGENT, cli.max_retries(), DEFAULT_REQUEST_TIMEOUT)
        .map_err(|e| anyhow!("error building http client: {}", e))?;
    let provider = MeteostatProvider::new(fetcher, cli.provider_url())
        .with_radius_km(cli.radius_km())
        .with_max_stations(cli.max_stations());

    info!("Clima starting...");
    info!("  Provider: {}", cli.provider_url());
    info!(
        "  Stations: up to {} within {} km",
        cli.max_stations(),
        cli.radius_km()
    );
    info!("  Period: {} to {}", period.start(), period.end());
    info!("  Maps: {}", map_dir);
    info!("  Static: {}", static_dir);

    let app_state = build_app_state(&provider, period, cli.fetch_timeout(), static_dir, map_dir)
        .await
        .map_err(|e| {
            error!("error building app: {}", e);
            e
        })?;

    let listener = TcpListener::bind(socket_addr)
        .map_err(|e| anyhow!("error binding to socket: {}", e))
        .await?;
    info!("  Listen: http://{}", socket_addr);

    let app = app(app_state);

    serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("Clima stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
