use std::net::{Ipv4Addr, SocketAddr};
use std::path::Path;

use photoshare_server::config::AppConfig;
use photoshare_server::database::client::{Database, DbConfig};
use photoshare_server::init;
use photoshare_server::middleware::error::AppResult;
use photoshare_server::middleware::mw_ctx;
use photoshare_server::utils::file::local_file_storage::ensure_dir_exists;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> AppResult<()> {
    let config = AppConfig::from_env();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("uploads dir = {}", config.upload_dir);
    info!("uploads max mb = {}", config.upload_file_size_max_mb);

    let db = Database::connect(DbConfig {
        url: &config.db_url,
        database: &config.db_database,
        namespace: &config.db_namespace,
        password: config.db_password.as_deref(),
        username: config.db_username.as_deref(),
    })
    .await?;

    init::run_migrations(&db).await?;
    ensure_dir_exists(Path::new(&config.upload_dir)).await?;

    let ctx_state = mw_ctx::create_ctx_state(db, &config);
    init::create_default_admin(&ctx_state, &config).await;

    let routes_all = init::main_router(&ctx_state);

    let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, config.server_port));
    info!("->> LISTENING on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, routes_all.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("->> failed to listen for shutdown signal: {err}");
    }
    info!("->> shutting down");
}
