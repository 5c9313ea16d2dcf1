use food_tracker::{AppState, Config, DirStore, RecordStore, router};
use tokio::fs;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env();
    fs::create_dir_all(&config.data_dir).await?;
    info!(data_dir = %config.data_dir.display(), "using data directory");

    let records = RecordStore::new(DirStore::new(config.data_dir.clone()));
    let app = router(AppState::new(records));

    info!("listening on http://{}", config.addr);
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutting down");
    }
}
