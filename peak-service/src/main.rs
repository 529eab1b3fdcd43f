use anyhow::Result;
use peak_service::{
    config::AppConfig,
    http::{create_router, AppState},
    metrics_server, observability,
    upload::UploadStore,
};
use std::net::SocketAddr;

#[tokio::main]
async fn main() -> Result<()> {
    observability::init_tracing();

    // Load configuration
    let cfg = AppConfig::load()?;

    // Start metrics server if configured
    if let Some(metrics_cfg) = &cfg.metrics {
        metrics_server::init(&metrics_cfg.bind_addr)?;
    }

    let uploads = UploadStore::new(&cfg.uploads);
    uploads.ensure_dir()?;
    let upload_dir = uploads.dir().display().to_string();

    let app = create_router(
        AppState::new(uploads, cfg.report.view),
        cfg.server.max_upload_bytes,
    );

    let addr: SocketAddr = cfg
        .server
        .bind_addr
        .parse()
        .map_err(|e| anyhow::anyhow!("invalid server.bind_addr: {e}"))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, %upload_dir, view = ?cfg.report.view, "peak service listening");

    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
