use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::AppConfig;
use models::RecordSchema;
use service::{file::record_store::FileRecordStore, records::RecordStore, runtime, RecordService};
use tokio::signal;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes::{self, AppState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Assemble the router around an already opened store.
pub fn build_app(cfg: &AppConfig, store: Arc<dyn RecordStore>) -> Router {
    let records = RecordService::new(store, RecordSchema::for_kind(cfg.storage.schema))
        .reject_duplicate_ids(cfg.storage.reject_duplicate_ids);
    routes::build_router(AppState { records }, &cfg.frontend, cfg.server.max_body_bytes, build_cors())
}

/// Public entry: open the store, build the app and run the HTTP server until
/// Ctrl+C or SIGTERM.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    runtime::ensure_env(&cfg.frontend.static_dir, &cfg.storage.path).await?;

    let store = FileRecordStore::open(&cfg.storage.path).await?;
    let app = build_app(&cfg, store);

    let addr: SocketAddr = format!("{}:{}", cfg.server.host, cfg.server.port).parse()?;
    info!(
        %addr,
        schema = ?cfg.storage.schema,
        static_dir = %cfg.frontend.static_dir.display(),
        "starting record server"
    );
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("record server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
        info!("received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut s) => {
                s.recv().await;
                info!("received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
