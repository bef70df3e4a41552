use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use common::utils::logging::init_logging_from_env;
use configs::{AppConfig, ServerConfig, StorageBackend};
use dotenvy::dotenv;
use tokio::runtime::Runtime;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::routes::{self, ServerState};
use service::items::{
    repo::seaorm::SeaOrmItemRepository,
    repository::memory::InMemoryItemRepository,
    ItemRepository,
};

/// Load `.env` and install the tracing subscriber. Call once, before `load_config`.
pub fn init_environment() {
    dotenv().ok();
    init_logging_from_env();
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load config.toml, falling back to environment variables when it is missing or invalid.
pub fn load_config() -> anyhow::Result<AppConfig> {
    match AppConfig::load_and_validate() {
        Ok(cfg) => Ok(cfg),
        Err(e) => {
            warn!(error = %e, "config file unusable; reading configuration from environment");
            AppConfig::from_env()
        }
    }
}

/// Multi-thread runtime sized by `server.worker_threads`.
pub fn build_runtime(server: &ServerConfig) -> std::io::Result<Runtime> {
    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = server.worker_threads {
        builder.worker_threads(w);
    }
    builder.build()
}

/// Pick the item store named by the configuration.
pub async fn build_repository(cfg: &AppConfig) -> anyhow::Result<Arc<dyn ItemRepository>> {
    match cfg.storage.backend {
        StorageBackend::Memory => {
            warn!("using in-memory item store; data is lost on exit");
            Ok(Arc::new(InMemoryItemRepository::default()))
        }
        StorageBackend::Database => {
            let db = models::db::connect_and_migrate(&cfg.database).await?;
            Ok(Arc::new(SeaOrmItemRepository::new(db)))
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "cannot listen for Ctrl+C; serving until the process is killed");
        std::future::pending::<()>().await;
    }
    info!("received Ctrl+C, draining connections");
}

/// Serve the item API with an already-resolved configuration until Ctrl+C.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let repo = build_repository(&cfg).await?;
    let app: Router = routes::build_router(ServerState::new(repo), build_cors());

    let addr: SocketAddr = cfg.server.bind_addr().parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, backend = ?cfg.storage.backend, "item api listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("item api stopped");
    Ok(())
}
