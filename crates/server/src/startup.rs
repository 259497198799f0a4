use std::{env, net::SocketAddr, sync::Arc};

use axum::Router;
use common::utils::logging::init_logging_default;
use dotenvy::dotenv;
use tower_http::cors::CorsLayer;
use tracing::info;

use service::{localizations::LocalizationService, storage::supabase::SupabaseStore};

use crate::routes::{self, ServerState};

fn build_cors() -> CorsLayer {
    // Inherited policy: any origin, any method, any header.
    CorsLayer::very_permissive()
}

/// Resolve the bind address, letting `SERVER_HOST`/`SERVER_PORT` override
/// the config file.
fn load_bind_addr(cfg: &configs::ServerConfig) -> anyhow::Result<SocketAddr> {
    let host = env::var("SERVER_HOST").unwrap_or_else(|_| cfg.host.clone());
    let port = env::var("SERVER_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(cfg.port);
    Ok(format!("{}:{}", host, port).parse()?)
}

/// Public entry: build the app and run the HTTP server.
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging_default();

    let cfg = configs::AppConfig::load_and_validate()?;

    let store = SupabaseStore::new(&cfg.supabase)?;
    let state = ServerState {
        localizations: Arc::new(LocalizationService::new(Arc::new(store))),
    };

    let app: Router = routes::build_router(build_cors(), state);

    let addr = load_bind_addr(&cfg.server)?;
    info!(%addr, table = %cfg.supabase.table, "starting localization api");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
