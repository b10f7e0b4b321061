use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum_extra::extract::cookie::Key;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use kudos_api::auth::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kudos=debug,tower_http=debug".into()),
        )
        .init();

    // Config
    let db_path = std::env::var("KUDOS_DB_PATH").unwrap_or_else(|_| "kudos.db".into());
    let host = std::env::var("KUDOS_HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let port: u16 = std::env::var("KUDOS_PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()?;

    let cookie_key = match std::env::var("KUDOS_COOKIE_SECRET") {
        Ok(secret) => {
            anyhow::ensure!(
                secret.len() >= 64,
                "KUDOS_COOKIE_SECRET must be at least 64 bytes"
            );
            Key::from(secret.as_bytes())
        }
        Err(_) => {
            warn!("KUDOS_COOKIE_SECRET not set; sessions will not survive a restart");
            Key::generate()
        }
    };

    // Init database
    let db = kudos_db::Database::open(&PathBuf::from(&db_path))?;

    // Shared state
    let state = AppState {
        db: Arc::new(db),
        cookie_key,
    };

    let app = kudos_api::routes::router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Kudos server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
