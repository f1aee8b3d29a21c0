//! # Till Checkout API
//!
//! ## Startup Sequence
//! ```text
//! init_tracing()
//!      │
//!      ▼
//! ApiConfig::load(--config)      defaults → till.toml → TILL_* env
//!      │
//!      ▼
//! Database::new(DbConfig)        pool + migrations
//!      │
//!      ▼
//! engine_for(db, [checkout])     freight policy + order codes
//!      │
//!      ▼
//! axum::serve(router)            until Ctrl+C
//! ```

use std::path::PathBuf;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use till_api::config::ApiConfig;
use till_api::{engine_for, router, shutdown_on, AppState};
use till_db::{Database, DbConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config = ApiConfig::load(config_path_arg())?;
    info!(
        addr = %config.server.bind_address(),
        db = %config.database.path.display(),
        order_codes = ?config.checkout.order_codes,
        "Configuration loaded"
    );

    if let Some(parent) = config.database.path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let db_config =
        DbConfig::new(&config.database.path).max_connections(config.database.max_connections);
    let db = Database::new(db_config).await?;

    let engine = engine_for(&db, &config.checkout);
    let app = router(AppState::new(engine));

    let bind_addr = config.server.bind_address();
    let listener = TcpListener::bind(&bind_addr).await?;
    info!(addr = %bind_addr, "Checkout API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_on(tokio::signal::ctrl_c()))
        .await?;

    db.close().await;
    Ok(())
}

/// Initializes the tracing subscriber.
///
/// `RUST_LOG` overrides the default `info,till=debug,sqlx=warn`.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,till=debug,sqlx=warn,tower_http=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// `--config <path>` / `-c <path>`, if given.
fn config_path_arg() -> Option<PathBuf> {
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--config" || arg == "-c" {
            return args.next().map(PathBuf::from);
        }
    }
    None
}
