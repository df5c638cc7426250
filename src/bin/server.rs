//! Store Monitor HTTP Server Binary
//!
//! Loads the three CSV datasets into the in-memory repository, sets up the
//! HTTP router, and starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! DATA_DIR=./data REPORTS_DIR=./reports cargo run --bin store-monitor-server
//! ```
//!
//! # Environment Variables
//!
//! - `STORE_MONITOR_CONFIG`: path to a TOML config file (optional)
//! - `HOST`: server host (default: 0.0.0.0)
//! - `PORT`: server port (default: 8080)
//! - `DATA_DIR`: directory with the input CSV datasets (default: data)
//! - `REPORTS_DIR`: directory for report artifacts (default: reports)
//! - `MAX_CONCURRENT_REPORTS`: report admission limit (default: 4)
//! - `RUST_LOG`: log level (default: info)

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use store_monitor::config::StoreMonitorConfig;
use store_monitor::db::{self, LocalRepository};
use store_monitor::http::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .init();

    info!("Starting store monitor HTTP server");

    let config = StoreMonitorConfig::load()?;

    let repository = LocalRepository::new();
    let counts = db::load_datasets(&repository, &config.data_dir)?;
    info!(
        polls = counts.polls,
        business_hours = counts.business_hours,
        timezones = counts.timezones,
        data_dir = %config.data_dir.display(),
        "Datasets loaded"
    );

    let repository = Arc::new(repository) as Arc<dyn db::StoreDataRepository>;
    let state = AppState::new(
        repository,
        config.reports_dir.clone(),
        config.max_concurrent_reports,
    );
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
