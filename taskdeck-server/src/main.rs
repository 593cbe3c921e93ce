//! Taskdeck server -- REST task store.
//!
//! An axum HTTP server exposing CRUD over the single `tasks` table,
//! backed by SQLite. Stateless per request; all state lives in the
//! database.
//!
//! # Usage
//!
//! ```bash
//! # Run on default address 0.0.0.0:3000 with sqlite:taskdeck.db
//! cargo run --bin taskdeck-server
//!
//! # Run on custom address and database
//! cargo run --bin taskdeck-server -- --bind 127.0.0.1:8080 \
//!     --database-url sqlite:/tmp/tasks.db
//!
//! # Or via environment variables
//! TASKDECK_ADDR=127.0.0.1:8080 DATABASE_URL=sqlite:/tmp/tasks.db \
//!     cargo run --bin taskdeck-server
//! ```

use clap::Parser;
use taskdeck_server::config::{ServerCliArgs, ServerConfig};
use taskdeck_server::http;
use taskdeck_server::store::TaskStore;

#[tokio::main]
async fn main() {
    let cli = ServerCliArgs::parse();

    // Load config from CLI args + config file + env vars + defaults.
    let config = match ServerConfig::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            std::process::exit(1);
        }
    };

    // Initialize tracing with the resolved log level.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::info!(addr = %config.bind_addr, db = %config.database_url, "starting taskdeck server");

    // Connect the store (schema is created if missing).
    let store = match TaskStore::connect(&config.database_url).await {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "failed to open task store");
            std::process::exit(1);
        }
    };

    match http::start_server(&config.bind_addr, store).await {
        Ok((bound_addr, handle)) => {
            tracing::info!(addr = %bound_addr, "server listening");
            if let Err(e) = handle.await {
                tracing::error!(error = %e, "server task failed");
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to start server");
            std::process::exit(1);
        }
    }
}
