//! promptgate - protective gateway for tenant prompt generation

#![allow(missing_docs)]

use promptgate::server;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    // The vault secret is commonly supplied through a .env file in
    // development; load it before anything reads the environment
    dotenvy::dotenv().ok();

    // Initialize logging system
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_thread_ids(false)
        .init();

    // Start server (auto-loads config/gateway.yaml)
    match server::builder::run_server().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Print error using Display (not Debug) to preserve newlines
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
