//! Server builder and run_server function

use crate::config::Config;
use crate::server::server::HttpServer;
use crate::utils::error::{GatewayError, Result};
use tracing::info;

/// Server builder for easier configuration
pub struct ServerBuilder {
    config: Option<Config>,
}

impl ServerBuilder {
    /// Create a new server builder
    pub fn new() -> Self {
        Self { config: None }
    }

    /// Set configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the HTTP server
    pub fn build(self) -> Result<HttpServer> {
        let config = self
            .config
            .ok_or_else(|| GatewayError::Config("Configuration is required".to_string()))?;

        HttpServer::new(&config)
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Run the server with automatic configuration loading
pub async fn run_server() -> Result<()> {
    info!("🚀 Starting promptgate");

    // Auto-load configuration file
    let config_path = "config/gateway.yaml";
    info!("📄 Loading configuration file: {}", config_path);

    let config = match Config::from_file(config_path).await {
        Ok(config) => {
            info!("✅ Configuration file loaded successfully");
            config
        }
        Err(e) => {
            info!(
                "⚠️  Configuration file loading failed, using default config: {}",
                e
            );
            info!("💡 Copy config/gateway.example.yaml to config/gateway.yaml to customize");
            Config::default()
        }
    };

    // Environment variables override whatever the file said
    let config = config.merge(Config::from_env()?);

    // Create and start server
    let server = HttpServer::new(&config)?;
    info!(
        "🌐 Server starting at: http://{}:{}",
        config.server().host,
        config.server().port
    );
    info!("📋 API Endpoints:");
    info!("   GET    /health - Health check");
    info!("   POST   /v1/prompts/generate - Generate a prompt through the gateway");
    info!("   POST   /v1/workspaces - Register a workspace credential");
    info!("   GET    /v1/cache/stats - Response cache statistics");
    info!("   DELETE /v1/cache - Clear the response cache");

    server.start().await
}
