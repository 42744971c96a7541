//! HTTP server core implementation

use crate::config::{Config, ServerConfig};
use crate::core::gateway::PromptGateway;
use crate::server::handlers::health_check;
use crate::server::routes;
use crate::server::state::AppState;
use crate::storage::MemoryWorkspaceStore;
use crate::utils::error::{GatewayError, Result};
use actix_web::{App, HttpServer as ActixHttpServer, middleware::DefaultHeaders, web};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_actix_web::TracingLogger;

/// How often the background sweep prunes idle limiter keys and expired
/// cache entries
const MAINTENANCE_PERIOD: Duration = Duration::from_secs(60);

/// HTTP server
pub struct HttpServer {
    /// Server configuration
    config: ServerConfig,
    /// Application state
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server
    ///
    /// Builds the gateway from configuration: vault secret from the
    /// configured environment variable, HTTP client for the configured
    /// provider.
    pub fn new(config: &Config) -> Result<Self> {
        info!("Creating HTTP server");

        let gateway = Arc::new(PromptGateway::from_config(config)?);
        let workspaces = Arc::new(MemoryWorkspaceStore::new());
        let state = AppState::new(config.clone(), gateway, workspaces);

        Ok(Self {
            config: config.server().clone(),
            state,
        })
    }

    /// Create the Actix-web application
    fn create_app(
        state: web::Data<AppState>,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(state)
            .wrap(TracingLogger::default())
            .wrap(DefaultHeaders::new().add(("Server", "promptgate")))
            .route("/health", web::get().to(health_check))
            .configure(routes::gateway::configure_routes)
    }

    /// Start the HTTP server
    pub async fn start(self) -> Result<()> {
        let bind_addr = self.config.bind_addr();
        let port = self.config.port;

        info!("Starting HTTP server on {}", bind_addr);

        let _maintenance = self
            .state
            .gateway
            .start_maintenance_task(MAINTENANCE_PERIOD);

        let state = web::Data::new(self.state);

        let server = ActixHttpServer::new(move || Self::create_app(state.clone()))
            .bind(&bind_addr)
            .map_err(|e| Self::format_bind_error(e, &bind_addr, port))?
            .run();

        info!("HTTP server listening on {}", bind_addr);

        server
            .await
            .map_err(|e| GatewayError::internal(format!("Server error: {}", e)))?;

        info!("HTTP server stopped");
        Ok(())
    }

    /// Get server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Get application state
    pub fn state(&self) -> &AppState {
        &self.state
    }
}
