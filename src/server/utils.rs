//! HTTP server utility methods

use crate::server::server::HttpServer;
use crate::utils::error::GatewayError;

impl HttpServer {
    /// Format a user-friendly error message for port binding failures
    pub(crate) fn format_bind_error(
        error: std::io::Error,
        bind_addr: &str,
        port: u16,
    ) -> GatewayError {
        let error_str = error.to_string();

        // "Address already in use" (macOS: os error 48, Linux: os error 98)
        if error_str.contains("Address already in use")
            || error_str.contains("os error 48")
            || error_str.contains("os error 98")
        {
            let message = format!(
                r#"
┌─────────────────────────────────────────────────────────────────┐
│  ❌ Error: Port {} is already in use
├─────────────────────────────────────────────────────────────────┤
│  Possible solutions:
│
│  1. Kill the existing process:
│     lsof -ti:{} | xargs kill -9
│
│  2. Use a different port:
│     PROMPTGATE_PORT={}
│
│  3. Check what's using it:
│     lsof -i:{}
└─────────────────────────────────────────────────────────────────┘
"#,
                port,
                port,
                port + 1,
                port
            );
            GatewayError::config(message)
        } else if error_str.contains("Permission denied") || error_str.contains("os error 13") {
            let message = format!(
                r#"
┌─────────────────────────────────────────────────────────────────┐
│  ❌ Error: Permission denied for port {}
├─────────────────────────────────────────────────────────────────┤
│  Possible solutions:
│
│  1. Use a port >= 1024 (non-privileged):
│     PROMPTGATE_PORT=8000
│
│  2. Run with elevated privileges (not recommended):
│     sudo ./gateway
└─────────────────────────────────────────────────────────────────┘
"#,
                port
            );
            GatewayError::config(message)
        } else {
            GatewayError::config(format!("Failed to bind to {}: {}", bind_addr, error))
        }
    }
}
