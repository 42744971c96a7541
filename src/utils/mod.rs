//! Utility modules for the gateway
//!
//! - **error**: error types and their HTTP representations
//! - **logging**: log redaction helpers

pub mod error;
pub mod logging;

pub use error::{GatewayError, Result};
pub use logging::{mask_key, sanitize_for_logging};
