//! HTTP response handling for errors

use super::types::GatewayError;
use crate::core::providers::ProviderError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

impl GatewayError {
    fn response_parts(&self) -> (StatusCode, &'static str, String, Option<String>) {
        match self {
            GatewayError::Config(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "CONFIG_ERROR",
                self.to_string(),
                None,
            ),
            GatewayError::Validation(_) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                self.to_string(),
                None,
            ),
            GatewayError::RateLimitExceeded { .. } => (
                StatusCode::TOO_MANY_REQUESTS,
                "RATE_LIMIT_EXCEEDED",
                "Rate limit exceeded. Please try again later.".to_string(),
                None,
            ),
            GatewayError::Timeout { .. } => (
                StatusCode::REQUEST_TIMEOUT,
                "REQUEST_TIMEOUT",
                "The request took too long to process".to_string(),
                Some("Reduce prompt complexity or retry with a longer timeout".to_string()),
            ),
            GatewayError::Decryption(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "CREDENTIAL_ERROR",
                "Stored provider credential could not be decrypted".to_string(),
                Some("Re-save the provider API key for this workspace".to_string()),
            ),
            GatewayError::Crypto(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "CRYPTO_ERROR",
                "A cryptographic operation failed".to_string(),
                None,
            ),
            GatewayError::Provider(provider_error) => match provider_error {
                ProviderError::Authentication { .. } => (
                    StatusCode::BAD_GATEWAY,
                    "PROVIDER_AUTH_ERROR",
                    provider_error.to_string(),
                    Some("Verify the provider API key stored for this workspace".to_string()),
                ),
                ProviderError::RateLimited { .. } => (
                    StatusCode::TOO_MANY_REQUESTS,
                    "PROVIDER_RATE_LIMIT",
                    provider_error.to_string(),
                    None,
                ),
                ProviderError::Network { .. } => (
                    StatusCode::BAD_GATEWAY,
                    "PROVIDER_UNREACHABLE",
                    "Failed to reach the upstream provider".to_string(),
                    None,
                ),
                ProviderError::Cancelled { .. } => (
                    StatusCode::REQUEST_TIMEOUT,
                    "REQUEST_CANCELLED",
                    provider_error.to_string(),
                    None,
                ),
                _ => (
                    StatusCode::BAD_GATEWAY,
                    "PROVIDER_ERROR",
                    provider_error.to_string(),
                    None,
                ),
            },
            GatewayError::NotFound(_) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                self.to_string(),
                None,
            ),
            GatewayError::HttpClient(_) => (
                StatusCode::BAD_GATEWAY,
                "UPSTREAM_ERROR",
                "Upstream request failed".to_string(),
                None,
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
                None,
            ),
        }
    }
}

impl ResponseError for GatewayError {
    fn status_code(&self) -> StatusCode {
        self.response_parts().0
    }

    fn error_response(&self) -> HttpResponse {
        let (status_code, error_code, message, suggestion) = self.response_parts();
        let mut builder = HttpResponse::build(status_code);

        let mut retry_after_secs = None;
        let mut timeout_ms = None;

        match self {
            GatewayError::RateLimitExceeded {
                limit,
                remaining,
                reset_at,
                retry_after_secs: retry_after,
            } => {
                builder
                    .insert_header(("X-RateLimit-Limit", limit.to_string()))
                    .insert_header(("X-RateLimit-Remaining", remaining.to_string()))
                    .insert_header(("X-RateLimit-Reset", reset_at.to_string()))
                    .insert_header(("Retry-After", retry_after.to_string()));
                retry_after_secs = Some(*retry_after);
            }
            GatewayError::Timeout {
                timeout_ms: deadline,
                ..
            } => {
                timeout_ms = Some(*deadline);
            }
            GatewayError::Provider(ProviderError::RateLimited {
                retry_after_secs: Some(retry_after),
                ..
            }) => {
                builder.insert_header(("Retry-After", retry_after.to_string()));
                retry_after_secs = Some(*retry_after);
            }
            _ => {}
        }

        builder.json(ErrorResponse {
            error: ErrorDetail {
                code: error_code.to_string(),
                message,
                suggestion,
                retry_after_secs,
                timeout_ms,
                timestamp: chrono::Utc::now().timestamp(),
            },
        })
    }
}

/// Standard error response format
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail structure
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_after_secs: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
    pub timestamp: i64,
}
