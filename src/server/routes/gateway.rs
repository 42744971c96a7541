//! Gateway API endpoints

use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::models::PromptRequest;
use crate::core::providers::ProviderKind;
use crate::core::rate_limiter::RateLimits;
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::storage::WorkspaceCredential;
use crate::utils::error::{GatewayError, Result};
use crate::utils::logging::mask_key;

/// Body of `POST /v1/prompts/generate`
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratePromptBody {
    /// Target workspace
    pub workspace_id: String,
    /// The prompt request forwarded to the provider
    #[serde(flatten)]
    pub request: PromptRequest,
}

/// Body of `POST /v1/workspaces`
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterWorkspaceBody {
    /// Workspace identifier
    pub workspace_id: String,
    /// Provider the key belongs to
    #[serde(default)]
    pub provider: ProviderKind,
    /// Provider API key, plaintext or an already-encrypted blob
    pub api_key: String,
    /// Optional per-workspace admission limits
    #[serde(default)]
    pub limits: Option<RateLimits>,
}

/// Payload returned after a successful registration
#[derive(Debug, Clone, Serialize)]
pub struct WorkspaceRegistered {
    pub workspace_id: String,
    pub provider: ProviderKind,
    /// Masked rendering of the submitted key; the full key is never echoed
    pub api_key_preview: String,
}

/// Configure gateway API routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/v1")
            // Prompt generation through the protective gateway
            .route("/prompts/generate", web::post().to(generate_prompt))
            // Workspace credential registration
            .route("/workspaces", web::post().to(register_workspace))
            // Cache management
            .route("/cache/stats", web::get().to(cache_stats))
            .route("/cache", web::delete().to(clear_cache)),
    );
}

/// Handle `POST /v1/prompts/generate`
///
/// The provider response body is returned unmodified; gateway verdicts
/// travel in the `X-RateLimit-*` and `X-Cache` headers.
pub async fn generate_prompt(
    state: web::Data<AppState>,
    body: web::Json<GeneratePromptBody>,
) -> Result<HttpResponse> {
    let body = body.into_inner();

    let credential = state
        .workspaces
        .get(&body.workspace_id)
        .await?
        .ok_or_else(|| {
            GatewayError::not_found(format!(
                "workspace '{}' is not registered",
                body.workspace_id
            ))
        })?;

    let outcome = state
        .gateway
        .generate_prompt(&credential, &body.request)
        .await?;

    let admission = &outcome.admission;
    Ok(HttpResponse::Ok()
        .insert_header(("X-RateLimit-Limit", admission.header_limit().to_string()))
        .insert_header((
            "X-RateLimit-Remaining",
            admission.header_remaining().to_string(),
        ))
        .insert_header(("X-RateLimit-Reset", admission.header_reset().to_string()))
        .insert_header(("X-Cache", if outcome.cache_hit { "hit" } else { "miss" }))
        .json(outcome.response))
}

/// Handle `POST /v1/workspaces`
pub async fn register_workspace(
    state: web::Data<AppState>,
    body: web::Json<RegisterWorkspaceBody>,
) -> Result<HttpResponse> {
    let body = body.into_inner();

    if body.workspace_id.trim().is_empty() {
        return Err(GatewayError::validation("workspace_id must not be empty"));
    }
    if body.api_key.is_empty() {
        return Err(GatewayError::validation("api_key must not be empty"));
    }

    let vault = state.gateway.vault();
    // Values that already look encrypted are stored unchanged, so records
    // exported from another deployment can be re-imported as-is
    let encrypted_api_key = if vault.is_encrypted_api_key(&body.api_key) {
        body.api_key.clone()
    } else {
        vault.encrypt_api_key(&body.api_key)?
    };

    state
        .workspaces
        .upsert(WorkspaceCredential {
            workspace_id: body.workspace_id.clone(),
            provider: body.provider,
            encrypted_api_key,
            limits: body.limits,
        })
        .await?;

    info!(
        workspace_id = %body.workspace_id,
        provider = %body.provider,
        api_key = %mask_key(&body.api_key),
        "workspace registered"
    );

    Ok(
        HttpResponse::Created().json(ApiResponse::success(WorkspaceRegistered {
            workspace_id: body.workspace_id,
            provider: body.provider,
            api_key_preview: mask_key(&body.api_key),
        })),
    )
}

/// Handle `GET /v1/cache/stats`
pub async fn cache_stats(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::success(state.gateway.cache_stats()))
}

/// Handle `DELETE /v1/cache`
pub async fn clear_cache(state: web::Data<AppState>) -> HttpResponse {
    state.gateway.clear_cache();
    info!("response cache cleared");
    HttpResponse::Ok().json(ApiResponse::success(serde_json::json!({
        "cleared": true
    })))
}
