//! Gateway orchestration

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::types::GenerateOutcome;
use crate::config::{Config, RateLimitConfig, TimeoutConfig};
use crate::core::credential_vault::CredentialVault;
use crate::core::models::PromptRequest;
use crate::core::providers::{HttpPromptProvider, PromptProvider, ProviderKind};
use crate::core::rate_limiter::{AdmissionDecision, RateLimiter, RateLimits, now_unix};
use crate::core::response_cache::{CacheStats, ResponseCache};
use crate::core::timeout_guard::{CancelSignal, TimeoutGuard, with_external_timeout};
use crate::storage::WorkspaceCredential;
use crate::utils::error::{GatewayError, Result};

/// Protective gateway in front of the upstream prompt provider.
///
/// Each generate-prompt call runs under a whole-request deadline and passes
/// through admission control, the response cache, and the credential vault
/// before the provider is invoked. All state is owned here; construct one
/// gateway and share it behind an `Arc`.
pub struct PromptGateway {
    limiter: RateLimiter,
    cache: ResponseCache,
    vault: CredentialVault,
    guard: TimeoutGuard,
    provider: Arc<dyn PromptProvider>,
    rate_limit: RateLimitConfig,
    cache_enabled: bool,
    timeouts: TimeoutConfig,
}

impl PromptGateway {
    /// Create a gateway with an explicit vault and provider
    pub fn new(
        config: &Config,
        vault: CredentialVault,
        provider: Arc<dyn PromptProvider>,
    ) -> Result<Self> {
        let cache_config = config.cache();
        let cache = ResponseCache::new(
            cache_config.max_size,
            Duration::from_secs(cache_config.ttl_secs),
        )?;

        info!(
            provider = %provider.kind(),
            rate_limiting = config.rate_limit().enabled,
            caching = cache_config.enabled,
            "gateway initialized"
        );

        Ok(Self {
            limiter: RateLimiter::new(),
            cache,
            vault,
            guard: TimeoutGuard::new(),
            provider,
            rate_limit: config.rate_limit().clone(),
            cache_enabled: cache_config.enabled,
            timeouts: config.timeouts().clone(),
        })
    }

    /// Create a gateway from configuration alone: the vault secret comes
    /// from the configured environment variable and the provider is the
    /// HTTP client for the configured upstream.
    pub fn from_config(config: &Config) -> Result<Self> {
        let vault = CredentialVault::from_env(&config.vault().secret_env)?;
        let provider = HttpPromptProvider::new(config.provider(), config.timeouts())?;
        Self::new(config, vault, Arc::new(provider))
    }

    /// Handle one generate-prompt request end to end.
    ///
    /// Flow: admission check (quota consumed before dispatch) → cache probe
    /// (a hit returns immediately, without refunding quota) → credential
    /// decryption → provider call under the upstream deadline → cache write
    /// for eligible responses. The whole flow runs under the whole-request
    /// deadline with cooperative cancellation.
    pub async fn generate_prompt(
        &self,
        credential: &WorkspaceCredential,
        request: &PromptRequest,
    ) -> Result<GenerateOutcome> {
        request.validate()?;

        if credential.provider != self.provider.kind() {
            return Err(GatewayError::validation(format!(
                "workspace '{}' is registered for {} but this gateway speaks {}",
                credential.workspace_id,
                credential.provider,
                self.provider.kind()
            )));
        }

        self.guard
            .with_timeout(
                "generate_prompt",
                self.timeouts.request_timeout(),
                |cancel| self.execute(credential, request, cancel),
            )
            .await
    }

    async fn execute(
        &self,
        credential: &WorkspaceCredential,
        request: &PromptRequest,
        cancel: CancelSignal,
    ) -> Result<GenerateOutcome> {
        let limits = self.effective_limits(credential);

        let admission = if self.rate_limit.enabled {
            self.limiter
                .check_and_record(&credential.workspace_id, &limits)
        } else {
            AdmissionDecision::allow_all(limits, now_unix())
        };

        if !admission.allowed {
            warn!(
                workspace_id = %credential.workspace_id,
                retry_after_secs = admission.retry_after_secs,
                "admission denied"
            );
            return Err(GatewayError::rate_limit_exceeded(
                admission.header_limit(),
                admission.header_remaining(),
                admission.header_reset(),
                admission.retry_after_secs.unwrap_or(1),
            ));
        }

        if self.cache_enabled {
            if let Some(response) =
                self.cache
                    .get(self.provider.kind(), &credential.workspace_id, request)
            {
                debug!(workspace_id = %credential.workspace_id, "serving cached response");
                return Ok(GenerateOutcome {
                    response,
                    admission,
                    cache_hit: true,
                });
            }
        }

        // Plaintext key exists only for the duration of the provider call
        let api_key = self.vault.decrypt_api_key(&credential.encrypted_api_key)?;

        let response = with_external_timeout(
            "provider_call",
            self.timeouts.provider_timeout(),
            async {
                self.provider
                    .generate(request, &api_key, cancel)
                    .await
                    .map_err(GatewayError::from)
            },
        )
        .await?;
        drop(api_key);

        if self.cache_enabled {
            self.cache
                .set(self.provider.kind(), &credential.workspace_id, request, &response);
        }

        Ok(GenerateOutcome {
            response,
            admission,
            cache_hit: false,
        })
    }

    fn effective_limits(&self, credential: &WorkspaceCredential) -> RateLimits {
        credential.limits.unwrap_or_else(|| {
            RateLimits::new(
                self.rate_limit.minute_limit,
                self.rate_limit.hour_limit,
                self.rate_limit.day_limit,
            )
        })
    }

    /// Spawn a background task sweeping idle limiter keys and expired
    /// cache entries.
    pub fn start_maintenance_task(self: &Arc<Self>, period: Duration) -> JoinHandle<()> {
        let gateway = Arc::clone(self);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            loop {
                interval.tick().await;
                let pruned = gateway.limiter.prune_idle();
                let purged = gateway.cache.purge_expired();
                if pruned > 0 || purged > 0 {
                    debug!(
                        pruned_keys = pruned,
                        purged_entries = purged,
                        "maintenance sweep"
                    );
                }
            }
        })
    }

    /// Cache statistics snapshot
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Drop every cached response
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Vault used for credential encryption
    pub fn vault(&self) -> &CredentialVault {
        &self.vault
    }

    /// Kind of the configured upstream provider
    pub fn provider_kind(&self) -> ProviderKind {
        self.provider.kind()
    }

    /// Number of calls currently tracked by the timeout guard
    pub fn in_flight(&self) -> usize {
        self.guard.in_flight()
    }
}
