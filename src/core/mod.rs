//! Core functionality for the gateway
//!
//! The four protective components and the gateway value composing them,
//! plus the domain models and provider clients they operate on.

pub mod credential_vault;
pub mod gateway;
pub mod models;
pub mod providers;
pub mod rate_limiter;
pub mod response_cache;
pub mod timeout_guard;
