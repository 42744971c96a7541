//! Per-workspace admission control
//!
//! Requests are counted against fixed minute, hour, and day windows that
//! tile the timeline (`window_start = now - now % len`). Quota is consumed
//! before dispatch and never refunded, so cancelled or failed calls still
//! count against the caller. Checking and consuming happen under a single
//! entry guard per key; a burst of concurrent requests cannot all squeeze
//! through the last slot of a window.
//!
//! The limiter is plain shared state with no background machinery of its
//! own. Callers that want idle keys dropped run [`RateLimiter::prune_idle`]
//! on whatever cadence suits them.

mod limiter;
mod types;
mod utils;

#[cfg(test)]
mod tests;

pub use limiter::RateLimiter;
pub use types::{AdmissionDecision, Horizon, PerWindow, RateLimits};

pub(crate) use utils::now_unix;
