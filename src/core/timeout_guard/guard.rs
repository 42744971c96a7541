//! Deadline enforcement around async operations

use super::types::{CancelSignal, InFlightCall};
use crate::utils::error::{GatewayError, Result};
use dashmap::DashMap;
use std::future::Future;
use std::time::{Duration, Instant};
use tokio::sync::watch;
use tracing::warn;
use uuid::Uuid;

/// Races guarded operations against a hard deadline.
///
/// Every call is tracked in a registry keyed by a generated id for exactly
/// as long as it runs; the record is removed on success, error, and
/// timeout alike, so the registry never outgrows the number of in-flight
/// calls.
pub struct TimeoutGuard {
    in_flight: DashMap<Uuid, InFlightCall>,
}

/// Removes the tracking record when the guarded call leaves scope,
/// whichever way it exits
struct TrackingGuard<'a> {
    registry: &'a DashMap<Uuid, InFlightCall>,
    id: Uuid,
}

impl Drop for TrackingGuard<'_> {
    fn drop(&mut self) {
        self.registry.remove(&self.id);
    }
}

impl TimeoutGuard {
    pub fn new() -> Self {
        Self {
            in_flight: DashMap::new(),
        }
    }

    /// Run the operation built by `f` under `timeout`.
    ///
    /// The closure receives a [`CancelSignal`] that fires if the deadline
    /// is reached first. Whichever side settles first wins; the loser is
    /// dropped. On deadline the signal is sent before the error returns,
    /// so work the operation spawned can stop cooperatively.
    pub async fn with_timeout<T, F, Fut>(&self, operation: &str, timeout: Duration, f: F) -> Result<T>
    where
        F: FnOnce(CancelSignal) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let id = Uuid::new_v4();
        let (cancel_tx, cancel_rx) = watch::channel(false);

        self.in_flight.insert(
            id,
            InFlightCall {
                operation: operation.to_string(),
                started_at: Instant::now(),
                cancel: cancel_tx,
            },
        );
        let _tracking = TrackingGuard {
            registry: &self.in_flight,
            id,
        };

        let operation_future = f(CancelSignal::new(cancel_rx));
        tokio::pin!(operation_future);

        tokio::select! {
            result = &mut operation_future => result,
            _ = tokio::time::sleep(timeout) => {
                if let Some(call) = self.in_flight.get(&id) {
                    let _ = call.cancel.send(true);
                    warn!(
                        operation = %call.operation,
                        elapsed_ms = call.started_at.elapsed().as_millis() as u64,
                        timeout_ms = timeout.as_millis() as u64,
                        "operation deadline exceeded"
                    );
                }
                Err(GatewayError::timeout(operation, timeout.as_millis() as u64))
            }
        }
        // _tracking drops here, removing the record on every exit path
    }

    /// Number of guarded calls currently running
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }
}

impl Default for TimeoutGuard {
    fn default() -> Self {
        Self::new()
    }
}

/// Race a single external future against a deadline, without tracking or
/// cancellation plumbing. For wrapping one outbound call site where the
/// future is simply dropped on timeout.
pub async fn with_external_timeout<T>(
    operation: &str,
    timeout: Duration,
    future: impl Future<Output = Result<T>>,
) -> Result<T> {
    match tokio::time::timeout(timeout, future).await {
        Ok(result) => result,
        Err(_) => Err(GatewayError::timeout(operation, timeout.as_millis() as u64)),
    }
}
