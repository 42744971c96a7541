//! Timeout guard types

use std::time::Instant;
use tokio::sync::watch;

/// Cooperative cancellation signal handed to guarded operations.
///
/// Nothing is ever forcibly stopped: the guard drops the losing future,
/// and anything the operation spawned must observe this signal to stop
/// doing work whose result nobody will read.
#[derive(Debug, Clone)]
pub struct CancelSignal {
    receiver: watch::Receiver<bool>,
}

impl CancelSignal {
    pub(super) fn new(receiver: watch::Receiver<bool>) -> Self {
        Self { receiver }
    }

    /// A signal that never fires, for call sites outside any deadline
    pub fn never() -> Self {
        let (_sender, receiver) = watch::channel(false);
        Self { receiver }
    }

    /// True once the deadline has fired
    pub fn is_cancelled(&self) -> bool {
        *self.receiver.borrow()
    }

    /// Resolve when cancellation fires. Pends forever if the guarded call
    /// already settled without cancelling.
    pub async fn cancelled(&mut self) {
        loop {
            if *self.receiver.borrow_and_update() {
                return;
            }
            if self.receiver.changed().await.is_err() {
                // Sender gone: cancellation can no longer fire
                std::future::pending::<()>().await;
            }
        }
    }
}

/// Registry record for one guarded call, alive for exactly its duration
#[derive(Debug)]
pub(super) struct InFlightCall {
    /// Label reported in timeout errors and logs
    pub(super) operation: String,
    /// When the guarded call started
    pub(super) started_at: Instant,
    /// Handle used to signal cancellation on deadline
    pub(super) cancel: watch::Sender<bool>,
}
