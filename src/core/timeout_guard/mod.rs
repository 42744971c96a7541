//! Deadlines and cooperative cancellation
//!
//! Two flavors of protection: [`TimeoutGuard::with_timeout`] tracks the
//! call in a registry and hands the operation a [`CancelSignal`], used for
//! the end-to-end request deadline; [`with_external_timeout`] is the bare
//! race used around a single outbound call. Both map a missed deadline to
//! the same timeout error carrying the operation label and budget.

mod guard;
mod types;


pub use guard::{TimeoutGuard, with_external_timeout};
pub use types::CancelSignal;
