//! HTTP server implementation
//!
//! Thin boundary over the gateway: routing, request parsing, and the
//! response shapes callers see.

pub mod builder;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod state;
mod utils;

pub use builder::{ServerBuilder, run_server};
pub use server::HttpServer;
pub use state::AppState;
