//! Integration tests
//!
//! Each module drives a slice of the system against real collaborators:
//! wiremock stands in for the upstream provider, and the actix test
//! harness exercises the HTTP boundary.

mod config_tests;
mod gateway_flow_tests;
mod provider_client_tests;
