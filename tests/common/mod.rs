//! Common test utilities shared across the integration suite

pub mod fixtures;
