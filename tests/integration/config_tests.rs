//! Configuration loading across sources
//!
//! Unit tests inside `src/config` cover parsing and validation in
//! isolation; these verify the pieces a deployment actually touches: the
//! shipped example file, environment overrides, and merge precedence.

use std::io::Write;

use promptgate::Config;
use tempfile::NamedTempFile;

#[tokio::test]
async fn test_shipped_example_config_loads() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config/gateway.example.yaml");

    let config = Config::from_file(path).await.expect("example file loads");

    // The example documents the defaults, so loading it changes nothing
    assert_eq!(config.server().port, 8000);
    assert_eq!(config.rate_limit().minute_limit, 10);
    assert_eq!(config.cache().ttl_secs, 3600);
    assert_eq!(
        config.vault().secret_env,
        "PROMPTGATE_ENCRYPTION_SECRET"
    );
    assert!(config.timeouts().provider_timeout_ms <= config.timeouts().request_timeout_ms);
}

#[tokio::test]
async fn test_env_overrides_take_precedence_over_file() {
    let config_content = r#"
server:
  host: "127.0.0.1"
  port: 9001
"#;
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(config_content.as_bytes()).unwrap();

    // Mutating the process environment: keep every env assertion in this
    // one test so parallel tests never race on the same variables
    unsafe {
        std::env::set_var("PROMPTGATE_PORT", "9002");
        std::env::set_var("PROMPTGATE_PROVIDER_BASE_URL", "http://127.0.0.1:9999");
    }

    let from_file = Config::from_file(temp_file.path()).await.unwrap();
    let from_env = Config::from_env().unwrap();
    let merged = from_file.merge(from_env);

    unsafe {
        std::env::remove_var("PROMPTGATE_PORT");
        std::env::remove_var("PROMPTGATE_PROVIDER_BASE_URL");
    }

    assert_eq!(merged.server().host, "127.0.0.1");
    assert_eq!(merged.server().port, 9002);
    assert_eq!(
        merged.provider().base_url.as_deref(),
        Some("http://127.0.0.1:9999")
    );
}

#[tokio::test]
async fn test_config_survives_yaml_round_trip() {
    let mut original = Config::default();
    original.gateway.server.port = 9100;
    original.gateway.rate_limit.minute_limit = 42;
    original.gateway.cache.enabled = false;

    let yaml = original.to_yaml().unwrap();
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(yaml.as_bytes()).unwrap();

    let reloaded = Config::from_file(temp_file.path()).await.unwrap();

    assert_eq!(reloaded.server().port, 9100);
    assert_eq!(reloaded.rate_limit().minute_limit, 42);
    assert!(!reloaded.cache().enabled);
}
