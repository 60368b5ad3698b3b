//! Integration tests for environment configuration.

use knockout_bracket::config::ServerConfig;
use std::collections::HashMap;
use std::time::Duration;

fn from_pairs(pairs: &[(&str, &str)]) -> ServerConfig {
    let env: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    ServerConfig::from_lookup(|key| env.get(key).cloned())
}

#[test]
fn defaults_when_unset() {
    let config = from_pairs(&[]);
    assert_eq!(config, ServerConfig::default());
    assert_eq!(config.host, "0.0.0.0");
    assert_eq!(config.port, 8080);
    assert_eq!(config.write_batch_size, 500);
    assert_eq!(config.inactivity_timeout, Duration::from_secs(12 * 3600));
}

#[test]
fn values_are_read() {
    let config = from_pairs(&[
        ("HOST", "127.0.0.1"),
        ("PORT", "9000"),
        ("MATCH_WRITE_BATCH_SIZE", "100"),
        ("INACTIVITY_HOURS", "1"),
    ]);
    assert_eq!(config.host, "127.0.0.1");
    assert_eq!(config.port, 9000);
    assert_eq!(config.write_batch_size, 100);
    assert_eq!(config.inactivity_timeout, Duration::from_secs(3600));
}

#[test]
fn bad_values_fall_back() {
    let config = from_pairs(&[("PORT", "eighty"), ("MATCH_WRITE_BATCH_SIZE", "0")]);
    assert_eq!(config.port, 8080);
    assert_eq!(config.write_batch_size, 500);
}
