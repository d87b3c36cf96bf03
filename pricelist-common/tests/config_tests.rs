//! Tests for configuration loading and resolution
//!
//! Covers:
//! - TOML config file parsing
//! - Missing config file falls back to defaults
//! - Override priority (command line / env over file over defaults)
//! - Missing upstream credentials are rejected

use pricelist_common::config::{ConfigOverrides, ServiceConfig, TomlConfig, DEFAULT_PORT};
use pricelist_common::{Error, VisibilityFilter};
use std::io::Write;
use std::net::IpAddr;
use std::time::Duration;
use tempfile::NamedTempFile;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Should create temp file");
    file.write_all(content.as_bytes()).expect("Should write config");
    file
}

fn credentials() -> ConfigOverrides {
    ConfigOverrides {
        url: Some("https://upstream.example/v1/price-list".to_string()),
        username: Some("user".to_string()),
        api_key: Some("key".to_string()),
        ..Default::default()
    }
}

#[test]
fn test_load_full_config_file() {
    let file = write_config(
        r#"
port = 8080
bind = "127.0.0.1"

[upstream]
url = "https://upstream.example/v1/price-list"
username = "user"
api_key = "key"
timeout_secs = 20

[visibility]
hidden_prefixes = ["TES"]
hidden_keywords = ["promo"]
"#,
    );

    let toml = TomlConfig::load(file.path()).expect("Should parse config");
    let config = ServiceConfig::resolve(ConfigOverrides::default(), toml).expect("Should resolve");

    assert_eq!(config.port, 8080);
    assert_eq!(config.bind, "127.0.0.1".parse::<IpAddr>().unwrap());
    assert_eq!(config.upstream.username, "user");
    assert_eq!(config.upstream.timeout, Duration::from_secs(20));
    assert_eq!(config.visibility.hidden_prefixes, vec!["TES".to_string()]);
    assert_eq!(config.visibility.hidden_keywords, vec!["promo".to_string()]);
    assert!(config.visibility.hidden_codes.is_empty());
}

#[test]
fn test_missing_config_file_uses_defaults() {
    let dir = tempfile::tempdir().expect("Should create temp dir");
    let toml = TomlConfig::load_optional(&dir.path().join("absent.toml")).expect("Should default");

    let config = ServiceConfig::resolve(credentials(), toml).expect("Should resolve");
    assert_eq!(config.port, DEFAULT_PORT);
    assert_eq!(config.upstream.timeout, Duration::from_secs(10));
    assert_eq!(config.visibility, VisibilityFilter::default());
}

#[test]
fn test_overrides_take_priority_over_file() {
    let file = write_config(
        r#"
port = 8080
[upstream]
url = "https://file.example"
username = "file-user"
api_key = "file-key"
"#,
    );
    let toml = TomlConfig::load(file.path()).unwrap();
    let overrides = ConfigOverrides {
        port: Some(9000),
        username: Some("cli-user".to_string()),
        ..Default::default()
    };

    let config = ServiceConfig::resolve(overrides, toml).unwrap();
    assert_eq!(config.port, 9000);
    assert_eq!(config.upstream.username, "cli-user");
    assert_eq!(config.upstream.api_key, "file-key");
    assert_eq!(config.upstream.url, "https://file.example");
}

#[test]
fn test_missing_credentials_rejected() {
    let overrides = ConfigOverrides {
        url: Some("https://upstream.example".to_string()),
        username: Some("   ".to_string()),
        ..Default::default()
    };

    match ServiceConfig::resolve(overrides, TomlConfig::default()) {
        Err(Error::Config(msg)) => {
            assert!(msg.contains("username"), "unexpected message: {msg}");
            assert!(msg.contains("API key"), "unexpected message: {msg}");
            assert!(!msg.contains("URL"), "unexpected message: {msg}");
        }
        other => panic!("Expected configuration error, got {:?}", other),
    }
}

#[test]
fn test_zero_timeout_rejected() {
    let overrides = ConfigOverrides {
        timeout_secs: Some(0),
        ..credentials()
    };
    assert!(matches!(
        ServiceConfig::resolve(overrides, TomlConfig::default()),
        Err(Error::Config(_))
    ));
}

#[test]
fn test_malformed_config_file_is_error() {
    let file = write_config("port = \"not a number\"");
    assert!(matches!(TomlConfig::load(file.path()), Err(Error::Toml(_))));
}
