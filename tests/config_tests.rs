// Config loading and validation tests

use sysmon_https::config::{AppConfig, MAX_CONNECTIONS_LIMIT};

const VALID_CONFIG: &str = r#"
[server]
document_root = "/srv/www"
max_connections = 64
handshake_timeout_secs = 5
idle_timeout_secs = 15

[tls]
ca_file = "/etc/sysmon/ca.pem"
require_client_auth = true

[counters]
proc_root = "/host/proc"
disk_mount = "/data"
"#;

#[test]
fn test_config_loads_from_str() {
    let config = AppConfig::load_from_str(VALID_CONFIG).expect("load_from_str");
    assert_eq!(config.server.document_root, "/srv/www");
    assert_eq!(config.server.max_connections, 64);
    assert_eq!(config.server.handshake_timeout_secs, 5);
    assert_eq!(config.server.idle_timeout_secs, 15);
    assert_eq!(config.tls.ca_file, "/etc/sysmon/ca.pem");
    assert!(config.tls.require_client_auth);
    assert_eq!(config.counters.proc_root, "/host/proc");
    assert_eq!(config.counters.disk_mount, "/data");
}

#[test]
fn test_config_defaults_when_empty() {
    let config = AppConfig::load_from_str("").expect("empty config is valid");
    assert_eq!(config.server.document_root, "www");
    assert_eq!(config.server.max_connections, 256);
    assert_eq!(config.server.handshake_timeout_secs, 10);
    assert_eq!(config.server.idle_timeout_secs, 30);
    assert_eq!(config.tls.ca_file, "ca.pem");
    assert!(!config.tls.require_client_auth);
    assert_eq!(config.counters.proc_root, "/proc");
    assert_eq!(config.counters.disk_mount, "/");
}

#[test]
fn test_config_partial_section_keeps_other_defaults() {
    let config = AppConfig::load_from_str("[server]\nmax_connections = 4\n").unwrap();
    assert_eq!(config.server.max_connections, 4);
    assert_eq!(config.server.document_root, "www");
    assert_eq!(config.tls.ca_file, "ca.pem");
}

#[test]
fn test_config_validation_rejects_zero_max_connections() {
    let bad = VALID_CONFIG.replace("max_connections = 64", "max_connections = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("server.max_connections"));
}

#[test]
fn test_config_validation_rejects_oversized_max_connections() {
    let bad = VALID_CONFIG.replace(
        "max_connections = 64",
        "max_connections = 9223372036854775807",
    );
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("server.max_connections must be <="));
}

#[test]
fn test_config_accepts_max_connections_at_limit() {
    let at_limit = VALID_CONFIG.replace(
        "max_connections = 64",
        &format!("max_connections = {}", MAX_CONNECTIONS_LIMIT),
    );
    let config = AppConfig::load_from_str(&at_limit).unwrap();
    assert_eq!(config.server.max_connections, MAX_CONNECTIONS_LIMIT);
}

#[test]
fn test_config_validation_rejects_zero_idle_timeout() {
    let bad = VALID_CONFIG.replace("idle_timeout_secs = 15", "idle_timeout_secs = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("server.idle_timeout_secs"));
}

#[test]
fn test_config_validation_rejects_zero_handshake_timeout() {
    let bad = VALID_CONFIG.replace("handshake_timeout_secs = 5", "handshake_timeout_secs = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("handshake_timeout_secs"));
}

#[test]
fn test_config_validation_rejects_empty_document_root() {
    let bad = VALID_CONFIG.replace("document_root = \"/srv/www\"", "document_root = \"\"");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("server.document_root"));
}

#[test]
fn test_config_validation_rejects_empty_ca_file() {
    let bad = VALID_CONFIG.replace("ca_file = \"/etc/sysmon/ca.pem\"", "ca_file = \"\"");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("tls.ca_file"));
}

#[test]
fn test_config_validation_rejects_empty_proc_root() {
    let bad = VALID_CONFIG.replace("proc_root = \"/host/proc\"", "proc_root = \"\"");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("counters.proc_root"));
}

#[test]
fn test_config_rejects_wrong_type() {
    let bad = VALID_CONFIG.replace("max_connections = 64", "max_connections = \"lots\"");
    assert!(AppConfig::load_from_str(&bad).is_err());
}

#[test]
fn test_config_validation_rejects_invalid_toml() {
    let err = AppConfig::load_from_str("not valid toml [[[").unwrap_err();
    assert!(!err.to_string().is_empty());
}

#[test]
fn test_config_load_from_path() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, VALID_CONFIG).unwrap();
    let config = AppConfig::load_from_path(&path).expect("load from path");
    assert_eq!(config.server.max_connections, 64);
}

#[test]
fn test_config_load_from_missing_path_names_file() {
    let err = AppConfig::load_from_path(std::path::Path::new("/nonexistent/sysmon.toml"))
        .unwrap_err();
    assert!(err.to_string().contains("/nonexistent/sysmon.toml"));
}

#[test]
fn test_config_load_from_file_via_env() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, VALID_CONFIG).unwrap();
    unsafe { std::env::set_var("CONFIG_FILE", path.to_str().unwrap()) };
    let result = AppConfig::load();
    unsafe { std::env::remove_var("CONFIG_FILE") };
    let config = result.expect("load from CONFIG_FILE");
    assert_eq!(config.server.document_root, "/srv/www");
}
