use std::collections::HashMap;
use std::io::Write;
use task_server::config::{Config, LogFormat};
use tempfile::NamedTempFile;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_configuration_loading() {
    let config = Config::load(None, &HashMap::new()).unwrap();
    assert!(config.validate().is_ok());
    assert_eq!(config.server.listen_addr, "0.0.0.0");
    assert_eq!(config.server.port, 3000);
    assert_eq!(config.database.host, "localhost");
    assert_eq!(config.database.name, "tasks_db");
}

#[test]
fn test_partial_file_keeps_defaults() {
    let file = write_config(
        r#"
[database]
host = "mysql.local"
name = "staging_tasks"

[logging]
format = "json"
"#,
    );

    let config = Config::load(Some(file.path()), &HashMap::new()).unwrap();

    assert_eq!(config.database.host, "mysql.local");
    assert_eq!(config.database.name, "staging_tasks");
    assert_eq!(config.database.port, 3306);
    assert_eq!(config.database.max_connections, 10);
    assert_eq!(config.logging.format, LogFormat::Json);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_layer_precedence() {
    let file = write_config(
        r#"
[server]
port = 4000
listen_addr = "127.0.0.1"

[database]
user = "from_file"
"#,
    );

    let config = Config::load(
        Some(file.path()),
        &vars(&[
            ("TASKS_SERVER__PORT", "4500"),
            ("TASKS_DATABASE__USER", "from_prefixed"),
            ("DB_USER", "from_plain"),
        ]),
    )
    .unwrap();

    // File beats defaults, prefixed beats file, plain beats prefixed
    assert_eq!(config.server.listen_addr, "127.0.0.1");
    assert_eq!(config.server.port, 4500);
    assert_eq!(config.database.user, "from_plain");
}

#[test]
fn test_missing_config_file_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");
    assert!(Config::load(Some(&path), &HashMap::new()).is_err());
}

#[test]
fn test_malformed_config_file_is_error() {
    let file = write_config("[server]\nport = \"not a number\"\n");
    assert!(Config::load(Some(file.path()), &HashMap::new()).is_err());
}

#[test]
fn test_file_with_invalid_values_fails_validation() {
    let file = write_config(
        r#"
[database]
name = "bad-name"
max_connections = 0
"#,
    );

    let config = Config::load(Some(file.path()), &HashMap::new()).unwrap();
    assert!(config.validate().is_err());
}

#[test]
fn test_startup_log_never_contains_password() {
    let config = Config::load(None, &vars(&[("DB_PASSWORD", "p@ss w0rd")])).unwrap();
    assert_eq!(config.database.password, "p@ss w0rd");
    assert!(!config.redacted_database_url().contains("p@ss"));
}
