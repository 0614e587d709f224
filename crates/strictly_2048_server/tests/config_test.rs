//! Tests for server configuration loading.

use std::io::Write;
use std::path::Path;
use strictly_2048_server::{ServerConfig, StorageBackend};
use tempfile::NamedTempFile;

#[test]
fn test_defaults() {
    let config = ServerConfig::default();
    assert_eq!(config.host(), "127.0.0.1");
    assert_eq!(*config.port(), 3000);
    assert_eq!(*config.storage(), StorageBackend::Sqlite);
    assert_eq!(config.db_path(), "strictly_2048.db");
    assert_eq!(config.bind_address(), "127.0.0.1:3000");
}

#[test]
fn test_partial_toml_keeps_defaults() {
    let config = ServerConfig::from_toml("port = 8080\nstorage = \"memory\"\n").expect("parse failed");
    assert_eq!(*config.port(), 8080);
    assert_eq!(*config.storage(), StorageBackend::Memory);
    assert_eq!(config.host(), "127.0.0.1");
}

#[test]
fn test_invalid_toml_is_an_error() {
    assert!(ServerConfig::from_toml("storage = \"floppy\"").is_err());
    assert!(ServerConfig::from_toml("port = \"eighty\"").is_err());
}

#[test]
fn test_load_from_file() {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    writeln!(file, "host = \"0.0.0.0\"\ndb_path = \"games.db\"").expect("write failed");

    let config = ServerConfig::load(Some(file.path())).expect("load failed");
    assert_eq!(config.host(), "0.0.0.0");
    assert_eq!(config.db_path(), "games.db");
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let config = ServerConfig::load(Some(Path::new("/nonexistent/strictly_2048.toml")))
        .expect("load failed");
    assert_eq!(config, ServerConfig::default());
}

#[test]
fn test_overrides_win() {
    let config = ServerConfig::default().with_overrides(
        Some("localhost".to_string()),
        Some(9000),
        Some(StorageBackend::Memory),
        None,
    );
    assert_eq!(config.bind_address(), "localhost:9000");
    assert_eq!(*config.storage(), StorageBackend::Memory);
    assert_eq!(config.db_path(), "strictly_2048.db");
}
