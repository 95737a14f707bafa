use postal_common::observability::LogFormat;
use postal_config::PostalConfigLoader;
use serial_test::serial;
use std::{fs, path::PathBuf};
use tempfile::TempDir;

/// Helper to write a YAML file in a temp dir and return its path.
fn write_yaml(tmp: &TempDir, name: &str, yaml: &str) -> PathBuf {
    let p = tmp.path().join(name);
    fs::write(&p, yaml).expect("write yaml");
    p
}

#[test]
#[serial]
fn file_values_and_env_overrides_merge() {
    let tmp = TempDir::new().unwrap();
    let file_yaml = r#"
engine:
  window_size: 12
tables:
  file: "${POSTAL_TEST_TABLES_DIR}/tables.yaml"
http:
  timeout_secs: 30
  retries: 0
logging:
  format: json
"#;
    let p = write_yaml(&tmp, "postal.yaml", file_yaml);

    temp_env::with_vars(
        [
            ("POSTAL_TEST_TABLES_DIR", Some("/srv/postal")),
            ("POSTAL__ENGINE__MAX_IN_FLIGHT", Some("8")),
            ("POSTAL__HTTP__RETRIES", Some("5")),
        ],
        || {
            let config = PostalConfigLoader::new()
                .with_file(&p)
                .load()
                .expect("load postal config");

            assert_eq!(config.engine.window_size, 12);
            assert_eq!(config.engine.max_in_flight, Some(8));
            assert_eq!(config.http.timeout_secs, 30);
            assert_eq!(config.http.retries, 5, "environment wins over the file");
            assert_eq!(
                config.tables.file,
                Some(PathBuf::from("/srv/postal/tables.yaml"))
            );
            assert_eq!(config.logging.format, LogFormat::Json);
        },
    );
}

#[test]
#[serial]
fn missing_required_file_is_an_error() {
    let tmp = TempDir::new().unwrap();
    let result = PostalConfigLoader::new()
        .with_file(tmp.path().join("nope.yaml"))
        .load();
    assert!(result.is_err());
}

#[test]
#[serial]
fn missing_optional_file_falls_back_to_defaults() {
    let tmp = TempDir::new().unwrap();
    let config = PostalConfigLoader::new()
        .with_optional_file(tmp.path().join("nope.yaml"))
        .load()
        .expect("optional file may be absent");
    assert_eq!(config.engine.window_size, 10);
}

#[test]
#[serial]
fn later_files_override_earlier_ones() {
    let tmp = TempDir::new().unwrap();
    let base = write_yaml(&tmp, "base.yaml", "engine:\n  window_size: 8\nhttp:\n  retries: 1\n");
    let local = write_yaml(&tmp, "local.yaml", "engine:\n  window_size: 14\n");

    let config = PostalConfigLoader::new()
        .with_file(base)
        .with_file(local)
        .load()
        .unwrap();

    assert_eq!(config.engine.window_size, 14);
    assert_eq!(config.http.retries, 1);
}
