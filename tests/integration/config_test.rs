use licprobe::client::Credentials;
use licprobe::core::{Config, ReportProfile};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_config_default() {
    let config = Config::default();
    assert!(config.include_skus.is_empty());
    assert!(config.exclude_skus.is_empty());
    assert_eq!(config.profile, ReportProfile::Absolute);
    assert_eq!(config.thresholds.free_min_warning, 5.0);
    assert_eq!(config.thresholds.free_min_error, 1.0);
    assert_eq!(config.thresholds.sync_max_age_hours, 12.0);
    assert!(!config.strict_exit);
}

#[test]
fn test_config_load_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    fs::write(
        &path,
        r#"{
            "tenant_id": "0000-1111",
            "client_id": "app",
            "client_secret": "secret",
            "include_skus": ["contoso:SPE_E3"],
            "profile": "percent",
            "timeout_secs": 10,
            "thresholds": {"sync_max_age_hours": 3}
        }"#,
    )
    .unwrap();

    let config = Config::load(Some(&path)).unwrap();
    assert_eq!(config.include_skus, vec!["contoso:SPE_E3"]);
    assert_eq!(config.profile, ReportProfile::Percent);
    assert_eq!(config.thresholds.sync_max_age_hours, 3.0);
    // untouched thresholds keep their defaults
    assert_eq!(config.thresholds.free_min_warning, 5.0);
    assert_eq!(config.graph_settings().timeout.as_secs(), 10);
    assert!(matches!(
        config.credentials().unwrap(),
        Credentials::ClientSecret { .. }
    ));
}

#[test]
fn test_config_empty_file_is_default() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    fs::write(&path, "  \n").unwrap();

    let config = Config::load(Some(&path)).unwrap();
    assert!(config.tenant_id.is_none());
}

#[test]
fn test_config_malformed_file_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    fs::write(&path, "{ not json").unwrap();

    assert!(Config::load(Some(&path)).is_err());
}

#[test]
fn test_config_unknown_profile_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    fs::write(&path, r#"{"profile": "everything"}"#).unwrap();

    assert!(Config::load(Some(&path)).is_err());
}

#[test]
fn test_config_path_location() {
    if let Some(path) = Config::get_config_path() {
        assert!(path.ends_with("licprobe/config.json"));
    }
}
