use std::path::PathBuf;

use serial_test::serial;
use switchyard_config::*;
use switchyard_providers::ProviderType;

fn manager_in(dir: &tempfile::TempDir) -> ConfigManager {
    ConfigManager::with_path(dir.path().join("nested").join("providers.json"))
}

#[test]
#[serial]
fn test_missing_file_creates_starter() {
    let dir = tempfile::tempdir().unwrap();
    let manager = manager_in(&dir);

    let doc = manager.load().unwrap();

    assert!(manager.path().exists());
    assert_eq!(doc.providers.len(), 4);
    assert_eq!(doc.providers[0].provider_type, ProviderType::OpenRouter);
    assert!(doc
        .providers
        .iter()
        .all(|p| p.api_key.starts_with("YOUR_")));
    assert_eq!(doc.settings, Settings::default());
}

#[test]
#[serial]
fn test_load_full_document() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("providers.json");
    std::fs::write(
        &path,
        r#"{
  "project_directories": [{"name": "api", "path": "/srv/api"}],
  "providers": [
    {"name": "ds", "type": "deepseek", "base_url": "https://api.deepseek.com/anthropic",
     "api_key": "sk-1", "model": "deepseek-chat", "small_fast_model": "deepseek-chat",
     "custom_headers": {"x-api-key": "abc"}, "priority": 3, "timeout": 5.5}
  ],
  "settings": {"target_command": "claude-dev", "script_cleanup_delay_secs": 3}
}"#,
    )
    .unwrap();

    let doc = ConfigManager::with_path(&path).load().unwrap();

    assert_eq!(doc.project("api").unwrap().description, "");
    let ds = &doc.providers[0];
    assert_eq!(ds.priority, 3);
    assert_eq!(ds.max_retries, 3);
    assert_eq!(ds.timeout_secs, 5.5);
    assert_eq!(
        ds.custom_headers.as_ref().unwrap().get("x-api-key").map(String::as_str),
        Some("abc")
    );
    assert_eq!(doc.settings.target_command, "claude-dev");
    assert_eq!(doc.settings.shell, "bash");
    assert_eq!(doc.settings.script_cleanup_delay_secs, 3);
}

#[test]
#[serial]
fn test_unknown_provider_type_is_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("providers.json");
    std::fs::write(
        &path,
        r#"{"providers": [{"name": "x", "type": "openai", "base_url": "u",
            "api_key": "k", "model": "m", "small_fast_model": "m"}]}"#,
    )
    .unwrap();

    let err = ConfigManager::with_path(&path).load().unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)), "got {err}");
}

#[test]
#[serial]
fn test_duplicate_names_fail_validation() {
    let dir = tempfile::tempdir().unwrap();
    let manager = manager_in(&dir);
    let mut doc = ConfigDocument::starter();
    doc.providers.push(doc.providers[2].clone());
    manager.save(&doc).unwrap();

    assert!(matches!(manager.load(), Err(ConfigError::Validation(_))));
}

#[test]
#[serial]
fn test_header_name_with_equals_sign_fails_validation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("providers.json");
    std::fs::write(
        &path,
        r#"{"providers": [{"name": "proxy", "type": "custom_anthropic", "base_url": "u",
            "api_key": "k", "model": "auto", "small_fast_model": "auto",
            "custom_headers": {"x=y": "1"}}]}"#,
    )
    .unwrap();

    let err = ConfigManager::with_path(&path).load().unwrap_err();
    assert!(matches!(err, ConfigError::Validation(ref msg) if msg.contains("x=y")), "got {err}");
}

#[test]
#[serial]
fn test_save_then_load_preserves_document() {
    let dir = tempfile::tempdir().unwrap();
    let manager = manager_in(&dir);
    let mut doc = ConfigDocument::starter();
    doc.add_project_directory("web", "/srv/web", "frontend");
    doc.settings.transcript_path = PathBuf::from("/tmp/switchyard-activate.sh");

    manager.save(&doc).unwrap();
    let raw = std::fs::read_to_string(manager.path()).unwrap();
    assert!(raw.contains("\n  \"project_directories\""));
    // absent headers are omitted rather than written as null
    assert!(!raw.contains("null"));

    assert_eq!(manager.load().unwrap(), doc);
}

#[test]
#[serial]
fn test_add_project_directory_persists() {
    let dir = tempfile::tempdir().unwrap();
    let manager = manager_in(&dir);
    let mut doc = manager.load().unwrap();

    assert!(manager
        .add_project_directory(&mut doc, "api", "/srv/api", "")
        .unwrap());
    assert!(!manager
        .add_project_directory(&mut doc, "api2", "/srv/api", "")
        .unwrap());

    let reloaded = manager.load().unwrap();
    assert_eq!(reloaded.project_directories.len(), 1);
    assert_eq!(reloaded.project_directories[0].name, "api");
}

#[test]
#[serial]
fn test_environment_overrides_settings() {
    let dir = tempfile::tempdir().unwrap();
    let manager = manager_in(&dir).with_env_prefix("SWITCHYARD_TEST");
    manager.load().unwrap();

    std::env::set_var("SWITCHYARD_TEST_SETTINGS__TARGET_COMMAND", "claude-nightly");
    std::env::set_var("SWITCHYARD_TEST_SETTINGS__SCRIPT_CLEANUP_DELAY_SECS", "2");
    let loaded = manager.load();
    std::env::remove_var("SWITCHYARD_TEST_SETTINGS__TARGET_COMMAND");
    std::env::remove_var("SWITCHYARD_TEST_SETTINGS__SCRIPT_CLEANUP_DELAY_SECS");

    let doc = loaded.unwrap();
    assert_eq!(doc.settings.target_command, "claude-nightly");
    assert_eq!(doc.settings.script_cleanup_delay_secs, 2);
    assert_eq!(doc.providers.len(), 4);
}
