use std::path::PathBuf;

use switchyard_cli::commands::{self, Context};
use switchyard_cli::router::{LaunchArgs, ProjectAction};

#[tokio::test]
async fn test_context_from_fresh_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("providers.json");

    let ctx = Context::load(Some(path.clone())).await.unwrap();

    assert!(path.exists());
    assert_eq!(ctx.registry.provider_count(), ctx.document.providers.len());
    assert!(ctx.registry.current().is_none());
    assert_eq!(
        ctx.translator.transcript().unwrap().path(),
        dir.path().join("activate_provider.sh")
    );
}

#[tokio::test]
async fn test_monitor_seeded_before_any_check() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = Context::load(Some(dir.path().join("providers.json"))).await.unwrap();

    let table = ctx.monitor.latest().await;
    assert_eq!(table.len(), ctx.registry.provider_count());
    for name in ctx.registry.names() {
        let status = table.get(&name).unwrap();
        assert!(!status.is_healthy);
        assert!(!status.is_measured());
    }
}

#[tokio::test]
async fn test_project_add_and_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("providers.json");
    let mut ctx = Context::load(Some(path.clone())).await.unwrap();

    let add = ProjectAction::Add {
        name: "api".to_string(),
        path: PathBuf::from("/srv/api"),
        description: "backend".to_string(),
    };
    commands::project::run(&mut ctx, add.clone()).unwrap();
    // second add is reported, not an error
    commands::project::run(&mut ctx, add).unwrap();

    let reloaded = Context::load(Some(path)).await.unwrap();
    assert_eq!(reloaded.document.project_directories.len(), 1);
    assert_eq!(reloaded.document.project("api").unwrap().path, "/srv/api");
}

#[tokio::test]
async fn test_broken_config_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("providers.json");
    std::fs::write(&path, "{ not json").unwrap();

    let err = Context::load(Some(path)).await.err().unwrap();
    assert!(format!("{:#}", err).contains("Failed to load"));
}

#[tokio::test]
async fn test_launch_with_missing_dir_activates_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mut ctx = Context::load(Some(dir.path().join("providers.json"))).await.unwrap();
    let provider = ctx.document.providers[0].name.clone();

    let args = LaunchArgs {
        provider: Some(provider),
        dir: Some(dir.path().join("does-not-exist")),
        ..Default::default()
    };
    let err = commands::launch::run(&mut ctx, &args).await.unwrap_err();

    assert!(err.to_string().contains("does not exist"));
    assert!(ctx.registry.current().is_none());
    assert!(ctx.translator.current().is_none());
    assert!(!dir.path().join("activate_provider.sh").exists());
}

#[tokio::test]
async fn test_launch_with_unknown_project_activates_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mut ctx = Context::load(Some(dir.path().join("providers.json"))).await.unwrap();
    let provider = ctx.document.providers[0].name.clone();

    let args = LaunchArgs {
        provider: Some(provider),
        project: Some("nowhere".to_string()),
        ..Default::default()
    };
    let err = commands::launch::run(&mut ctx, &args).await.unwrap_err();

    assert!(err.to_string().contains("nowhere"));
    assert!(ctx.registry.current().is_none());
}
