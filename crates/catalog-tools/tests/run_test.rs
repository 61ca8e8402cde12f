//! Tool entry points: an `Err` here is what makes the binaries exit 1

use std::path::{Path, PathBuf};
use tmp_catalog_tools::{run_import, run_validate, ToolsConfig};

fn shipped_templates() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../data/templates")
}

fn config(database: &Path, templates_dir: PathBuf) -> ToolsConfig {
    ToolsConfig {
        database_url: format!("sqlite://{}", database.join("catalog.db").display()),
        templates_dir,
    }
}

#[test]
fn test_validate_fails_for_missing_templates_dir() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(dir.path(), dir.path().join("nowhere"));

    let err = run_validate(&config).unwrap_err();
    assert!(err.to_string().contains("tmp_models.csv"), "{}", err);
}

#[test]
fn test_validate_succeeds_for_shipped_templates() {
    let dir = tempfile::tempdir().unwrap();
    let summary = run_validate(&config(dir.path(), shipped_templates())).unwrap();
    assert_eq!(summary.models, 3);
}

#[tokio::test]
async fn test_import_fails_for_missing_templates_dir() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(dir.path(), dir.path().join("nowhere"));

    let err = run_import(&config).await.unwrap_err();
    assert!(format!("{:#}", err).contains("tmp_models.csv"), "{:#}", err);
}

#[tokio::test]
async fn test_import_fails_when_database_cannot_open() {
    let dir = tempfile::tempdir().unwrap();
    // sqlite does not create missing parent directories
    let config = config(&dir.path().join("missing"), shipped_templates());

    let err = run_import(&config).await.unwrap_err();
    assert!(err.to_string().contains("Failed to initialize storage"), "{}", err);
}

#[tokio::test]
async fn test_import_writes_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(dir.path(), shipped_templates());

    let summary = run_import(&config).await.unwrap();
    assert_eq!(summary.models, 3);
    assert!(dir.path().join("catalog.db").exists());

    // a second run against the same file is accepted
    run_import(&config).await.unwrap();
}
