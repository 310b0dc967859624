use std::path::PathBuf;
use std::time::Duration;

use issue_mover::{ConfigError, MoverFile, RepoRef, StateFilter, TemplateRenderer};

fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

#[test]
fn load_config_from_fixture() {
    let file = MoverFile::load(&fixtures_root().join("issue-mover.toml")).unwrap();
    let config = file.migration_config().unwrap();
    let options = file.options();

    assert_eq!(config.source, RepoRef::new("acme", "legacy-tracker"));
    assert_eq!(config.target, RepoRef::new("acme", "platform"));
    assert_eq!(config.state, StateFilter::All);

    let filter = config.label_filter.unwrap();
    assert_eq!(filter.iter().collect::<Vec<_>>(), vec!["bug", "regression"]);

    assert_eq!(options.delay(), Duration::from_millis(250));
    assert_eq!(options.per_page(), 100);
    assert!(!options.dry_run());
}

#[test]
fn fixture_templates_compile() {
    let file = MoverFile::load(&fixtures_root().join("issue-mover.toml")).unwrap();

    assert!(TemplateRenderer::with_templates(&file.templates).is_ok());
}

#[test]
fn load_config_rejects_identical_repositories() {
    let result = MoverFile::load(&fixtures_root().join("same-repos.toml"));

    assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
}
