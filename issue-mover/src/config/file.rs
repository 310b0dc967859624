//! TOML config file loading.

use super::{ConfigError, MigrationConfig, MoverOptions};
use crate::repository::RepoRef;
use crate::templates::TemplateSet;
use crate::tracker::StateFilter;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Contents of an `issue-mover.toml` file.
///
/// Every field is optional so that command line flags can fill the gaps.
///
/// ```toml
/// source = "octo/old-home"
/// target = "octo/new-home"
/// state = "all"
/// labels = ["bug", "regression"]
/// delay-ms = 750
///
/// [templates]
/// link = "Moved to {{url}}"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct MoverFile {
    /// Repository to move issues out of.
    pub source: Option<RepoRef>,

    /// Repository to move issues into.
    pub target: Option<RepoRef>,

    /// Which source issues to list.
    pub state: Option<StateFilter>,

    /// Any-of label filter.
    #[serde(default)]
    pub labels: Vec<String>,

    /// Pause between requests in milliseconds.
    pub delay_ms: Option<u64>,

    /// Page size for list calls.
    pub per_page: Option<u8>,

    /// Only report what would be moved.
    #[serde(default)]
    pub dry_run: bool,

    /// Body template overrides.
    #[serde(default)]
    pub templates: TemplateSet,
}

impl MoverFile {
    /// Loads and validates a config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read, is not valid TOML,
    /// or fails validation.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        debug!(path = %path.display(), "Loading config file");

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        let file: Self = toml::from_str(&content).map_err(|e| ConfigError::TomlError {
            path: path.display().to_string(),
            source: e,
        })?;

        file.validate(&path.display().to_string())?;
        Ok(file)
    }

    /// Builds the migration config, requiring both repositories.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRepositories`] if either side is unset.
    pub fn migration_config(&self) -> Result<MigrationConfig, ConfigError> {
        let (Some(source), Some(target)) = (self.source.clone(), self.target.clone()) else {
            return Err(ConfigError::MissingRepositories);
        };

        Ok(MigrationConfig::new(source, target)
            .with_state(self.state.unwrap_or_default())
            .with_labels(self.labels.iter().cloned()))
    }

    /// Builds run options, falling back to defaults for unset fields.
    #[must_use]
    pub fn options(&self) -> MoverOptions {
        let mut options = MoverOptions::default().with_dry_run(self.dry_run);
        if let Some(delay_ms) = self.delay_ms {
            options = options.with_delay(Duration::from_millis(delay_ms));
        }
        if let Some(per_page) = self.per_page {
            options = options.with_per_page(per_page);
        }
        options
    }

    /// Checks the values that serde cannot check on its own.
    ///
    /// `origin` names where the values came from (a file path, or the
    /// command line after flags were merged in) and is used in errors.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] if source and target are the
    /// same repository, the page size is out of range, or a label is blank.
    pub fn validate(&self, origin: &str) -> Result<(), ConfigError> {
        let path_str = origin.to_string();

        if let (Some(source), Some(target)) = (&self.source, &self.target) {
            if source == target {
                return Err(ConfigError::ValidationError {
                    path: path_str,
                    message: "source and target must be different repositories".to_string(),
                });
            }
        }

        if let Some(per_page) = self.per_page {
            if !(1..=100).contains(&per_page) {
                return Err(ConfigError::ValidationError {
                    path: path_str,
                    message: format!("per-page must be between 1 and 100, got {per_page}"),
                });
            }
        }

        if self.labels.iter().any(|label| label.trim().is_empty()) {
            return Err(ConfigError::ValidationError {
                path: path_str,
                message: "labels must not be blank".to_string(),
            });
        }

        Ok(())
    }
}
