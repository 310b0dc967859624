//! Migration configuration.
//!
//! [`MigrationConfig`] says what to move and [`MoverOptions`] says how fast
//! and how many per page. Both can be built in code or loaded from a TOML
//! file through [`MoverFile`].

mod error;
mod file;

pub use error::ConfigError;
pub use file::MoverFile;

use crate::repository::RepoRef;
use crate::tracker::StateFilter;
use std::collections::BTreeSet;
use std::time::Duration;

/// Default pause before each write-side request.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(500);

/// Default (and maximum) page size for list calls.
pub const DEFAULT_PER_PAGE: u8 = 100;

/// Set of label names an issue must intersect to be moved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelFilter {
    labels: BTreeSet<String>,
}

impl LabelFilter {
    /// Builds a filter, returning `None` when no labels were given.
    pub fn new<I, S>(labels: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: BTreeSet<String> = labels.into_iter().map(Into::into).collect();
        if labels.is_empty() {
            None
        } else {
            Some(Self { labels })
        }
    }

    /// Returns true if any of `labels` is in the filter.
    #[must_use]
    pub fn matches_any(&self, labels: &[String]) -> bool {
        labels.iter().any(|label| self.labels.contains(label))
    }

    /// Iterates over the filter's label names in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }
}

/// What to move: source, target, and which issues qualify.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationConfig {
    /// Repository issues are moved out of.
    pub source: RepoRef,

    /// Repository issues are moved into.
    pub target: RepoRef,

    /// Which source issues to list.
    pub state: StateFilter,

    /// Optional any-of label filter.
    pub label_filter: Option<LabelFilter>,
}

impl MigrationConfig {
    /// Creates a configuration moving open issues with no label filter.
    pub fn new(source: RepoRef, target: RepoRef) -> Self {
        Self {
            source,
            target,
            state: StateFilter::default(),
            label_filter: None,
        }
    }

    /// Sets the state filter.
    #[must_use]
    pub fn with_state(mut self, state: StateFilter) -> Self {
        self.state = state;
        self
    }

    /// Sets the label filter. An empty list clears it.
    #[must_use]
    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.label_filter = LabelFilter::new(labels);
        self
    }
}

/// Pacing and paging knobs for a run.
#[derive(Debug, Clone)]
pub struct MoverOptions {
    /// Pause before each issue and each copied comment.
    delay: Duration,
    /// Items requested per list page.
    per_page: u8,
    /// Whether to only report what would be moved.
    dry_run: bool,
}

impl Default for MoverOptions {
    fn default() -> Self {
        Self {
            delay: DEFAULT_DELAY,
            per_page: DEFAULT_PER_PAGE,
            dry_run: false,
        }
    }
}

impl MoverOptions {
    /// Sets the pause between requests.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Sets the page size, clamped to `1..=100`.
    #[must_use]
    pub fn with_per_page(mut self, per_page: u8) -> Self {
        self.per_page = per_page.clamp(1, DEFAULT_PER_PAGE);
        self
    }

    /// Enables or disables dry-run mode.
    #[must_use]
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Returns the pause between requests.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Returns the page size.
    pub fn per_page(&self) -> u8 {
        self.per_page
    }

    /// Returns whether dry-run mode is enabled.
    pub fn dry_run(&self) -> bool {
        self.dry_run
    }
}
