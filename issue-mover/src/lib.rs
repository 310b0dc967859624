#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod config;
pub mod mover;
pub mod pacing;
pub mod pagination;
pub mod repository;
pub mod summary;
pub mod templates;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub mod tracker;

pub use config::{ConfigError, LabelFilter, MigrationConfig, MoverFile, MoverOptions};
pub use mover::{MoveError, Migrator};
pub use pacing::Pacer;
pub use pagination::{collect_all, pages};
pub use repository::RepoRef;
pub use summary::{IssueOutcome, RunSummary, SkipReason};
pub use templates::{pretty_date, TemplateError, TemplateRenderer, TemplateSet};
pub use tracker::{
    Comment, GitHubTracker, Issue, IssueState, IssueTracker, NewIssue, Page, PageCursor,
    StateFilter, TrackerError,
};
