//! Issue tracker abstraction.
//!
//! The [`IssueTracker`] trait lists the handful of REST operations the
//! migrator needs. [`GitHubTracker`] implements it on top of octocrab; the
//! in-memory tracker in the `testing` module implements it for tests (enabled
//! by the `testing` feature).

mod error;
mod github;
mod models;
mod page;
mod state;

pub use error::TrackerError;
pub use github::GitHubTracker;
pub use models::{Comment, Issue, NewIssue};
pub use page::{Page, PageCursor};
pub use state::{IssueState, StateFilter};

use crate::repository::RepoRef;
use async_trait::async_trait;

/// Operations the migrator performs against a hosted issue tracker.
///
/// Every call is a single request. List calls return the first [`Page`];
/// the `next_*_page` methods follow the cursor it carries.
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// Lists issues in `repo` matching `state`.
    async fn list_issues(
        &self,
        repo: &RepoRef,
        state: StateFilter,
        per_page: u8,
    ) -> Result<Page<Issue>, TrackerError>;

    /// Fetches the issue page behind `cursor`.
    async fn next_issue_page(&self, cursor: PageCursor) -> Result<Page<Issue>, TrackerError>;

    /// Creates an issue in `repo`.
    async fn create_issue(&self, repo: &RepoRef, issue: &NewIssue) -> Result<Issue, TrackerError>;

    /// Lists comments on issue `number` in `repo`.
    async fn list_comments(
        &self,
        repo: &RepoRef,
        number: u64,
        per_page: u8,
    ) -> Result<Page<Comment>, TrackerError>;

    /// Fetches the comment page behind `cursor`.
    async fn next_comment_page(&self, cursor: PageCursor)
        -> Result<Page<Comment>, TrackerError>;

    /// Posts a comment on issue `number` in `repo`.
    async fn create_comment(
        &self,
        repo: &RepoRef,
        number: u64,
        body: &str,
    ) -> Result<Comment, TrackerError>;

    /// Edits the state of issue `number` in `repo`.
    async fn set_issue_state(
        &self,
        repo: &RepoRef,
        number: u64,
        state: IssueState,
    ) -> Result<Issue, TrackerError>;
}
