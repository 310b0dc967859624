//! Read-only views of tracker entities.

use super::IssueState;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// An issue as seen on the tracker.
#[derive(Debug, Clone, Serialize)]
pub struct Issue {
    /// Issue number within its repository.
    pub number: u64,

    /// Issue title.
    pub title: String,

    /// Markdown body, absent when the author left it empty.
    pub body: Option<String>,

    /// Login of the issue author.
    pub author: String,

    /// Creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Current state.
    pub state: IssueState,

    /// Label names in tracker order.
    pub labels: Vec<String>,

    /// Assignee logins.
    pub assignees: Vec<String>,

    /// Browser URL of the issue.
    pub html_url: String,

    /// Set when the issue is actually a pull request.
    pub is_pull_request: bool,
}

impl Issue {
    /// Returns true if the issue is closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.state == IssueState::Closed
    }
}

/// A comment on an issue.
#[derive(Debug, Clone, Serialize)]
pub struct Comment {
    /// Login of the comment author.
    pub author: String,

    /// Creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Markdown body.
    pub body: Option<String>,

    /// Browser URL of the comment.
    pub html_url: String,
}

/// Payload for creating an issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIssue {
    pub title: String,
    pub body: String,
    pub labels: Vec<String>,
    pub assignees: Vec<String>,
}
