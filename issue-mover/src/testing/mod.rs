//! In-memory tracker for tests.
//!
//! [`MemoryTracker`] keeps repositories in memory, paginates with real
//! cursors, records every call and can be told to fail a specific call.
//!
//! Compiled for this crate's own tests, and for other crates with the
//! `testing` feature.

mod memory;

pub use memory::{CallKind, MemoryTracker, TrackerCall};

use crate::tracker::{Comment, Issue, IssueState};
use chrono::{DateTime, Utc};

/// 2020-01-01T00:00:00Z.
const NEW_YEAR_2020: i64 = 1_577_836_800;

fn new_year_2020() -> DateTime<Utc> {
    DateTime::from_timestamp(NEW_YEAR_2020, 0).unwrap_or_default()
}

/// Creates an open issue authored by `octocat` on 2020-01-01.
///
/// The URL is filled in when the issue is inserted into a [`MemoryTracker`].
#[must_use]
pub fn issue(number: u64, title: &str) -> Issue {
    Issue {
        number,
        title: title.to_string(),
        body: Some(format!("Body of {title}")),
        author: "octocat".to_string(),
        created_at: new_year_2020(),
        state: IssueState::Open,
        labels: Vec::new(),
        assignees: Vec::new(),
        html_url: String::new(),
        is_pull_request: false,
    }
}

/// Creates a comment by `author` posted on 2020-01-01.
#[must_use]
pub fn comment(author: &str, body: &str) -> Comment {
    Comment {
        author: author.to_string(),
        created_at: new_year_2020(),
        body: Some(body.to_string()),
        html_url: String::new(),
    }
}
