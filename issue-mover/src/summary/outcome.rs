//! Per-issue outcome types.

use serde::Serialize;
use std::fmt;

/// Why an issue was left in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The entry is a pull request, not an issue.
    PullRequest,

    /// A label filter is set and none of the issue's labels are in it.
    LabelMismatch,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PullRequest => f.write_str("pull request"),
            Self::LabelMismatch => f.write_str("no matching label"),
        }
    }
}

/// Result of handling a single source issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum IssueOutcome {
    /// Issue was copied to the target and closed in the source.
    Moved {
        /// Number of the original issue.
        source_number: u64,
        /// Number of the copy in the target repository.
        target_number: u64,
        /// URL of the copy.
        url: String,
        /// Comments copied.
        comments: usize,
    },

    /// Issue did not qualify.
    Skipped {
        /// Number of the original issue.
        number: u64,
        /// Reason for skipping.
        reason: SkipReason,
    },

    /// Dry run: issue would have been moved.
    Planned {
        /// Number of the original issue.
        number: u64,
        /// Title of the original issue.
        title: String,
    },
}
