//! Tracker error types.

use thiserror::Error;

/// Errors returned by an issue tracker backend.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// GitHub API error.
    #[error("GitHub API error: {0}")]
    GitHub(#[from] octocrab::Error),

    /// A page cursor could not be turned back into a request.
    #[error("Invalid page cursor '{cursor}': {message}")]
    InvalidCursor { cursor: String, message: String },

    /// The referenced issue does not exist.
    #[error("Issue #{number} not found in {repo}")]
    NotFound { repo: String, number: u64 },

    /// The tracker refused the request.
    #[error("Request rejected: {message}")]
    Rejected { message: String },
}
