//! Run summary types.

use super::outcome::IssueOutcome;

/// Summary of a complete run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of issues listed from the source.
    pub issues_found: usize,

    /// Number of issues moved.
    pub issues_moved: usize,

    /// Number of pull requests and filtered-out issues.
    pub issues_skipped: usize,

    /// Number of issues a dry run would have moved.
    pub issues_planned: usize,

    /// Number of comments copied across all moved issues.
    pub comments_copied: usize,

    /// Whether this was a dry run.
    pub dry_run: bool,
}

impl RunSummary {
    /// Creates a new empty summary.
    #[must_use]
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Default::default()
        }
    }

    /// Updates the summary with the outcome of one issue.
    pub fn record_outcome(&mut self, outcome: &IssueOutcome) {
        match outcome {
            IssueOutcome::Moved { comments, .. } => {
                self.issues_moved += 1;
                self.comments_copied += comments;
            }
            IssueOutcome::Skipped { .. } => self.issues_skipped += 1,
            IssueOutcome::Planned { .. } => self.issues_planned += 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summary::SkipReason;

    #[test]
    fn can_record_outcomes() {
        let mut summary = RunSummary::new(false);

        summary.record_outcome(&IssueOutcome::Moved {
            source_number: 1,
            target_number: 10,
            url: "https://example.com/10".to_string(),
            comments: 3,
        });
        summary.record_outcome(&IssueOutcome::Skipped {
            number: 2,
            reason: SkipReason::PullRequest,
        });
        summary.record_outcome(&IssueOutcome::Planned {
            number: 3,
            title: "Later".to_string(),
        });

        assert_eq!(summary.issues_moved, 1);
        assert_eq!(summary.comments_copied, 3);
        assert_eq!(summary.issues_skipped, 1);
        assert_eq!(summary.issues_planned, 1);
    }
}
