//! Moves issues and their comments between repositories.
//!
//! A [`Migrator`] lists the qualifying issues of the source repository and
//! drains them through a queue one at a time. For each issue it:
//! 1. Creates a copy in the target repository with an attribution header
//! 2. Copies every comment, in order
//! 3. Closes the copy if the original was closed
//! 4. Comments on the original with a link to the copy
//! 5. Closes the original
//!
//! Requests are never issued concurrently and each issue and comment is
//! preceded by a fixed pause. The first failure ends the run.

mod error;

pub use error::MoveError;

use crate::config::{ConfigError, MigrationConfig, MoverOptions};
use crate::pacing::Pacer;
use crate::pagination::collect_all;
use crate::repository::RepoRef;
use crate::summary::{IssueOutcome, RunSummary, SkipReason};
use crate::templates::{TemplateError, TemplateRenderer};
use crate::tracker::{Issue, IssueState, IssueTracker, NewIssue};
use std::collections::VecDeque;
use tracing::{debug, error, info, info_span, Instrument};

/// Moves issues from a source repository to a target repository.
pub struct Migrator<T> {
    tracker: T,
    config: Option<MigrationConfig>,
    options: MoverOptions,
    renderer: TemplateRenderer,
    pacer: Pacer,
}

impl<T: IssueTracker> Migrator<T> {
    /// Creates an unconfigured migrator with default options and templates.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError`] if the default templates fail to register.
    pub fn new(tracker: T) -> Result<Self, TemplateError> {
        let options = MoverOptions::default();
        Ok(Self {
            tracker,
            config: None,
            pacer: Pacer::new(options.delay()),
            options,
            renderer: TemplateRenderer::new()?,
        })
    }

    /// Replaces the run options.
    #[must_use]
    pub fn with_options(mut self, options: MoverOptions) -> Self {
        self.pacer = Pacer::new(options.delay());
        self.options = options;
        self
    }

    /// Replaces the body renderer.
    #[must_use]
    pub fn with_renderer(mut self, renderer: TemplateRenderer) -> Self {
        self.renderer = renderer;
        self
    }

    /// Sets what to move. Performs no I/O.
    pub fn set_config(&mut self, config: MigrationConfig) {
        self.config = Some(config);
    }

    /// Returns the current configuration, if set.
    pub fn config(&self) -> Option<&MigrationConfig> {
        self.config.as_ref()
    }

    /// Returns the underlying tracker.
    pub fn tracker(&self) -> &T {
        &self.tracker
    }

    fn require_config(&self) -> Result<&MigrationConfig, ConfigError> {
        self.config.as_ref().ok_or(ConfigError::MissingRepositories)
    }

    /// Moves every qualifying issue from the source to the target.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::Config`] without touching the tracker if no
    /// configuration was set. Any tracker failure is logged and returned
    /// immediately; issues handled before it stay moved.
    pub async fn move_issues(&self) -> Result<RunSummary, MoveError> {
        let config = match self.require_config() {
            Ok(config) => config,
            Err(e) => {
                error!(error = %e, "Cannot start move");
                return Err(e.into());
            }
        };

        let span = info_span!(
            "move",
            source = %config.source,
            target = %config.target,
            state = %config.state
        );

        async {
            let mut summary = RunSummary::new(self.options.dry_run());

            let issues = self.list_source_issues(config).await.inspect_err(|e| {
                error!(error = %e, "Failed to list source issues");
            })?;

            info!(count = issues.len(), "Found issues");
            summary.issues_found = issues.len();

            let mut queue: VecDeque<Issue> = issues.into();
            while let Some(issue) = queue.pop_front() {
                if !self.options.dry_run() {
                    self.pacer.wait().await;
                }

                let outcome = self.move_issue(&issue).await.inspect_err(|e| {
                    error!(
                        issue_number = issue.number,
                        remaining = queue.len(),
                        error = %e,
                        "Failed to move issue, aborting"
                    );
                })?;
                summary.record_outcome(&outcome);
            }

            info!(
                moved = summary.issues_moved,
                skipped = summary.issues_skipped,
                comments = summary.comments_copied,
                "Move complete"
            );
            Ok(summary)
        }
        .instrument(span)
        .await
    }

    async fn list_source_issues(&self, config: &MigrationConfig) -> Result<Vec<Issue>, MoveError> {
        let first = self
            .tracker
            .list_issues(&config.source, config.state, self.options.per_page())
            .await?;

        let issues = collect_all(first, |cursor| self.tracker.next_issue_page(cursor)).await?;
        Ok(issues)
    }

    /// Moves a single issue, or skips it if it does not qualify.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError`] on the first failed step. Steps already taken
    /// are not undone.
    pub async fn move_issue(&self, issue: &Issue) -> Result<IssueOutcome, MoveError> {
        let config = self.require_config()?;

        if let Some(reason) = skip_reason(config, issue) {
            debug!(issue_number = issue.number, %reason, "Skipping issue");
            return Ok(IssueOutcome::Skipped {
                number: issue.number,
                reason,
            });
        }

        if self.options.dry_run() {
            info!(issue_number = issue.number, title = %issue.title, "Would move issue");
            return Ok(IssueOutcome::Planned {
                number: issue.number,
                title: issue.title.clone(),
            });
        }

        let span = info_span!("move_issue", issue_number = issue.number);

        async {
            info!(title = %issue.title, "Moving issue");

            let new_issue = NewIssue {
                title: issue.title.clone(),
                body: self.renderer.render_issue_body(issue)?,
                labels: issue.labels.clone(),
                assignees: issue.assignees.clone(),
            };
            let created = self.tracker.create_issue(&config.target, &new_issue).await?;
            info!(target_number = created.number, url = %created.html_url, "Created issue in target");

            let comments = self.clone_comments(issue.number, created.number).await?;

            if issue.is_closed() {
                self.close_issue(&config.target, &created).await?;
            }

            self.link_issue(issue, &created).await?;
            self.close_issue(&config.source, issue).await?;

            info!(target_number = created.number, comments, "Issue moved");
            Ok(IssueOutcome::Moved {
                source_number: issue.number,
                target_number: created.number,
                url: created.html_url,
                comments,
            })
        }
        .instrument(span)
        .await
    }

    /// Copies the comments of source issue `source_number` onto target issue
    /// `target_number`, oldest first. Returns the number copied.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError`] if listing or posting a comment fails.
    pub async fn clone_comments(
        &self,
        source_number: u64,
        target_number: u64,
    ) -> Result<usize, MoveError> {
        let config = self.require_config()?;

        let first = self
            .tracker
            .list_comments(&config.source, source_number, self.options.per_page())
            .await?;
        let comments = collect_all(first, |cursor| self.tracker.next_comment_page(cursor)).await?;
        debug!(count = comments.len(), "Copying comments");

        let mut queue: VecDeque<_> = comments.into();
        let mut copied = 0;
        while let Some(comment) = queue.pop_front() {
            self.pacer.wait().await;

            let body = self.renderer.render_comment_body(&comment)?;
            self.tracker
                .create_comment(&config.target, target_number, &body)
                .await?;
            copied += 1;
        }

        Ok(copied)
    }

    /// Closes `issue` in `repo`. Returns false without a request if it is
    /// already closed.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::Transport`] if the edit fails.
    pub async fn close_issue(&self, repo: &RepoRef, issue: &Issue) -> Result<bool, MoveError> {
        if issue.is_closed() {
            debug!(repo = %repo, issue_number = issue.number, "Already closed");
            return Ok(false);
        }

        self.tracker
            .set_issue_state(repo, issue.number, IssueState::Closed)
            .await?;
        debug!(repo = %repo, issue_number = issue.number, "Closed issue");
        Ok(true)
    }

    /// Posts a comment on `source_issue` pointing at `new_issue`.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError`] if rendering or posting fails.
    pub async fn link_issue(&self, source_issue: &Issue, new_issue: &Issue) -> Result<(), MoveError> {
        let config = self.require_config()?;

        let body = self.renderer.render_link_body(new_issue)?;
        self.tracker
            .create_comment(&config.source, source_issue.number, &body)
            .await?;
        Ok(())
    }
}

/// Returns why `issue` should be left alone, if it should.
fn skip_reason(config: &MigrationConfig, issue: &Issue) -> Option<SkipReason> {
    if issue.is_pull_request {
        return Some(SkipReason::PullRequest);
    }

    match &config.label_filter {
        Some(filter) if !filter.matches_any(&issue.labels) => Some(SkipReason::LabelMismatch),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{comment, issue, CallKind, MemoryTracker};
    use std::time::Duration;

    fn source() -> RepoRef {
        RepoRef::new("octo", "old")
    }

    fn target() -> RepoRef {
        RepoRef::new("octo", "new")
    }

    fn migrator(tracker: MemoryTracker) -> Migrator<MemoryTracker> {
        let mut migrator = Migrator::new(tracker)
            .unwrap()
            .with_options(MoverOptions::default().with_delay(Duration::ZERO));
        migrator.set_config(MigrationConfig::new(source(), target()));
        migrator
    }

    #[test]
    fn pull_requests_are_skipped_regardless_of_labels() {
        let config = MigrationConfig::new(source(), target()).with_labels(["bug"]);
        let mut pr = issue(1, "Fix crash");
        pr.is_pull_request = true;
        pr.labels = vec!["bug".to_string()];

        assert_eq!(skip_reason(&config, &pr), Some(SkipReason::PullRequest));
    }

    #[test]
    fn label_filter_is_any_of() {
        let config = MigrationConfig::new(source(), target()).with_labels(["bug"]);
        let mut both = issue(1, "both");
        both.labels = vec!["bug".to_string(), "ui".to_string()];
        let mut ui_only = issue(2, "ui only");
        ui_only.labels = vec!["ui".to_string()];

        assert_eq!(skip_reason(&config, &both), None);
        assert_eq!(skip_reason(&config, &ui_only), Some(SkipReason::LabelMismatch));
    }

    #[tokio::test]
    async fn unconfigured_move_makes_no_calls() {
        let migrator = Migrator::new(MemoryTracker::new()).unwrap();

        let result = migrator.move_issues().await;

        assert!(matches!(result, Err(ref e) if e.is_config()));
        assert!(migrator.tracker().calls().is_empty());
    }

    #[tokio::test]
    async fn close_issue_is_noop_when_closed() {
        let tracker = MemoryTracker::new();
        let mut closed = issue(1, "done");
        closed.state = IssueState::Closed;
        let closed = tracker.insert_issue(&source(), closed);
        let migrator = migrator(tracker);

        let edited = migrator.close_issue(&source(), &closed).await.unwrap();

        assert!(!edited);
        assert_eq!(migrator.tracker().count_calls(CallKind::SetIssueState), 0);
    }

    #[tokio::test]
    async fn clone_comments_writes_to_target_in_order() {
        let tracker = MemoryTracker::new();
        tracker.insert_issue(&source(), issue(1, "original"));
        tracker.insert_issue(&target(), issue(5, "copy"));
        for body in ["first", "second", "third"] {
            tracker.insert_comment(&source(), 1, comment("alice", body)).unwrap();
        }
        let migrator = migrator(tracker).with_options(
            MoverOptions::default()
                .with_delay(Duration::ZERO)
                .with_per_page(2),
        );

        let copied = migrator.clone_comments(1, 5).await.unwrap();

        let bodies: Vec<String> = migrator
            .tracker()
            .comments(&target(), 5)
            .into_iter()
            .filter_map(|comment| comment.body)
            .collect();
        assert_eq!(copied, 3);
        assert_eq!(
            bodies,
            vec![
                "From @alice on January 1st 2020, 12:00 am\n\nfirst",
                "From @alice on January 1st 2020, 12:00 am\n\nsecond",
                "From @alice on January 1st 2020, 12:00 am\n\nthird",
            ]
        );
        assert_eq!(migrator.tracker().count_calls(CallKind::NextCommentPage), 1);
        assert!(migrator.tracker().comments(&source(), 1).len() == 3);
    }

    #[tokio::test]
    async fn dry_run_makes_no_writes() {
        let tracker = MemoryTracker::new();
        tracker.insert_issue(&source(), issue(1, "open"));
        let migrator = migrator(tracker).with_options(
            MoverOptions::default()
                .with_delay(Duration::ZERO)
                .with_dry_run(true),
        );

        let summary = migrator.move_issues().await.unwrap();

        assert!(summary.dry_run);
        assert_eq!(summary.issues_planned, 1);
        assert_eq!(migrator.tracker().count_calls(CallKind::CreateIssue), 0);
        assert_eq!(migrator.tracker().count_calls(CallKind::CreateComment), 0);
        assert_eq!(migrator.tracker().count_calls(CallKind::SetIssueState), 0);
    }
}
