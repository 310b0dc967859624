//! In-memory [`IssueTracker`] implementation.

use crate::repository::RepoRef;
use crate::tracker::{
    Comment, Issue, IssueState, IssueTracker, NewIssue, Page, PageCursor, StateFilter,
    TrackerError,
};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Tracker operation, as recorded by [`MemoryTracker`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    ListIssues,
    NextIssuePage,
    CreateIssue,
    ListComments,
    NextCommentPage,
    CreateComment,
    SetIssueState,
}

/// A recorded tracker call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerCall {
    /// Operation performed.
    pub kind: CallKind,
    /// Repository addressed, if the call names one.
    pub repo: Option<RepoRef>,
    /// Issue addressed, if the call names one.
    pub number: Option<u64>,
}

struct StoredIssue {
    issue: Issue,
    comments: Vec<Comment>,
}

#[derive(Default)]
struct State {
    repos: HashMap<RepoRef, Vec<StoredIssue>>,
    calls: Vec<TrackerCall>,
    failures: Vec<(CallKind, usize)>,
    comment_ids: u64,
}

impl State {
    fn record(
        &mut self,
        kind: CallKind,
        repo: Option<&RepoRef>,
        number: Option<u64>,
    ) -> Result<(), TrackerError> {
        self.calls.push(TrackerCall {
            kind,
            repo: repo.cloned(),
            number,
        });

        let occurrence = self.calls.iter().filter(|call| call.kind == kind).count();
        if self.failures.contains(&(kind, occurrence)) {
            return Err(TrackerError::Rejected {
                message: format!("injected failure on {kind:?} call {occurrence}"),
            });
        }
        Ok(())
    }

    fn issue_mut(&mut self, repo: &RepoRef, number: u64) -> Result<&mut StoredIssue, TrackerError> {
        self.repos
            .get_mut(repo)
            .and_then(|issues| issues.iter_mut().find(|stored| stored.issue.number == number))
            .ok_or_else(|| TrackerError::NotFound {
                repo: repo.full_name(),
                number,
            })
    }

    fn issue_page(
        &self,
        repo: &RepoRef,
        state: StateFilter,
        per_page: u8,
        offset: usize,
    ) -> Page<Issue> {
        let matching: Vec<Issue> = self
            .repos
            .get(repo)
            .map(|issues| {
                issues
                    .iter()
                    .filter(|stored| state.matches(stored.issue.state))
                    .map(|stored| stored.issue.clone())
                    .collect()
            })
            .unwrap_or_default();

        slice_page(matching, per_page, offset, |next| {
            format!("issues|{repo}|{state}|{per_page}|{next}")
        })
    }

    fn comment_page(
        &self,
        repo: &RepoRef,
        number: u64,
        per_page: u8,
        offset: usize,
    ) -> Result<Page<Comment>, TrackerError> {
        let comments = self
            .repos
            .get(repo)
            .and_then(|issues| issues.iter().find(|stored| stored.issue.number == number))
            .map(|stored| stored.comments.clone())
            .ok_or_else(|| TrackerError::NotFound {
                repo: repo.full_name(),
                number,
            })?;

        Ok(slice_page(comments, per_page, offset, |next| {
            format!("comments|{repo}|{number}|{per_page}|{next}")
        }))
    }
}

fn slice_page<T>(
    items: Vec<T>,
    per_page: u8,
    offset: usize,
    cursor: impl FnOnce(usize) -> String,
) -> Page<T> {
    let per_page = usize::from(per_page.max(1));
    let end = (offset + per_page).min(items.len());
    let next = (end < items.len()).then(|| PageCursor::new(cursor(end)));
    let items = items.into_iter().skip(offset).take(per_page).collect();
    Page { items, next }
}

fn invalid_cursor(cursor: &PageCursor) -> TrackerError {
    TrackerError::InvalidCursor {
        cursor: cursor.as_str().to_string(),
        message: "not issued by this tracker".to_string(),
    }
}

/// Splits a cursor into its `|`-separated fields after checking the prefix.
fn cursor_fields<'a>(cursor: &'a PageCursor, prefix: &str) -> Result<Vec<&'a str>, TrackerError> {
    let fields: Vec<&str> = cursor.as_str().split('|').collect();
    if fields.len() != 5 || fields[0] != prefix {
        return Err(invalid_cursor(cursor));
    }
    Ok(fields)
}

/// Issue tracker that lives entirely in memory.
#[derive(Default)]
pub struct MemoryTracker {
    state: Mutex<State>,
}

impl MemoryTracker {
    /// Creates an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Stores `issue` in `repo`, filling in its URL, and returns the stored copy.
    pub fn insert_issue(&self, repo: &RepoRef, mut issue: Issue) -> Issue {
        issue.html_url = issue_url(repo, issue.number);
        self.lock()
            .repos
            .entry(repo.clone())
            .or_default()
            .push(StoredIssue {
                issue: issue.clone(),
                comments: Vec::new(),
            });
        issue
    }

    /// Appends `comment` to issue `number` in `repo`.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::NotFound`] if the issue does not exist.
    pub fn insert_comment(
        &self,
        repo: &RepoRef,
        number: u64,
        mut comment: Comment,
    ) -> Result<(), TrackerError> {
        let mut state = self.lock();
        state.comment_ids += 1;
        comment.html_url = format!(
            "{}#issuecomment-{}",
            issue_url(repo, number),
            state.comment_ids
        );
        state.issue_mut(repo, number)?.comments.push(comment);
        Ok(())
    }

    /// Makes the `occurrence`-th call (1-based) of `kind` fail.
    pub fn fail_on(&self, kind: CallKind, occurrence: usize) {
        self.lock().failures.push((kind, occurrence));
    }

    /// Returns all issues in `repo`, in insertion order.
    #[must_use]
    pub fn issues(&self, repo: &RepoRef) -> Vec<Issue> {
        self.lock()
            .repos
            .get(repo)
            .map(|issues| issues.iter().map(|stored| stored.issue.clone()).collect())
            .unwrap_or_default()
    }

    /// Returns the comments on issue `number` in `repo`.
    #[must_use]
    pub fn comments(&self, repo: &RepoRef, number: u64) -> Vec<Comment> {
        self.lock()
            .repos
            .get(repo)
            .and_then(|issues| issues.iter().find(|stored| stored.issue.number == number))
            .map(|stored| stored.comments.clone())
            .unwrap_or_default()
    }

    /// Returns every recorded call, oldest first.
    #[must_use]
    pub fn calls(&self) -> Vec<TrackerCall> {
        self.lock().calls.clone()
    }

    /// Counts recorded calls of `kind`.
    #[must_use]
    pub fn count_calls(&self, kind: CallKind) -> usize {
        self.lock()
            .calls
            .iter()
            .filter(|call| call.kind == kind)
            .count()
    }

    /// Counts recorded calls of `kind` addressed to `repo`.
    #[must_use]
    pub fn count_calls_for(&self, kind: CallKind, repo: &RepoRef) -> usize {
        self.lock()
            .calls
            .iter()
            .filter(|call| call.kind == kind && call.repo.as_ref() == Some(repo))
            .count()
    }
}

fn issue_url(repo: &RepoRef, number: u64) -> String {
    format!("https://github.test/{repo}/issues/{number}")
}

#[async_trait]
impl IssueTracker for MemoryTracker {
    async fn list_issues(
        &self,
        repo: &RepoRef,
        state: StateFilter,
        per_page: u8,
    ) -> Result<Page<Issue>, TrackerError> {
        let mut guard = self.lock();
        guard.record(CallKind::ListIssues, Some(repo), None)?;
        Ok(guard.issue_page(repo, state, per_page, 0))
    }

    async fn next_issue_page(&self, cursor: PageCursor) -> Result<Page<Issue>, TrackerError> {
        let mut guard = self.lock();
        guard.record(CallKind::NextIssuePage, None, None)?;

        let fields = cursor_fields(&cursor, "issues")?;
        let repo: RepoRef = fields[1].parse().map_err(|_| invalid_cursor(&cursor))?;
        let state: StateFilter = fields[2].parse().map_err(|_| invalid_cursor(&cursor))?;
        let per_page: u8 = fields[3].parse().map_err(|_| invalid_cursor(&cursor))?;
        let offset: usize = fields[4].parse().map_err(|_| invalid_cursor(&cursor))?;

        Ok(guard.issue_page(&repo, state, per_page, offset))
    }

    async fn create_issue(&self, repo: &RepoRef, issue: &NewIssue) -> Result<Issue, TrackerError> {
        let mut guard = self.lock();
        guard.record(CallKind::CreateIssue, Some(repo), None)?;

        let number = guard
            .repos
            .get(repo)
            .and_then(|issues| issues.iter().map(|stored| stored.issue.number).max())
            .unwrap_or(0)
            + 1;

        let created = Issue {
            number,
            title: issue.title.clone(),
            body: Some(issue.body.clone()),
            author: "issue-mover".to_string(),
            created_at: Utc::now(),
            state: IssueState::Open,
            labels: issue.labels.clone(),
            assignees: issue.assignees.clone(),
            html_url: issue_url(repo, number),
            is_pull_request: false,
        };

        guard.repos.entry(repo.clone()).or_default().push(StoredIssue {
            issue: created.clone(),
            comments: Vec::new(),
        });
        Ok(created)
    }

    async fn list_comments(
        &self,
        repo: &RepoRef,
        number: u64,
        per_page: u8,
    ) -> Result<Page<Comment>, TrackerError> {
        let mut guard = self.lock();
        guard.record(CallKind::ListComments, Some(repo), Some(number))?;
        guard.comment_page(repo, number, per_page, 0)
    }

    async fn next_comment_page(
        &self,
        cursor: PageCursor,
    ) -> Result<Page<Comment>, TrackerError> {
        let mut guard = self.lock();
        guard.record(CallKind::NextCommentPage, None, None)?;

        let fields = cursor_fields(&cursor, "comments")?;
        let repo: RepoRef = fields[1].parse().map_err(|_| invalid_cursor(&cursor))?;
        let number: u64 = fields[2].parse().map_err(|_| invalid_cursor(&cursor))?;
        let per_page: u8 = fields[3].parse().map_err(|_| invalid_cursor(&cursor))?;
        let offset: usize = fields[4].parse().map_err(|_| invalid_cursor(&cursor))?;

        guard.comment_page(&repo, number, per_page, offset)
    }

    async fn create_comment(
        &self,
        repo: &RepoRef,
        number: u64,
        body: &str,
    ) -> Result<Comment, TrackerError> {
        let mut guard = self.lock();
        guard.record(CallKind::CreateComment, Some(repo), Some(number))?;

        guard.comment_ids += 1;
        let comment = Comment {
            author: "issue-mover".to_string(),
            created_at: Utc::now(),
            body: Some(body.to_string()),
            html_url: format!("{}#issuecomment-{}", issue_url(repo, number), guard.comment_ids),
        };

        guard.issue_mut(repo, number)?.comments.push(comment.clone());
        Ok(comment)
    }

    async fn set_issue_state(
        &self,
        repo: &RepoRef,
        number: u64,
        state: IssueState,
    ) -> Result<Issue, TrackerError> {
        let mut guard = self.lock();
        guard.record(CallKind::SetIssueState, Some(repo), Some(number))?;

        let stored = guard.issue_mut(repo, number)?;
        stored.issue.state = state;
        Ok(stored.issue.clone())
    }
}
