//! GitHub backend built on octocrab.

use super::{
    Comment, Issue, IssueState, IssueTracker, NewIssue, Page, PageCursor, StateFilter,
    TrackerError,
};
use crate::repository::RepoRef;
use async_trait::async_trait;
use octocrab::models::issues;
use octocrab::{params, Octocrab};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Per-request timeout applied to connect, read and write.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// [`IssueTracker`] backed by the GitHub REST API.
#[derive(Clone)]
pub struct GitHubTracker {
    octocrab: Octocrab,
}

impl GitHubTracker {
    /// Builds an authenticated client from a personal access token.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::GitHub`] if the HTTP client cannot be built.
    pub fn new(token: impl Into<String>) -> Result<Self, TrackerError> {
        let octocrab = Octocrab::builder()
            .personal_token(token.into())
            .set_connect_timeout(Some(REQUEST_TIMEOUT))
            .set_read_timeout(Some(REQUEST_TIMEOUT))
            .set_write_timeout(Some(REQUEST_TIMEOUT))
            .build()?;
        Ok(Self { octocrab })
    }

    /// Wraps an already configured octocrab instance.
    #[must_use]
    pub fn from_octocrab(octocrab: Octocrab) -> Self {
        Self { octocrab }
    }

    async fn fetch_page<T, U>(
        &self,
        cursor: PageCursor,
        convert: fn(T) -> U,
    ) -> Result<Page<U>, TrackerError>
    where
        T: DeserializeOwned,
    {
        let uri = cursor
            .as_str()
            .parse()
            .map_err(|_| TrackerError::InvalidCursor {
                cursor: cursor.as_str().to_string(),
                message: "not a valid URI".to_string(),
            })?;

        debug!(cursor = cursor.as_str(), "Fetching next page");
        match self.octocrab.get_page::<T>(&Some(uri)).await? {
            Some(page) => Ok(convert_page(page, convert)),
            None => Ok(Page::last(Vec::new())),
        }
    }
}

#[async_trait]
impl IssueTracker for GitHubTracker {
    async fn list_issues(
        &self,
        repo: &RepoRef,
        state: StateFilter,
        per_page: u8,
    ) -> Result<Page<Issue>, TrackerError> {
        debug!(repo = %repo, state = %state, "Listing issues");
        let state = match state {
            StateFilter::Open => params::State::Open,
            StateFilter::Closed => params::State::Closed,
            StateFilter::All => params::State::All,
        };

        let page = self
            .octocrab
            .issues(&repo.owner, &repo.name)
            .list()
            .state(state)
            .per_page(per_page)
            .send()
            .await?;

        Ok(convert_page(page, convert_issue))
    }

    async fn next_issue_page(&self, cursor: PageCursor) -> Result<Page<Issue>, TrackerError> {
        self.fetch_page(cursor, convert_issue).await
    }

    async fn create_issue(&self, repo: &RepoRef, issue: &NewIssue) -> Result<Issue, TrackerError> {
        debug!(repo = %repo, title = %issue.title, "Creating issue");
        let created = self
            .octocrab
            .issues(&repo.owner, &repo.name)
            .create(&issue.title)
            .body(&issue.body)
            .labels(issue.labels.clone())
            .assignees(issue.assignees.clone())
            .send()
            .await?;

        Ok(convert_issue(created))
    }

    async fn list_comments(
        &self,
        repo: &RepoRef,
        number: u64,
        per_page: u8,
    ) -> Result<Page<Comment>, TrackerError> {
        debug!(repo = %repo, issue_number = number, "Listing comments");
        let page = self
            .octocrab
            .issues(&repo.owner, &repo.name)
            .list_comments(number)
            .per_page(per_page)
            .send()
            .await?;

        Ok(convert_page(page, convert_comment))
    }

    async fn next_comment_page(
        &self,
        cursor: PageCursor,
    ) -> Result<Page<Comment>, TrackerError> {
        self.fetch_page(cursor, convert_comment).await
    }

    async fn create_comment(
        &self,
        repo: &RepoRef,
        number: u64,
        body: &str,
    ) -> Result<Comment, TrackerError> {
        debug!(repo = %repo, issue_number = number, "Creating comment");
        let comment = self
            .octocrab
            .issues(&repo.owner, &repo.name)
            .create_comment(number, body)
            .await?;

        Ok(convert_comment(comment))
    }

    async fn set_issue_state(
        &self,
        repo: &RepoRef,
        number: u64,
        state: IssueState,
    ) -> Result<Issue, TrackerError> {
        debug!(repo = %repo, issue_number = number, state = state.as_str(), "Editing issue state");
        let state = match state {
            IssueState::Open => octocrab::models::IssueState::Open,
            IssueState::Closed => octocrab::models::IssueState::Closed,
        };

        let issue = self
            .octocrab
            .issues(&repo.owner, &repo.name)
            .update(number)
            .state(state)
            .send()
            .await?;

        Ok(convert_issue(issue))
    }
}

fn convert_page<T, U>(page: octocrab::Page<T>, convert: fn(T) -> U) -> Page<U> {
    Page {
        next: page.next.map(|uri| PageCursor::new(uri.to_string())),
        items: page.items.into_iter().map(convert).collect(),
    }
}

fn convert_issue(issue: issues::Issue) -> Issue {
    let state = match issue.state {
        octocrab::models::IssueState::Closed => IssueState::Closed,
        _ => IssueState::Open,
    };

    Issue {
        number: issue.number,
        title: issue.title,
        body: issue.body,
        author: issue.user.login,
        created_at: issue.created_at,
        state,
        labels: issue.labels.into_iter().map(|label| label.name).collect(),
        assignees: issue
            .assignees
            .into_iter()
            .map(|assignee| assignee.login)
            .collect(),
        html_url: issue.html_url.to_string(),
        is_pull_request: issue.pull_request.is_some(),
    }
}

fn convert_comment(comment: issues::Comment) -> Comment {
    Comment {
        author: comment.user.login,
        created_at: comment.created_at,
        body: comment.body,
        html_url: comment.html_url.to_string(),
    }
}
