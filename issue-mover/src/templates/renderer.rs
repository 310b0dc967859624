//! Handlebars-backed body renderer.

use super::date::pretty_rfc3339;
use super::{
    TemplateError, TemplateSet, DEFAULT_COMMENT_TEMPLATE, DEFAULT_ISSUE_TEMPLATE,
    DEFAULT_LINK_TEMPLATE,
};
use crate::tracker::{Comment, Issue};
use handlebars::{handlebars_helper, no_escape, Handlebars};
use serde_json::{json, Value};

handlebars_helper!(pretty_date_helper: |created_at: str| pretty_rfc3339(created_at));

/// Creates a configured Handlebars registry.
///
/// The registry is configured with:
/// - No HTML escaping (bodies are markdown)
/// - Strict mode (catches missing variables)
/// - `pretty_date` helper turning an RFC 3339 timestamp into `January 1st 2020, 12:00 am`
#[must_use]
pub fn create_handlebars_registry() -> Handlebars<'static> {
    let mut hbs = Handlebars::new();

    hbs.register_escape_fn(no_escape);
    hbs.set_strict_mode(true);
    hbs.register_helper("pretty_date", Box::new(pretty_date_helper));

    hbs
}

const ISSUE: &str = "issue";
const COMMENT: &str = "comment";
const LINK: &str = "link";

/// Renders issue, comment and link bodies from three named templates.
pub struct TemplateRenderer {
    handlebars: Handlebars<'static>,
}

impl TemplateRenderer {
    /// Creates a renderer using the default templates.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::RegistrationError`] if a default template does not compile.
    pub fn new() -> Result<Self, TemplateError> {
        Self::with_templates(&TemplateSet::default())
    }

    /// Creates a renderer, replacing defaults with any overrides in `set`.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::RegistrationError`] if a template does not compile.
    pub fn with_templates(set: &TemplateSet) -> Result<Self, TemplateError> {
        let mut handlebars = create_handlebars_registry();

        handlebars.register_template_string(
            ISSUE,
            set.issue.as_deref().unwrap_or(DEFAULT_ISSUE_TEMPLATE),
        )?;
        handlebars.register_template_string(
            COMMENT,
            set.comment.as_deref().unwrap_or(DEFAULT_COMMENT_TEMPLATE),
        )?;
        handlebars.register_template_string(
            LINK,
            set.link.as_deref().unwrap_or(DEFAULT_LINK_TEMPLATE),
        )?;

        Ok(Self { handlebars })
    }

    /// Renders the body of the copy of `issue`.
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails.
    pub fn render_issue_body(&self, issue: &Issue) -> Result<String, TemplateError> {
        let data = json!({
            "author": issue.author,
            "created_at": issue.created_at.to_rfc3339(),
            "body": issue.body.as_deref().unwrap_or(""),
            "html_url": issue.html_url,
            "title": issue.title,
            "number": issue.number,
        });

        self.render(ISSUE, &data)
    }

    /// Renders the body of the copy of `comment`.
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails.
    pub fn render_comment_body(&self, comment: &Comment) -> Result<String, TemplateError> {
        let data = json!({
            "author": comment.author,
            "created_at": comment.created_at.to_rfc3339(),
            "body": comment.body.as_deref().unwrap_or(""),
            "html_url": comment.html_url,
        });

        self.render(COMMENT, &data)
    }

    /// Renders the notice posted on the source issue after `new_issue` was created.
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails.
    pub fn render_link_body(&self, new_issue: &Issue) -> Result<String, TemplateError> {
        let data = json!({
            "url": new_issue.html_url,
            "number": new_issue.number,
            "title": new_issue.title,
        });

        self.render(LINK, &data)
    }

    fn render(&self, name: &str, data: &Value) -> Result<String, TemplateError> {
        Ok(self.handlebars.render(name, data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::IssueState;
    use chrono::{TimeZone, Utc};

    fn sample_issue() -> Issue {
        Issue {
            number: 7,
            title: "Crash on start".to_string(),
            body: Some("It <b>crashes</b>.".to_string()),
            author: "bob".to_string(),
            created_at: Utc.with_ymd_and_hms(2016, 11, 2, 9, 30, 0).unwrap(),
            state: IssueState::Open,
            labels: vec!["bug".to_string()],
            assignees: Vec::new(),
            html_url: "https://github.com/octo/old/issues/7".to_string(),
            is_pull_request: false,
        }
    }

    #[test]
    fn test_render_comment_body() {
        let renderer = TemplateRenderer::new().unwrap();
        let comment = Comment {
            author: "alice".to_string(),
            created_at: Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap(),
            body: Some("hi".to_string()),
            html_url: "https://github.com/octo/old/issues/7#issuecomment-1".to_string(),
        };

        let body = renderer.render_comment_body(&comment).unwrap();

        assert_eq!(body, "From @alice on January 1st 2020, 12:00 am\n\nhi");
    }

    #[test]
    fn test_render_issue_body() {
        let renderer = TemplateRenderer::new().unwrap();

        let body = renderer.render_issue_body(&sample_issue()).unwrap();

        // Should NOT escape HTML entities
        assert_eq!(
            body,
            "From @bob on November 2nd 2016, 9:30 am\n\nIt <b>crashes</b>.\n\n_Copied from original issue: https://github.com/octo/old/issues/7_"
        );
    }

    #[test]
    fn test_render_issue_without_body() {
        let renderer = TemplateRenderer::new().unwrap();
        let mut issue = sample_issue();
        issue.body = None;

        let body = renderer.render_issue_body(&issue).unwrap();

        assert!(body.contains("9:30 am\n\n\n\n_Copied from"));
    }

    #[test]
    fn test_render_link_body() {
        let renderer = TemplateRenderer::new().unwrap();
        let mut issue = sample_issue();
        issue.html_url = "https://github.com/octo/new/issues/1".to_string();

        let body = renderer.render_link_body(&issue).unwrap();

        assert_eq!(body, "This issue was moved to https://github.com/octo/new/issues/1");
    }

    #[test]
    fn test_registers_named_templates() {
        let renderer = TemplateRenderer::new().unwrap();

        for name in [ISSUE, COMMENT, LINK] {
            assert!(renderer.handlebars.has_template(name), "missing {name}");
        }
    }

    #[test]
    fn test_override_keeps_other_defaults() {
        let set = TemplateSet {
            issue: Some("{{title}}".to_string()),
            ..Default::default()
        };
        let renderer = TemplateRenderer::with_templates(&set).unwrap();

        assert_eq!(renderer.render_issue_body(&sample_issue()).unwrap(), "Crash on start");
        assert_eq!(
            renderer.render_link_body(&sample_issue()).unwrap(),
            "This issue was moved to https://github.com/octo/old/issues/7"
        );
    }

    #[test]
    fn test_custom_templates() {
        let set = TemplateSet {
            link: Some("Now tracked as #{{number}}".to_string()),
            ..Default::default()
        };
        let renderer = TemplateRenderer::with_templates(&set).unwrap();

        let body = renderer.render_link_body(&sample_issue()).unwrap();

        assert_eq!(body, "Now tracked as #7");
    }

    #[test]
    fn test_invalid_custom_template() {
        let set = TemplateSet {
            issue: Some("{{#if body}}unterminated".to_string()),
            ..Default::default()
        };

        let result = TemplateRenderer::with_templates(&set);
        assert!(matches!(result, Err(TemplateError::RegistrationError(_))));
    }

    #[test]
    fn test_strict_mode_rejects_unknown_variable() {
        let set = TemplateSet {
            link: Some("{{missing}}".to_string()),
            ..Default::default()
        };
        let renderer = TemplateRenderer::with_templates(&set).unwrap();

        let result = renderer.render_link_body(&sample_issue());
        assert!(matches!(result, Err(TemplateError::RenderError(_))));
    }
}
