//! Body templates for copied issues, copied comments and move notices.
//!
//! Bodies are rendered with Handlebars. Each template can be overridden
//! through [`TemplateSet`]; the defaults attribute the original author and
//! link back to the original issue.

mod date;
mod error;
mod renderer;

pub use date::pretty_date;
pub use error::TemplateError;
pub use renderer::{create_handlebars_registry, TemplateRenderer};

use serde::Deserialize;

/// Default body for the copied issue.
pub const DEFAULT_ISSUE_TEMPLATE: &str = "From @{{author}} on {{pretty_date created_at}}\n\n{{body}}\n\n_Copied from original issue: {{html_url}}_";

/// Default body for each copied comment.
pub const DEFAULT_COMMENT_TEMPLATE: &str = "From @{{author}} on {{pretty_date created_at}}\n\n{{body}}";

/// Default comment left on the source issue.
pub const DEFAULT_LINK_TEMPLATE: &str = "This issue was moved to {{url}}";

/// Optional overrides for the three body templates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct TemplateSet {
    /// Copied issue body. Variables: `author`, `created_at`, `body`, `html_url`, `title`, `number`.
    pub issue: Option<String>,

    /// Copied comment body. Variables: `author`, `created_at`, `body`, `html_url`.
    pub comment: Option<String>,

    /// Move notice on the source issue. Variables: `url`, `number`, `title`.
    pub link: Option<String>,
}
