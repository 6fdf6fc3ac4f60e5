//! Template renderer contract.
//!
//! # Responsibility
//! - Define what a renderer receives and returns.
//! - Register renderers by template id and validate template ids.
//!
//! # Invariants
//! - Renderers borrow the document immutably; they cannot mutate it.
//! - Entries with `visible == Some(false)` are excluded from output.
//! - Template ids are lowercase `[a-z0-9._-]`, 1..=64 chars, starting with
//!   a letter or digit.

mod plain_text;
mod registry;

pub use plain_text::PlainTextTemplate;
pub use registry::{is_valid_template_id, TemplateRegistry, TemplateRegistryError};

use crate::model::document::ResumeDocument;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Render-time preferences that are not part of the document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Split output into fixed-size pages instead of one continuous page.
    pub page_wrap: bool,
}

/// Paginated renderer output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    pub template_id: String,
    /// Always at least one page.
    pub pages: Vec<String>,
}

impl RenderedDocument {
    /// All pages joined with form feeds.
    pub fn to_text(&self) -> String {
        self.pages.join("\u{000C}\n")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    UnknownTemplate(String),
    Failed { template_id: String, message: String },
}

impl Display for RenderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownTemplate(id) => write!(f, "no renderer registered for template `{id}`"),
            Self::Failed {
                template_id,
                message,
            } => write!(f, "template `{template_id}` failed to render: {message}"),
        }
    }
}

impl Error for RenderError {}

/// Pure function from a finished document to rendered output.
pub trait TemplateRenderer {
    /// Template id this renderer answers to.
    fn id(&self) -> &str;

    fn render(
        &self,
        document: &ResumeDocument,
        options: RenderOptions,
    ) -> Result<RenderedDocument, RenderError>;
}
