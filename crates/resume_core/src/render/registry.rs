//! In-process template renderer registry.

use super::plain_text::{PlainTextTemplate, BUILTIN_TEMPLATE_IDS};
use super::{RenderError, RenderOptions, RenderedDocument, TemplateRenderer};
use crate::model::document::ResumeDocument;
use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

static TEMPLATE_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9][a-z0-9._-]{0,63}$").expect("valid template id regex"));

/// Returns whether `value` is an acceptable template id.
pub fn is_valid_template_id(value: &str) -> bool {
    TEMPLATE_ID_RE.is_match(value)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateRegistryError {
    InvalidTemplateId(String),
    DuplicateTemplateId(String),
}

impl Display for TemplateRegistryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTemplateId(value) => write!(f, "template id is invalid: {value}"),
            Self::DuplicateTemplateId(value) => {
                write!(f, "template id already registered: {value}")
            }
        }
    }
}

impl Error for TemplateRegistryError {}

/// Renderers keyed by template id.
#[derive(Default)]
pub struct TemplateRegistry {
    renderers: BTreeMap<String, Arc<dyn TemplateRenderer>>,
}

impl TemplateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with the built-in renderers.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        for template_id in BUILTIN_TEMPLATE_IDS {
            if let Err(err) = registry.register(Arc::new(PlainTextTemplate::new(template_id))) {
                warn!("event=template_register module=render status=error error={err}");
            }
        }
        registry
    }

    pub fn register(
        &mut self,
        renderer: Arc<dyn TemplateRenderer>,
    ) -> Result<(), TemplateRegistryError> {
        let template_id = renderer.id().trim().to_string();
        if !is_valid_template_id(&template_id) {
            return Err(TemplateRegistryError::InvalidTemplateId(template_id));
        }
        if self.renderers.contains_key(template_id.as_str()) {
            return Err(TemplateRegistryError::DuplicateTemplateId(template_id));
        }

        self.renderers.insert(template_id, renderer);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.renderers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.renderers.is_empty()
    }

    /// Returns sorted template ids.
    pub fn template_ids(&self) -> Vec<String> {
        self.renderers.keys().cloned().collect()
    }

    pub fn get(&self, template_id: &str) -> Option<Arc<dyn TemplateRenderer>> {
        self.renderers.get(template_id.trim()).cloned()
    }

    /// Renders `document` with the template stored in its metadata.
    pub fn render(
        &self,
        document: &ResumeDocument,
        options: RenderOptions,
    ) -> Result<RenderedDocument, RenderError> {
        let template_id = document.metadata.template_id.as_str();
        let renderer = self
            .get(template_id)
            .ok_or_else(|| RenderError::UnknownTemplate(template_id.to_string()))?;
        renderer.render(document, options)
    }
}

#[cfg(test)]
mod tests {
    use super::{is_valid_template_id, TemplateRegistry, TemplateRegistryError};
    use crate::render::PlainTextTemplate;
    use std::sync::Arc;

    #[test]
    fn template_id_validation() {
        assert!(is_valid_template_id("classic"));
        assert!(is_valid_template_id("modern-2.column_a"));
        assert!(!is_valid_template_id(""));
        assert!(!is_valid_template_id("-leading"));
        assert!(!is_valid_template_id("Upper"));
        assert!(!is_valid_template_id(&"a".repeat(65)));
    }

    #[test]
    fn register_rejects_duplicates_and_invalid_ids() {
        let mut registry = TemplateRegistry::new();
        registry
            .register(Arc::new(PlainTextTemplate::new("plain")))
            .unwrap();

        let err = registry
            .register(Arc::new(PlainTextTemplate::new("plain")))
            .unwrap_err();
        assert_eq!(err, TemplateRegistryError::DuplicateTemplateId("plain".into()));

        let err = registry
            .register(Arc::new(PlainTextTemplate::new("Bad Id")))
            .unwrap_err();
        assert_eq!(err, TemplateRegistryError::InvalidTemplateId("Bad Id".into()));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn builtin_registry_lists_sorted_ids() {
        let registry = TemplateRegistry::with_builtin();
        assert_eq!(registry.template_ids(), vec!["classic", "plain"]);
    }
}
