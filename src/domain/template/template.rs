use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::value_objects::Placeholder;

/// Errors raised while building or loading templates
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Malformed template JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Placeholder id must be non-empty ASCII letters, digits, '_' or '-': {0:?}")]
    InvalidPlaceholderId(String),

    #[error("Duplicate placeholder id '{placeholder}' in template '{template}'")]
    DuplicatePlaceholder { template: String, placeholder: String },

    #[error("Template '{template}' references undeclared marker '{{{marker}}}'")]
    UndeclaredMarker { template: String, marker: String },

    #[error("Duplicate template id: {0}")]
    DuplicateTemplate(String),

    #[error("Failed to load template file {file}: {reason}")]
    Load { file: String, reason: String },
}

pub type TemplateResult<T> = Result<T, TemplateError>;

/// Matches a `{id}` marker, capturing the id
pub fn marker_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\{([A-Za-z0-9_\-]+)\}").expect("static marker pattern"))
}

fn is_valid_placeholder_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// A business-analysis framework definition
///
/// Combines display text, an ordered placeholder list and the prompt
/// skeleton the placeholders are substituted into.
///
/// # Invariants
/// - Placeholder ids are unique, non-empty and drawn from `[A-Za-z0-9_-]`,
///   so no marker can contain another
/// - Every `{id}` marker in the prompt skeleton names a declared placeholder
///
/// # Example
/// ```
/// use framework_prompt_studio::domain::template::Template;
///
/// let template = Template::from_json(r#"{
///     "id": "t",
///     "name": "Greeting",
///     "description": "Says hello",
///     "placeholders": [{"id": "a", "label": "Name", "type": "text", "placeholder": ""}],
///     "promptTemplate": "Hello {a}!"
/// }"#).expect("valid template");
///
/// assert_eq!(template.id(), "t");
/// assert_eq!(template.placeholders().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    id: String,
    name: String,
    description: String,
    placeholders: Vec<Placeholder>,
    prompt_template: String,
}

impl Template {
    /// Creates a validated template
    ///
    /// # Returns
    /// * `Ok(Template)` - Template satisfying all invariants
    /// * `Err(TemplateError)` - If a placeholder id is invalid or duplicated,
    ///   or the skeleton references an undeclared marker
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        placeholders: Vec<Placeholder>,
        prompt_template: impl Into<String>,
    ) -> TemplateResult<Self> {
        let template = Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            placeholders,
            prompt_template: prompt_template.into(),
        };
        template.validate()?;
        Ok(template)
    }

    /// Parses and validates a template document
    pub fn from_json(json: &str) -> TemplateResult<Self> {
        let template: Template = serde_json::from_str(json)?;
        template.validate()?;
        Ok(template)
    }

    fn validate(&self) -> TemplateResult<()> {
        let mut seen = HashSet::new();
        for placeholder in &self.placeholders {
            let id = placeholder.id.as_str();
            if !is_valid_placeholder_id(id) {
                return Err(TemplateError::InvalidPlaceholderId(id.to_string()));
            }
            if !seen.insert(id) {
                return Err(TemplateError::DuplicatePlaceholder {
                    template: self.id.clone(),
                    placeholder: id.to_string(),
                });
            }
        }

        for captures in marker_pattern().captures_iter(&self.prompt_template) {
            let marker = &captures[1];
            if !seen.contains(marker) {
                return Err(TemplateError::UndeclaredMarker {
                    template: self.id.clone(),
                    marker: marker.to_string(),
                });
            }
        }

        Ok(())
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn placeholders(&self) -> &[Placeholder] {
        &self.placeholders
    }

    pub fn prompt_template(&self) -> &str {
        &self.prompt_template
    }

    /// Finds a declared placeholder by id
    pub fn placeholder(&self, id: &str) -> Option<&Placeholder> {
        self.placeholders.iter().find(|p| p.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::template::value_objects::PlaceholderKind;

    fn placeholder(id: &str) -> Placeholder {
        Placeholder {
            id: id.to_string(),
            label: id.to_uppercase(),
            kind: PlaceholderKind::SingleLine,
            hint: String::new(),
            optional: false,
        }
    }

    #[test]
    fn accepts_declared_markers() {
        let template = Template::new(
            "swot",
            "SWOT",
            "Strengths and weaknesses",
            vec![placeholder("company"), placeholder("market")],
            "Analyse {company} in {market}. Again: {company}.",
        );

        assert!(template.is_ok());
    }

    #[test]
    fn accepts_unused_placeholder() {
        let template = Template::new("t", "T", "", vec![placeholder("unused")], "No markers");

        assert!(template.is_ok());
    }

    #[test]
    fn rejects_undeclared_marker() {
        let result = Template::new("t", "T", "", vec![placeholder("a")], "{a} and {b}");

        match result {
            Err(TemplateError::UndeclaredMarker { template, marker }) => {
                assert_eq!(template, "t");
                assert_eq!(marker, "b");
            }
            other => panic!("expected undeclared marker error, got {:?}", other),
        }
    }

    #[test]
    fn ignores_braces_that_are_not_markers() {
        let template = Template::new(
            "t",
            "T",
            "",
            vec![placeholder("a")],
            "Answer as JSON like { \"key\": 1 } about {a}",
        );

        assert!(template.is_ok());
    }

    #[test]
    fn rejects_duplicate_placeholder() {
        let result = Template::new("t", "T", "", vec![placeholder("a"), placeholder("a")], "{a}");

        assert!(matches!(
            result,
            Err(TemplateError::DuplicatePlaceholder { .. })
        ));
    }

    #[test]
    fn rejects_ids_outside_marker_alphabet() {
        assert!(matches!(
            Template::new("t", "T", "", vec![placeholder("")], ""),
            Err(TemplateError::InvalidPlaceholderId(_))
        ));
        assert!(matches!(
            Template::new("t", "T", "", vec![placeholder("{a}")], ""),
            Err(TemplateError::InvalidPlaceholderId(_))
        ));
        assert!(matches!(
            Template::new("t", "T", "", vec![placeholder("a b")], ""),
            Err(TemplateError::InvalidPlaceholderId(_))
        ));
    }

    #[test]
    fn from_json_rejects_missing_prompt_template() {
        let result = Template::from_json(
            r#"{"id":"t","name":"T","description":"","placeholders":[]}"#,
        );

        assert!(matches!(result, Err(TemplateError::Parse(_))));
    }

    #[test]
    fn placeholder_lookup() {
        let template = Template::new("t", "T", "", vec![placeholder("a")], "{a}").unwrap();

        assert!(template.placeholder("a").is_some());
        assert!(template.placeholder("b").is_none());
    }
}
