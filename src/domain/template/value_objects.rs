use serde::{Deserialize, Serialize};

/// Input widget a placeholder is rendered with
///
/// Serialized with the wire names used by the template files:
/// `"text"` for a single-line input and `"textarea"` for a multi-line one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaceholderKind {
    /// One-line text input
    #[serde(rename = "text")]
    SingleLine,
    /// Multi-line text area
    #[serde(rename = "textarea")]
    MultiLine,
}

impl std::fmt::Display for PlaceholderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlaceholderKind::SingleLine => write!(f, "single-line"),
            PlaceholderKind::MultiLine => write!(f, "multi-line"),
        }
    }
}

/// One user-fillable field of a template
///
/// # Example
/// ```
/// use framework_prompt_studio::domain::template::value_objects::{Placeholder, PlaceholderKind};
///
/// let placeholder: Placeholder = serde_json::from_str(
///     r#"{"id":"notes","label":"Notes","type":"textarea","placeholder":"Anything else?","optional":true}"#,
/// ).expect("valid placeholder");
///
/// assert_eq!(placeholder.kind, PlaceholderKind::MultiLine);
/// assert_eq!(placeholder.marker(), "{notes}");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placeholder {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: PlaceholderKind,
    /// Example text shown inside the empty input
    #[serde(rename = "placeholder")]
    pub hint: String,
    #[serde(default)]
    pub optional: bool,
}

impl Placeholder {
    /// The literal token this placeholder occupies in a prompt template
    pub fn marker(&self) -> String {
        format!("{{{}}}", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_defaults_to_false() {
        let placeholder: Placeholder = serde_json::from_str(
            r#"{"id":"product","label":"Product","type":"text","placeholder":"e.g. a todo app"}"#,
        )
        .unwrap();

        assert!(!placeholder.optional);
        assert_eq!(placeholder.kind, PlaceholderKind::SingleLine);
        assert_eq!(placeholder.hint, "e.g. a todo app");
    }

    #[test]
    fn missing_label_is_rejected() {
        let result: Result<Placeholder, _> =
            serde_json::from_str(r#"{"id":"product","type":"text","placeholder":""}"#);

        assert!(result.is_err());
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let result: Result<Placeholder, _> = serde_json::from_str(
            r#"{"id":"product","label":"Product","type":"select","placeholder":""}"#,
        );

        assert!(result.is_err());
    }

    #[test]
    fn kind_display() {
        assert_eq!(PlaceholderKind::SingleLine.to_string(), "single-line");
        assert_eq!(PlaceholderKind::MultiLine.to_string(), "multi-line");
    }
}
