// Prompt generation
//
// Substitutes field values into a template's prompt skeleton. Each marker
// is resolved once against the original skeleton, so text inside a value
// that looks like a marker is inserted verbatim.

use std::collections::HashMap;

use regex::Captures;

use crate::domain::completion::FieldValues;
use crate::domain::template::{marker_pattern, Placeholder, Template};

/// Builds the final prompt for `template` from the user's `values`
///
/// Missing values count as empty. Per placeholder:
/// - required: the marker becomes the value verbatim
/// - optional and empty: the marker is removed, surrounding text is kept
/// - optional and filled: the marker becomes `## <label>\n<value>\n\n`
///
/// # Example
/// ```
/// use framework_prompt_studio::domain::completion::FieldValues;
/// use framework_prompt_studio::domain::template::Template;
/// use framework_prompt_studio::engine::prompts::generate;
///
/// let template = Template::from_json(r#"{
///     "id": "t", "name": "T", "description": "",
///     "placeholders": [{"id": "a", "label": "A", "type": "text", "placeholder": ""}],
///     "promptTemplate": "Hello {a}!"
/// }"#).unwrap();
///
/// let mut values = FieldValues::new();
/// values.insert("a".to_string(), "World".to_string());
///
/// assert_eq!(generate(&template, &values), "Hello World!");
/// ```
pub fn generate(template: &Template, values: &FieldValues) -> String {
    if template.placeholders().is_empty() {
        return template.prompt_template().to_string();
    }

    let replacements: HashMap<&str, String> = template
        .placeholders()
        .iter()
        .map(|placeholder| {
            let value = values.get(&placeholder.id).map(String::as_str).unwrap_or("");
            (placeholder.id.as_str(), replacement(placeholder, value))
        })
        .collect();

    marker_pattern()
        .replace_all(template.prompt_template(), |caps: &Captures| {
            match replacements.get(&caps[1]) {
                Some(text) => text.clone(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

fn replacement(placeholder: &Placeholder, value: &str) -> String {
    match (placeholder.optional, value.is_empty()) {
        (false, _) => value.to_string(),
        (true, true) => String::new(),
        (true, false) => format!("## {}\n{}\n\n", placeholder.label, value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::template::PlaceholderKind;

    fn placeholder(id: &str, label: &str, optional: bool) -> Placeholder {
        Placeholder {
            id: id.to_string(),
            label: label.to_string(),
            kind: PlaceholderKind::MultiLine,
            hint: String::new(),
            optional,
        }
    }

    fn values(pairs: &[(&str, &str)]) -> FieldValues {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn zero_placeholders_returns_skeleton_unchanged() {
        let template = Template::new("t", "T", "", vec![], "Plain prompt with {braces }").unwrap();

        assert_eq!(generate(&template, &values(&[("a", "x")])), "Plain prompt with {braces }");
    }

    #[test]
    fn required_value_replaces_marker() {
        let template =
            Template::new("t", "T", "", vec![placeholder("a", "A", false)], "Hello {a}!").unwrap();

        assert_eq!(generate(&template, &values(&[("a", "World")])), "Hello World!");
    }

    #[test]
    fn required_marker_replaced_everywhere() {
        let template = Template::new(
            "t",
            "T",
            "",
            vec![placeholder("a", "A", false)],
            "{a}, {a} and {a}",
        )
        .unwrap();

        let prompt = generate(&template, &values(&[("a", "X")]));

        assert_eq!(prompt, "X, X and X");
        assert!(!prompt.contains("{a}"));
    }

    #[test]
    fn missing_required_value_is_empty() {
        let template =
            Template::new("t", "T", "", vec![placeholder("a", "A", false)], "[{a}]").unwrap();

        assert_eq!(generate(&template, &FieldValues::new()), "[]");
    }

    #[test]
    fn empty_optional_is_elided() {
        let template = Template::new(
            "t",
            "T",
            "",
            vec![placeholder("b", "Notes", true)],
            "Intro.\n{b}End.",
        )
        .unwrap();

        assert_eq!(generate(&template, &FieldValues::new()), "Intro.\nEnd.");
    }

    #[test]
    fn empty_optional_keeps_surrounding_blank_lines() {
        let template = Template::new(
            "t",
            "T",
            "",
            vec![placeholder("b", "Notes", true)],
            "Intro.\n\n{b}\n\nEnd.",
        )
        .unwrap();

        assert_eq!(generate(&template, &FieldValues::new()), "Intro.\n\n\n\nEnd.");
    }

    #[test]
    fn filled_optional_becomes_labeled_block() {
        let template = Template::new(
            "t",
            "T",
            "",
            vec![placeholder("b", "Label", true)],
            "Intro.\n{b}End.",
        )
        .unwrap();

        assert_eq!(
            generate(&template, &values(&[("b", "Y")])),
            "Intro.\n## Label\nY\n\nEnd."
        );
    }

    #[test]
    fn marker_like_values_are_not_substituted() {
        let template = Template::new(
            "t",
            "T",
            "",
            vec![placeholder("a", "A", false), placeholder("b", "B", false)],
            "{a} / {b}",
        )
        .unwrap();

        let prompt = generate(&template, &values(&[("a", "{b}"), ("b", "{a}")]));

        assert_eq!(prompt, "{b} / {a}");
    }

    #[test]
    fn mixed_placeholders() {
        let template = Template::new(
            "t",
            "T",
            "",
            vec![
                placeholder("company", "Company", false),
                placeholder("goal", "Goal", true),
                placeholder("notes", "Notes", true),
            ],
            "Company: {company}\n\n{goal}{notes}Done.",
        )
        .unwrap();

        let prompt = generate(&template, &values(&[("company", "Acme"), ("goal", "Grow")]));

        assert_eq!(prompt, "Company: Acme\n\n## Goal\nGrow\n\nDone.");
    }
}
