use std::sync::Arc;

use serde::Serialize;

use super::errors::{CompletionError, SessionError, SessionResult};
use super::prompts::generate;
use crate::domain::completion::FieldValues;
use crate::domain::template::Template;

/// Everything a completion call needs, captured before the call starts
#[derive(Debug, Clone)]
pub struct GenerationTicket {
    pub template_id: String,
    pub field_values: FieldValues,
    pub prompt: String,
    pub credential: String,
}

/// Interaction state of the single user
///
/// # State Transitions
/// ```text
/// Idle --begin_generation--> InFlight --finish_generation--> Idle
/// ```
/// Field edits are allowed at any time; the prompt for a generation is
/// snapshotted when it begins.
#[derive(Debug, Clone, Default)]
pub struct Session {
    selected: Option<Arc<Template>>,
    values: FieldValues,
    credential: String,
    output: String,
    error: Option<String>,
    in_flight: bool,
}

/// Serializable view of a session
///
/// Reports whether a credential is set without ever carrying its value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub template_id: Option<String>,
    pub field_values: FieldValues,
    pub has_credential: bool,
    pub output: String,
    pub error: Option<String>,
    pub in_flight: bool,
}

impl Session {
    /// Starts a session with the credential loaded from storage
    pub fn new(credential: Option<String>) -> Self {
        Self {
            credential: credential.unwrap_or_default(),
            ..Self::default()
        }
    }

    /// Selects `template`, resetting every field to empty and clearing output
    pub fn select_template(&mut self, template: Arc<Template>) {
        self.values = template
            .placeholders()
            .iter()
            .map(|p| (p.id.clone(), String::new()))
            .collect();
        self.selected = Some(template);
        self.output.clear();
        self.error = None;
    }

    /// Updates one field of the selected template
    pub fn set_field(&mut self, id: &str, value: impl Into<String>) -> SessionResult<()> {
        let template = self.selected.as_ref().ok_or(SessionError::NoTemplateSelected)?;
        if template.placeholder(id).is_none() {
            return Err(SessionError::UnknownField {
                template: template.id().to_string(),
                field: id.to_string(),
            });
        }

        self.values.insert(id.to_string(), value.into());
        Ok(())
    }

    pub fn set_credential(&mut self, value: impl Into<String>) {
        self.credential = value.into();
    }

    pub fn selected(&self) -> Option<&Arc<Template>> {
        self.selected.as_ref()
    }

    pub fn field_values(&self) -> &FieldValues {
        &self.values
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// The prompt the current field values would produce
    pub fn prompt(&self) -> SessionResult<String> {
        let template = self.selected.as_ref().ok_or(SessionError::NoTemplateSelected)?;
        Ok(generate(template, &self.values))
    }

    /// Checks preconditions and snapshots the request, entering the in-flight state
    ///
    /// # Returns
    /// * `Err(SessionError::AlreadyInFlight)` - If a generation is pending
    /// * `Err(CompletionError::MissingCredential)` - If no credential is set
    /// * `Err(CompletionError::MissingTemplate)` - If no template is selected
    ///
    /// Precondition failures are also recorded as the session error.
    pub fn begin_generation(&mut self) -> SessionResult<GenerationTicket> {
        if self.in_flight {
            return Err(SessionError::AlreadyInFlight);
        }

        let precondition = if self.credential.is_empty() {
            Some(CompletionError::MissingCredential)
        } else if self.selected.is_none() {
            Some(CompletionError::MissingTemplate)
        } else {
            None
        };
        if let Some(err) = precondition {
            self.error = Some(err.to_string());
            return Err(err.into());
        }

        let template = self.selected.as_ref().ok_or(CompletionError::MissingTemplate)?;
        let ticket = GenerationTicket {
            template_id: template.id().to_string(),
            field_values: self.values.clone(),
            prompt: generate(template, &self.values),
            credential: self.credential.clone(),
        };

        self.in_flight = true;
        self.error = None;
        Ok(ticket)
    }

    /// Leaves the in-flight state, recording the outcome
    pub fn finish_generation(&mut self, outcome: Result<&str, &CompletionError>) {
        self.in_flight = false;
        match outcome {
            Ok(text) => self.output = text.to_string(),
            Err(err) => self.error = Some(err.to_string()),
        }
    }

    /// Leaves the in-flight state without touching output or error
    pub fn abandon_generation(&mut self) {
        self.in_flight = false;
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            template_id: self.selected.as_ref().map(|t| t.id().to_string()),
            field_values: self.values.clone(),
            has_credential: !self.credential.is_empty(),
            output: self.output.clone(),
            error: self.error.clone(),
            in_flight: self.in_flight,
        }
    }
}
