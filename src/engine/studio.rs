use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::client::CompletionClient;
use super::errors::{SessionError, SessionResult};
use super::session::{Session, SessionSnapshot};
use crate::domain::completion::CompletionResult;
use crate::domain::repositories::{KeyValueStore, StorageError};
use crate::infrastructure::repositories::{CredentialStore, ResultArchive};
use crate::infrastructure::templates::TemplateStore;

/// The prompt studio: template catalogue, session and collaborators
///
/// Session state sits behind a synchronous mutex that is never held across
/// an await. The completion call runs on a snapshot taken before it starts.
pub struct Studio {
    templates: Arc<TemplateStore>,
    session: Mutex<Session>,
    client: Arc<dyn CompletionClient>,
    archive: ResultArchive,
    credentials: CredentialStore,
}

/// Clears the in-flight flag on every exit path of a generation
struct InFlightGuard<'a> {
    studio: &'a Studio,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.studio.session().abandon_generation();
    }
}

impl Studio {
    /// Opens a studio over `store`, loading the saved credential
    pub fn open(
        templates: Arc<TemplateStore>,
        client: Arc<dyn CompletionClient>,
        store: Arc<dyn KeyValueStore>,
    ) -> SessionResult<Self> {
        let credentials = CredentialStore::new(store.clone());
        let credential = credentials.load()?;

        tracing::info!(
            templates = templates.len(),
            has_credential = credential.is_some(),
            "Studio session opened"
        );

        Ok(Self {
            templates,
            session: Mutex::new(Session::new(credential)),
            client,
            archive: ResultArchive::new(store),
            credentials,
        })
    }

    fn session(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn templates(&self) -> &TemplateStore {
        &self.templates
    }

    pub fn archive(&self) -> &ResultArchive {
        &self.archive
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.session().snapshot()
    }

    /// Selects a template by id, resetting the form
    pub fn select_template(&self, id: &str) -> SessionResult<SessionSnapshot> {
        let template = self
            .templates
            .get(id)
            .ok_or_else(|| SessionError::TemplateNotFound(id.to_string()))?;

        let mut session = self.session();
        session.select_template(template);
        tracing::debug!(template = %id, "Template selected");
        Ok(session.snapshot())
    }

    pub fn set_field(&self, id: &str, value: impl Into<String>) -> SessionResult<SessionSnapshot> {
        let mut session = self.session();
        session.set_field(id, value)?;
        Ok(session.snapshot())
    }

    /// Updates the credential and persists it immediately
    pub fn set_credential(&self, value: impl Into<String>) -> SessionResult<SessionSnapshot> {
        let value = value.into();
        self.credentials.save(&value)?;

        let mut session = self.session();
        session.set_credential(value);
        Ok(session.snapshot())
    }

    /// The prompt the current form would produce
    pub fn prompt(&self) -> SessionResult<String> {
        self.session().prompt()
    }

    /// Runs one generation: preconditions, completion call, archive
    ///
    /// # Returns
    /// * `Ok(CompletionResult)` - The archived result
    /// * `Err(SessionError)` - Precondition, in-flight, completion or storage failure
    pub async fn generate(&self) -> SessionResult<CompletionResult> {
        let ticket = self.session().begin_generation()?;
        let _guard = InFlightGuard { studio: self };

        tracing::info!(template = %ticket.template_id, "Generating completion");

        match self.client.complete(&ticket.prompt, &ticket.credential).await {
            Ok(text) => {
                self.session().finish_generation(Ok(text.as_str()));
                let result = CompletionResult::new(ticket.template_id, ticket.field_values, text);

                // File-backed stores block on disk writes
                let archive = self.archive.clone();
                let record = result.clone();
                tokio::task::spawn_blocking(move || archive.record(&record))
                    .await
                    .map_err(|e| StorageError::Task(e.to_string()))??;
                Ok(result)
            }
            Err(err) => {
                tracing::warn!(error = %err, "Generation failed");
                self.session().finish_generation(Err(&err));
                Err(err.into())
            }
        }
    }
}
