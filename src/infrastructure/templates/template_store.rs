use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use futures::future::try_join_all;

use crate::domain::template::{Template, TemplateError, TemplateResult};

/// Template documents making up the framework catalogue, in display order
pub const TEMPLATE_FILES: [&str; 4] = ["bmc.json", "swot.json", "3c.json", "user-story-map.json"];

/// Immutable catalogue of validated templates
#[derive(Debug, Clone, Default)]
pub struct TemplateStore {
    templates: Vec<Arc<Template>>,
}

impl TemplateStore {
    /// Builds a store from already-validated templates
    ///
    /// # Returns
    /// * `Err(TemplateError::DuplicateTemplate)` - If two templates share an id
    pub fn from_templates(templates: Vec<Template>) -> TemplateResult<Self> {
        let mut seen = HashSet::new();
        for template in &templates {
            if !seen.insert(template.id().to_string()) {
                return Err(TemplateError::DuplicateTemplate(template.id().to_string()));
            }
        }

        Ok(Self {
            templates: templates.into_iter().map(Arc::new).collect(),
        })
    }

    /// Loads every file of `TEMPLATE_FILES` from `dir`
    pub async fn load_dir(dir: impl AsRef<Path>) -> TemplateResult<Self> {
        Self::load_files(dir, &TEMPLATE_FILES).await
    }

    /// Loads the named files from `dir` concurrently
    ///
    /// All reads run in parallel and the batch fails as a whole: a file
    /// that cannot be read, parsed or validated yields no store at all.
    pub async fn load_files(dir: impl AsRef<Path>, files: &[&str]) -> TemplateResult<Self> {
        let dir = dir.as_ref();
        let loads = files.iter().map(|file| async move {
            let path = dir.join(file);
            let raw = tokio::fs::read_to_string(&path)
                .await
                .map_err(|e| TemplateError::Load {
                    file: file.to_string(),
                    reason: e.to_string(),
                })?;
            Template::from_json(&raw).map_err(|e| TemplateError::Load {
                file: file.to_string(),
                reason: e.to_string(),
            })
        });

        let templates = try_join_all(loads).await?;
        let store = Self::from_templates(templates)?;

        tracing::info!(count = store.len(), dir = %dir.display(), "Loaded templates");
        Ok(store)
    }

    pub fn all(&self) -> &[Arc<Template>] {
        &self.templates
    }

    pub fn get(&self, id: &str) -> Option<Arc<Template>> {
        self.templates.iter().find(|t| t.id() == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
