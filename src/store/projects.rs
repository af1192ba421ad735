use std::sync::Arc;

use log::{debug, error, info, warn};
use serde_json::Value;

use crate::api::{ApiError, PortfolioApi, Scope};
use crate::models::{DeleteConfirmation, Project, ProjectDraft, ProjectPatch};

pub struct ProjectsStore<A> {
    api: Arc<A>,
    scope: Scope,
    projects: Vec<Project>,
}

impl<A: PortfolioApi> ProjectsStore<A> {
    pub fn new(api: Arc<A>, scope: Scope) -> Self {
        Self {
            api,
            scope,
            projects: Vec::new(),
        }
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Fetches the collection for this store's scope, in backend order.
    /// Failures are logged and leave the current list in place.
    pub async fn list(&mut self) {
        match self.api.list_projects(self.scope).await {
            Ok(body) => {
                self.projects = decode_projects(body);
                debug!("Loaded {} projects ({:?})", self.projects.len(), self.scope);
            }
            Err(err) => error!("Failed to load projects: {}", err),
        }
    }

    /// Creates a project and puts the backend's record at the front of the list.
    pub async fn create(&mut self, draft: &ProjectDraft) -> Result<&Project, ApiError> {
        self.ensure_writable()?;

        let body = self.api.create_project(draft).await?;
        let created: Project = serde_json::from_value(body)?;
        info!("Created project {:?}", created.id);

        self.projects.insert(0, created);
        Ok(&self.projects[0])
    }

    /// Sends a partial update and swaps the matching entry for the backend's
    /// full record. Length and order of the list never change.
    pub async fn update(&mut self, id: &str, patch: &ProjectPatch) -> Result<(), ApiError> {
        self.ensure_writable()?;

        let body = self.api.update_project(id, patch).await?;
        let updated: Project = serde_json::from_value(body)?;
        debug!("Updated project {}", id);

        if let Some(entry) = self
            .projects
            .iter_mut()
            .find(|p| p.id.as_deref() == Some(id))
        {
            *entry = updated;
        }

        Ok(())
    }

    /// Deletes a project. The entry only leaves the list when the backend
    /// answers with `deleted: true`; returns whether it was removed.
    pub async fn delete(&mut self, id: &str) -> Result<bool, ApiError> {
        self.ensure_writable()?;

        let body = self.api.delete_project(id).await?;
        let confirmation = serde_json::from_value::<DeleteConfirmation>(body).unwrap_or_else(|err| {
            warn!("Unreadable delete confirmation for project {}: {}", id, err);
            DeleteConfirmation::default()
        });

        if !confirmation.deleted {
            warn!("Backend did not confirm deletion of project {}", id);
            return Ok(false);
        }

        self.projects.retain(|p| p.id.as_deref() != Some(id));
        info!("Deleted project {}", id);
        Ok(true)
    }

    fn ensure_writable(&self) -> Result<(), ApiError> {
        match self.scope {
            Scope::Admin => Ok(()),
            Scope::Public => Err(ApiError::ReadOnly),
        }
    }
}

// Anything but an array becomes an empty list; entries that do not decode are dropped.
fn decode_projects(body: Value) -> Vec<Project> {
    let Value::Array(items) = body else {
        warn!("Project listing was not an array, showing none");
        return Vec::new();
    };

    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(project) => Some(project),
            Err(err) => {
                warn!("Skipping malformed project: {}", err);
                None
            }
        })
        .collect()
}
