//! In-memory backend used by the store and view tests.

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::models::{ProfileSettings, Project, ProjectDraft, ProjectPatch};

use super::{ApiError, PortfolioApi, Scope};

#[derive(Default)]
struct State {
    settings: Value,
    projects: Vec<Project>,
    next_id: u32,
    calls: Vec<String>,
    failure: Option<(u16, Option<String>)>,
    projects_reply: Option<Value>,
    delete_reply: Option<Value>,
}

pub struct FakeBackend {
    state: Mutex<State>,
}

impl FakeBackend {
    /// A backend with no settings and no projects.
    pub fn empty() -> Self {
        Self {
            state: Mutex::new(State {
                settings: json!({}),
                next_id: 1,
                ..Default::default()
            }),
        }
    }

    pub fn with_settings(self, settings: Value) -> Self {
        self.state.lock().unwrap().settings = settings;
        self
    }

    pub fn with_projects(self, projects: Vec<Project>) -> Self {
        self.state.lock().unwrap().projects = projects;
        self
    }

    /// Next created project gets this id.
    pub fn with_next_id(self, next_id: u32) -> Self {
        self.state.lock().unwrap().next_id = next_id;
        self
    }

    /// Every call from now on answers with this status.
    pub fn fail_with(&self, status: u16, detail: Option<&str>) {
        self.state.lock().unwrap().failure = Some((status, detail.map(String::from)));
    }

    /// Answer project listings with this raw body instead of the stored list.
    pub fn reply_to_list_with(&self, body: Value) {
        self.state.lock().unwrap().projects_reply = Some(body);
    }

    /// Answer deletes with this raw body without touching the stored list.
    pub fn reply_to_delete_with(&self, body: Value) {
        self.state.lock().unwrap().delete_reply = Some(body);
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn stored_projects(&self) -> Vec<Project> {
        self.state.lock().unwrap().projects.clone()
    }

    fn begin(&self, call: String) -> Result<std::sync::MutexGuard<'_, State>, ApiError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);
        if let Some((status, detail)) = state.failure.clone() {
            return Err(ApiError::Status { status, detail });
        }
        Ok(state)
    }
}

fn not_found() -> ApiError {
    ApiError::Status {
        status: 404,
        detail: Some("Project not found".to_string()),
    }
}

#[async_trait]
impl PortfolioApi for FakeBackend {
    async fn get_settings(&self) -> Result<Value, ApiError> {
        let state = self.begin("GET /api/public/settings".to_string())?;
        Ok(state.settings.clone())
    }

    async fn save_settings(&self, settings: &ProfileSettings) -> Result<Value, ApiError> {
        let mut state = self.begin("POST /api/admin/settings".to_string())?;
        let mut saved = settings.clone();
        saved.id.get_or_insert_with(|| "settings".to_string());
        state.settings = serde_json::to_value(&saved)?;
        Ok(state.settings.clone())
    }

    async fn list_projects(&self, scope: Scope) -> Result<Value, ApiError> {
        let state = self.begin(format!("GET {}", scope.projects_path()))?;
        match &state.projects_reply {
            Some(body) => Ok(body.clone()),
            None => Ok(serde_json::to_value(&state.projects)?),
        }
    }

    async fn create_project(&self, draft: &ProjectDraft) -> Result<Value, ApiError> {
        let mut state = self.begin("POST /api/admin/projects".to_string())?;
        let project = Project {
            id: Some(state.next_id.to_string()),
            title: draft.title.clone(),
            description: draft.description.clone(),
            tags: draft.tags.clone(),
            image_url: draft.image_url.clone(),
            live_url: draft.live_url.clone(),
            repo_url: draft.repo_url.clone(),
        };
        state.next_id += 1;
        state.projects.insert(0, project.clone());
        Ok(serde_json::to_value(&project)?)
    }

    async fn update_project(&self, id: &str, patch: &ProjectPatch) -> Result<Value, ApiError> {
        let mut state = self.begin(format!("PUT /api/admin/projects/{}", id))?;
        let project = state
            .projects
            .iter_mut()
            .find(|p| p.id.as_deref() == Some(id))
            .ok_or_else(not_found)?;

        if let Some(title) = &patch.title {
            project.title = title.clone();
        }
        if let Some(description) = &patch.description {
            project.description = description.clone();
        }
        if let Some(tags) = &patch.tags {
            project.tags = tags.clone();
        }
        if let Some(image_url) = &patch.image_url {
            project.image_url = Some(image_url.clone());
        }
        if let Some(live_url) = &patch.live_url {
            project.live_url = Some(live_url.clone());
        }
        if let Some(repo_url) = &patch.repo_url {
            project.repo_url = Some(repo_url.clone());
        }

        Ok(serde_json::to_value(&*project)?)
    }

    async fn delete_project(&self, id: &str) -> Result<Value, ApiError> {
        let mut state = self.begin(format!("DELETE /api/admin/projects/{}", id))?;
        if let Some(body) = state.delete_reply.clone() {
            return Ok(body);
        }

        let before = state.projects.len();
        state.projects.retain(|p| p.id.as_deref() != Some(id));
        Ok(json!({ "deleted": state.projects.len() < before }))
    }
}
