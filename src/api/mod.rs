mod http;
#[cfg(test)]
pub mod fake;

pub use http::HttpClient;

use async_trait::async_trait;
use log::warn;
use serde_json::Value;
use thiserror::Error;

use crate::models::{ProfileSettings, ProjectDraft, ProjectPatch};

pub const PUBLIC_SETTINGS_PATH: &str = "/api/public/settings";
pub const ADMIN_SETTINGS_PATH: &str = "/api/admin/settings";
pub const PUBLIC_PROJECTS_PATH: &str = "/api/public/projects";
pub const ADMIN_PROJECTS_PATH: &str = "/api/admin/projects";

/// Which side of the backend a project list is read from.
///
/// Both endpoints return the same record shape; the public one only lists
/// published projects and accepts no writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Public,
    Admin,
}

impl Scope {
    pub fn projects_path(self) -> &'static str {
        match self {
            Scope::Public => PUBLIC_PROJECTS_PATH,
            Scope::Admin => ADMIN_PROJECTS_PATH,
        }
    }
}

pub fn project_path(id: &str) -> String {
    format!("{}/{}", ADMIN_PROJECTS_PATH, id)
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("backend returned status {status}")]
    Status { status: u16, detail: Option<String> },

    #[error("unexpected response body: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("the public project list is read-only")]
    ReadOnly,
}

impl ApiError {
    /// Builds a status error, lifting a string `detail` out of a JSON error body.
    pub fn from_status(status: u16, body: &str) -> Self {
        let detail = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|json| json.get("detail").and_then(Value::as_str).map(String::from))
            .filter(|detail| !detail.trim().is_empty());

        ApiError::Status { status, detail }
    }

    /// Text for the notification shown to the user.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Status { detail: Some(detail), .. } => detail.clone(),
            ApiError::Status { detail: None, .. } | ApiError::Malformed(_) => fallback.to_string(),
            ApiError::Transport(err) => {
                warn!("Transport failure behind \"{}\": {}", fallback, err);
                fallback.to_string()
            }
            ApiError::ReadOnly => self.to_string(),
        }
    }
}

/// The backend resource contract the stores synchronise against.
///
/// Every call hands back the decoded JSON body untouched; shaping it into
/// records is left to the stores, which know which shapes to tolerate.
#[async_trait]
pub trait PortfolioApi: Send + Sync {
    async fn get_settings(&self) -> Result<Value, ApiError>;

    async fn save_settings(&self, settings: &ProfileSettings) -> Result<Value, ApiError>;

    async fn list_projects(&self, scope: Scope) -> Result<Value, ApiError>;

    async fn create_project(&self, draft: &ProjectDraft) -> Result<Value, ApiError>;

    async fn update_project(&self, id: &str, patch: &ProjectPatch) -> Result<Value, ApiError>;

    async fn delete_project(&self, id: &str) -> Result<Value, ApiError>;
}
