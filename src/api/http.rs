use async_trait::async_trait;
use log::debug;
use reqwest::{Client, RequestBuilder};
use serde_json::Value;

use crate::config::Config;
use crate::models::{ProfileSettings, ProjectDraft, ProjectPatch};

use super::{ApiError, PortfolioApi, Scope, ADMIN_SETTINGS_PATH, PUBLIC_SETTINGS_PATH, project_path};

/// HTTP implementation of [`PortfolioApi`] on top of a shared reqwest client.
pub struct HttpClient {
    client: Client,
    base_url: String,
}

impl HttpClient {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            client,
            base_url: config.backend_url().to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Value, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!("{} <- {} bytes", status, body.len());

        if !status.is_success() {
            return Err(ApiError::from_status(status.as_u16(), &body));
        }

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl PortfolioApi for HttpClient {
    async fn get_settings(&self) -> Result<Value, ApiError> {
        self.send(self.client.get(self.url(PUBLIC_SETTINGS_PATH))).await
    }

    async fn save_settings(&self, settings: &ProfileSettings) -> Result<Value, ApiError> {
        self.send(self.client.post(self.url(ADMIN_SETTINGS_PATH)).json(settings))
            .await
    }

    async fn list_projects(&self, scope: Scope) -> Result<Value, ApiError> {
        self.send(self.client.get(self.url(scope.projects_path()))).await
    }

    async fn create_project(&self, draft: &ProjectDraft) -> Result<Value, ApiError> {
        self.send(self.client.post(self.url(Scope::Admin.projects_path())).json(draft))
            .await
    }

    async fn update_project(&self, id: &str, patch: &ProjectPatch) -> Result<Value, ApiError> {
        self.send(self.client.put(self.url(&project_path(id))).json(patch))
            .await
    }

    async fn delete_project(&self, id: &str) -> Result<Value, ApiError> {
        self.send(self.client.delete(self.url(&project_path(id)))).await
    }
}
