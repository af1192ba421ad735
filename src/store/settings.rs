use std::sync::Arc;

use log::{debug, error, info};
use serde_json::Value;

use crate::api::{ApiError, PortfolioApi};
use crate::models::ProfileSettings;

pub struct SettingsStore<A> {
    api: Arc<A>,
    settings: Option<ProfileSettings>,
}

impl<A: PortfolioApi> SettingsStore<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self { api, settings: None }
    }

    /// `None` until the backend has a record; views render placeholders for it.
    pub fn settings(&self) -> Option<&ProfileSettings> {
        self.settings.as_ref()
    }

    /// Fetches the singleton record. Failures are logged and leave the
    /// current snapshot in place.
    pub async fn load(&mut self) {
        let body = match self.api.get_settings().await {
            Ok(body) => body,
            Err(err) => {
                error!("Failed to load settings: {}", err);
                return;
            }
        };

        match decode_settings(body) {
            Ok(Some(settings)) => {
                debug!("Loaded settings {:?}", settings.id);
                self.settings = Some(settings);
            }
            Ok(None) => debug!("No settings saved yet"),
            Err(err) => error!("Failed to decode settings: {}", err),
        }
    }

    /// Writes the full record and adopts whatever the backend stored.
    pub async fn save(&mut self, record: &ProfileSettings) -> Result<&ProfileSettings, ApiError> {
        let body = self.api.save_settings(record).await?;
        let saved: ProfileSettings = serde_json::from_value(body)?;
        info!("Saved settings {:?}", saved.id);

        Ok(&*self.settings.insert(saved))
    }
}

// An empty object (or anything that is not an object) means nothing has been saved.
fn decode_settings(body: Value) -> Result<Option<ProfileSettings>, serde_json::Error> {
    match &body {
        Value::Object(fields) if !fields.is_empty() => serde_json::from_value(body).map(Some),
        _ => Ok(None),
    }
}
