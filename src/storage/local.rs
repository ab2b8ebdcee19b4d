use super::backend::{BackendKind, MomentBackend};
use super::kv::{CATEGORIES_KEY, KeyValueStore, MOMENTS_KEY};
use crate::error::{Result, SmileError};
use crate::model::{Category, Moment, NewMoment, default_categories};
use crate::session::Session;
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

/// Length of generated local moment ids.
const LOCAL_ID_LENGTH: usize = 21;

/// Moments kept as one JSON list under a single key on the device.
///
/// Every mutation reads the whole list and writes it back; the journal is
/// scoped to the device, so the session only shows up in logs.
pub struct LocalBackend {
    kv: Arc<dyn KeyValueStore>,
}

impl LocalBackend {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    async fn load(&self) -> Result<Vec<Moment>> {
        match self.kv.get(MOMENTS_KEY).await? {
            Some(raw) if !raw.trim().is_empty() => serde_json::from_str(&raw).map_err(|e| {
                SmileError::Parse(format!("Stored moments are unreadable: {}", e))
            }),
            _ => Ok(Vec::new()),
        }
    }

    async fn save(&self, moments: &[Moment]) -> Result<()> {
        let blob = serde_json::to_string(moments)?;
        self.kv.set(MOMENTS_KEY, &blob).await
    }

    fn generate_id(existing: &[Moment]) -> String {
        loop {
            let id = nanoid::nanoid!(LOCAL_ID_LENGTH);
            if !existing.iter().any(|m| m.id == id) {
                return id;
            }
        }
    }

    pub async fn save_categories(&self, categories: &[Category]) -> Result<()> {
        let blob = serde_json::to_string(categories)?;
        self.kv.set(CATEGORIES_KEY, &blob).await
    }
}

#[async_trait]
impl MomentBackend for LocalBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Local
    }

    async fn create(&self, session: &Session, new: NewMoment) -> Result<Moment> {
        let mut moments = self.load().await?;
        let id = Self::generate_id(&moments);
        let moment = Moment::from_new(id, new, Utc::now());
        tracing::info!(id = %moment.id, user = %session.user_id, "Saving moment locally");

        moments.insert(0, moment.clone());
        self.save(&moments).await?;
        Ok(moment)
    }

    async fn list(&self, _session: &Session) -> Result<Vec<Moment>> {
        self.load().await
    }

    async fn get(&self, _session: &Session, id: &str) -> Result<Moment> {
        self.load()
            .await?
            .into_iter()
            .find(|m| m.id == id)
            .ok_or_else(|| SmileError::NotFound(id.to_string()))
    }

    async fn delete(&self, session: &Session, id: &str) -> Result<()> {
        let mut moments = self.load().await?;
        let before = moments.len();
        moments.retain(|m| m.id != id);
        if moments.len() == before {
            tracing::debug!(id, "Delete matched no local moment");
        } else {
            tracing::info!(id, user = %session.user_id, "Deleting local moment");
        }
        self.save(&moments).await
    }

    async fn categories(&self, _session: &Session) -> Result<Vec<Category>> {
        if let Some(raw) = self.kv.get(CATEGORIES_KEY).await? {
            match serde_json::from_str(&raw) {
                Ok(categories) => return Ok(categories),
                Err(e) => tracing::warn!(error = %e, "Stored categories unreadable, reseeding"),
            }
        }
        let defaults = default_categories();
        tracing::info!(count = defaults.len(), "Seeding default categories");
        self.save_categories(&defaults).await?;
        Ok(defaults)
    }
}
