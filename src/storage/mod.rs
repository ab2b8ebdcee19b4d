//! Storage backends for moments.
//!
//! All three adapters implement [`MomentBackend`] over the canonical
//! [`Moment`](crate::model::Moment) shape:
//!
//! - [`LocalBackend`]: one JSON blob in the on-device key-value store
//! - [`DocumentBackend`]: per-user Firestore sub-collection over REST
//! - [`RestBackend`]: the journal's own HTTP API
//!
//! [`open_backend`] picks one from configuration.

pub mod backend;
pub mod document;
pub mod kv;
pub mod local;
pub mod rest;

pub use backend::{BackendKind, CategoryQuery, MomentBackend, QueryStrategy, retain_category};
pub use document::{DocumentBackend, DocumentSettings};
pub use kv::{FileKvStore, KeyValueStore, MemoryKvStore};
pub use local::LocalBackend;
pub use rest::{RemoteMoment, RestBackend};

use crate::api::ApiClient;
use crate::config::SmileConfig;
use crate::error::{Result, SmileError};
use std::sync::Arc;

/// Build the backend selected by `config.smile.backend`.
///
/// The local backend shares `kv` with the session store.
pub fn open_backend(
    config: &SmileConfig,
    kv: Arc<dyn KeyValueStore>,
) -> Result<Box<dyn MomentBackend>> {
    let backend: Box<dyn MomentBackend> = match config.smile.backend {
        BackendKind::Local => Box::new(LocalBackend::new(kv)),
        BackendKind::Rest => {
            let base_url = config.rest.base_url.as_deref().unwrap_or_default();
            Box::new(RestBackend::new(ApiClient::new(base_url)?))
        }
        BackendKind::Document => {
            let project_id = config.document.project_id.clone().ok_or_else(|| {
                SmileError::Config("Document backend needs document.project_id".to_string())
            })?;
            Box::new(DocumentBackend::new(DocumentSettings {
                base_url: config.document.base_url.clone(),
                project_id,
                database: config.document.database.clone(),
            })?)
        }
    };
    tracing::debug!(backend = %backend.kind(), "Opened moment backend");
    Ok(backend)
}
