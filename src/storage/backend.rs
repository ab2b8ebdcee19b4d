use crate::error::Result;
use crate::model::{Category, Moment, NewMoment, default_categories};
use crate::session::Session;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    #[default]
    Local,
    Document,
    Rest,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::Local => write!(f, "local"),
            BackendKind::Document => write!(f, "document"),
            BackendKind::Rest => write!(f, "rest"),
        }
    }
}

/// How a category filter was answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum QueryStrategy {
    /// Filtered over a list the backend always loads in full.
    InMemory,
    /// Filtered by the server using an index.
    ServerIndexed,
    /// The server-side filter was unavailable; everything was fetched and
    /// filtered on the client.
    FullScanFallback,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryQuery {
    pub moments: Vec<Moment>,
    pub strategy: QueryStrategy,
}

impl CategoryQuery {
    pub fn in_memory(moments: Vec<Moment>, category: &str) -> Self {
        Self {
            moments: retain_category(moments, category),
            strategy: QueryStrategy::InMemory,
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.strategy == QueryStrategy::FullScanFallback
    }
}

/// Exact, case-sensitive match on the category field.
pub fn retain_category(mut moments: Vec<Moment>, category: &str) -> Vec<Moment> {
    moments.retain(|m| m.category == category);
    moments
}

/// Storage contract shared by the local, document and REST adapters.
///
/// Adapters map the canonical [`Moment`] onto their own storage or wire
/// shape. Input has already been validated by the caller.
#[async_trait]
pub trait MomentBackend: Send + Sync {
    fn kind(&self) -> BackendKind;

    async fn create(&self, session: &Session, new: NewMoment) -> Result<Moment>;

    /// All moments for the session's user, in whatever order the backend keeps them.
    async fn list(&self, session: &Session) -> Result<Vec<Moment>>;

    /// Fails with `NotFound` when no moment has this id.
    async fn get(&self, session: &Session, id: &str) -> Result<Moment>;

    /// Hard delete. Unknown ids are not reported as errors.
    async fn delete(&self, session: &Session, id: &str) -> Result<()>;

    async fn filter_by_category(&self, session: &Session, category: &str) -> Result<CategoryQuery> {
        let moments = self.list(session).await?;
        Ok(CategoryQuery::in_memory(moments, category))
    }

    async fn categories(&self, _session: &Session) -> Result<Vec<Category>> {
        Ok(default_categories())
    }
}
