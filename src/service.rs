//! The moment facade.
//!
//! [`MomentService`] is the one contract the presentation layer talks to. It
//! validates input before any I/O, orders results newest first and computes
//! aggregates, delegating persistence to whichever [`MomentBackend`] it owns.

use crate::error::Result;
use crate::model::{Category, DailyActivity, Moment, MomentStats, NewMoment, daily_activity};
use crate::search::SearchQuery;
use crate::session::Session;
use crate::storage::{BackendKind, CategoryQuery, MomentBackend};
use crate::validation;
use chrono::Utc;

pub struct MomentService {
    backend: Box<dyn MomentBackend>,
}

/// Newest first. The sort is stable, so moments sharing a timestamp keep
/// the backend's order.
fn sort_newest_first(moments: &mut [Moment]) {
    moments.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

impl MomentService {
    pub fn new(backend: Box<dyn MomentBackend>) -> Self {
        Self { backend }
    }

    pub fn backend_kind(&self) -> BackendKind {
        self.backend.kind()
    }

    pub async fn create(&self, session: &Session, new: NewMoment) -> Result<Moment> {
        validation::validate_new_moment(&new)?;
        let new = new.normalized();
        tracing::debug!(category = %new.category, media = new.media.is_some(), "Creating moment");
        self.backend.create(session, new).await
    }

    pub async fn list(&self, session: &Session) -> Result<Vec<Moment>> {
        let mut moments = self.backend.list(session).await?;
        sort_newest_first(&mut moments);
        Ok(moments)
    }

    pub async fn filter_by_category(
        &self,
        session: &Session,
        category: &str,
    ) -> Result<CategoryQuery> {
        let mut query = self.backend.filter_by_category(session, category).await?;
        sort_newest_first(&mut query.moments);
        if query.is_degraded() {
            tracing::warn!(
                category,
                count = query.moments.len(),
                "Category filter answered by full scan"
            );
        }
        Ok(query)
    }

    pub async fn filter_by_collection(
        &self,
        session: &Session,
        collection: &str,
    ) -> Result<Vec<Moment>> {
        let mut moments = self.list(session).await?;
        moments.retain(|m| m.collection.as_deref() == Some(collection));
        Ok(moments)
    }

    pub async fn search(&self, session: &Session, query: &str) -> Result<Vec<Moment>> {
        let query = SearchQuery::parse(query)?;
        let mut moments = self.list(session).await?;
        moments.retain(|m| query.matches_moment(m));
        Ok(moments)
    }

    pub async fn get_by_id(&self, session: &Session, id: &str) -> Result<Moment> {
        validation::validate_id(id)?;
        self.backend.get(session, id).await
    }

    pub async fn delete(&self, session: &Session, id: &str) -> Result<()> {
        validation::validate_id(id)?;
        self.backend.delete(session, id).await
    }

    pub async fn compute_stats(&self, session: &Session) -> Result<MomentStats> {
        let moments = self.backend.list(session).await?;
        Ok(MomentStats::compute(&moments, Utc::now()))
    }

    /// Heat-map cells for the trailing `days` days, oldest first.
    pub async fn activity(&self, session: &Session, days: u32) -> Result<Vec<DailyActivity>> {
        let moments = self.backend.list(session).await?;
        Ok(daily_activity(&moments, Utc::now().date_naive(), days))
    }

    pub async fn categories(&self, session: &Session) -> Result<Vec<Category>> {
        self.backend.categories(session).await
    }
}
