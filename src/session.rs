//! Explicit session state.
//!
//! Every facade call takes a [`Session`]; nothing reads the current user from
//! global state. [`SessionStore`] persists the signed-in user, the access
//! token and the onboarding flag in the key-value store.

use crate::error::{Result, SmileError};
use crate::storage::kv::{KeyValueStore, ONBOARDING_KEY, TOKEN_KEY, USER_KEY};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// User id used for the single-device local journal.
pub const LOCAL_USER_ID: &str = "local";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: String,
    pub access_token: Option<String>,
}

impl Session {
    pub fn local() -> Self {
        Self {
            user_id: LOCAL_USER_ID.to_string(),
            access_token: None,
        }
    }

    pub fn authenticated(user_id: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            access_token: Some(access_token.into()),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    /// The bearer token, or `Unauthorized` when the session has none.
    pub fn bearer(&self) -> Result<&str> {
        self.access_token
            .as_deref()
            .ok_or_else(|| SmileError::Unauthorized("no access token in session".to_string()))
    }
}

/// User profile as returned by the auth endpoints and cached on the device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredUser {
    pub id: String,
    pub email: String,
    pub display_name: String,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub provider: String,
    #[serde(default)]
    pub onboarded: bool,
    #[serde(default)]
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub struct SessionStore {
    kv: Arc<dyn KeyValueStore>,
}

impl SessionStore {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    pub async fn store_user_data(&self, user: &StoredUser, access_token: &str) -> Result<()> {
        tracing::info!(user_id = %user.id, "Storing signed-in user");
        self.kv.set(USER_KEY, &serde_json::to_string(user)?).await?;
        self.kv.set(TOKEN_KEY, access_token).await
    }

    /// The cached user. A corrupt cache entry is logged and treated as signed out.
    pub async fn current_user(&self) -> Result<Option<StoredUser>> {
        let Some(raw) = self.kv.get(USER_KEY).await? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring unreadable cached user");
                Ok(None)
            }
        }
    }

    pub async fn access_token(&self) -> Result<Option<String>> {
        Ok(self
            .kv
            .get(TOKEN_KEY)
            .await?
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty()))
    }

    /// Forget the signed-in user and token. The onboarding flag survives.
    pub async fn clear_stored_data(&self) -> Result<()> {
        tracing::info!("Clearing signed-in user");
        self.kv.remove_many(&[USER_KEY, TOKEN_KEY]).await
    }

    pub async fn mark_onboarding_completed(&self) -> Result<()> {
        self.kv.set(ONBOARDING_KEY, "true").await
    }

    pub async fn has_completed_onboarding(&self) -> Result<bool> {
        Ok(self.kv.get(ONBOARDING_KEY).await?.as_deref() == Some("true"))
    }

    pub async fn reset_onboarding_status(&self) -> Result<()> {
        self.kv.remove(ONBOARDING_KEY).await
    }

    /// Session for the stored user and token, or the local session when
    /// nobody is signed in.
    pub async fn session(&self) -> Result<Session> {
        let token = self.access_token().await?;
        let user = self.current_user().await?;
        Ok(match (user, token) {
            (Some(user), Some(token)) => Session::authenticated(user.id, token),
            (Some(user), None) => Session {
                user_id: user.id,
                access_token: None,
            },
            (None, token) => Session {
                user_id: LOCAL_USER_ID.to_string(),
                access_token: token,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::kv::MemoryKvStore;

    fn user() -> StoredUser {
        let now = Utc::now();
        StoredUser {
            id: "5fbb7235-d76d-41a3-8fc3-109a86873f63".to_string(),
            email: "saddik@example.com".to_string(),
            display_name: "saddik1".to_string(),
            photo_url: None,
            provider: "email".to_string(),
            onboarded: false,
            last_login: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn store() -> SessionStore {
        SessionStore::new(Arc::new(MemoryKvStore::new()))
    }

    #[test]
    fn test_bearer_requires_token() {
        assert!(matches!(
            Session::local().bearer(),
            Err(SmileError::Unauthorized(_))
        ));
        assert_eq!(Session::authenticated("u", "t").bearer().unwrap(), "t");
        assert!(Session::authenticated("u", "t").is_authenticated());
        assert!(!Session::local().is_authenticated());
    }

    #[tokio::test]
    async fn test_session_defaults_to_local() {
        let session = store().session().await.unwrap();
        assert_eq!(session, Session::local());
    }

    #[tokio::test]
    async fn test_store_and_clear_user() {
        let store = store();
        store.store_user_data(&user(), "jwt-token").await.unwrap();

        let session = store.session().await.unwrap();
        assert_eq!(session.user_id, user().id);
        assert_eq!(session.access_token.as_deref(), Some("jwt-token"));
        assert_eq!(store.current_user().await.unwrap().unwrap().email, user().email);

        store.clear_stored_data().await.unwrap();
        assert_eq!(store.current_user().await.unwrap(), None);
        assert_eq!(store.access_token().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_onboarding_flag_survives_logout() {
        let store = store();
        assert!(!store.has_completed_onboarding().await.unwrap());

        store.mark_onboarding_completed().await.unwrap();
        store.store_user_data(&user(), "t").await.unwrap();
        store.clear_stored_data().await.unwrap();
        assert!(store.has_completed_onboarding().await.unwrap());

        store.reset_onboarding_status().await.unwrap();
        assert!(!store.has_completed_onboarding().await.unwrap());
    }
}
