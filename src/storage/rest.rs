use super::backend::{BackendKind, MomentBackend};
use crate::api::ApiClient;
use crate::error::{Result, SmileError};
use crate::model::{MediaType, Moment, NewMoment};
use crate::session::{Session, StoredUser};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Method;
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};

const MOMENTS_PATH: &str = "moments";

/// Moment as the REST backend sends it.
///
/// Field mapping to [`Moment`]: `description` is the content, `feeling` is
/// the category. Tags, mood and likes are not stored by this backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteMoment {
    pub id: String,
    #[serde(default)]
    pub media_url: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub feeling: String,
    #[serde(default)]
    pub collection: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<RemoteMoment> for Moment {
    fn from(remote: RemoteMoment) -> Self {
        let media_url = Some(remote.media_url).filter(|u| !u.trim().is_empty());
        Moment {
            id: remote.id,
            content: remote.description,
            media_type: MediaType::for_optional_url(media_url.as_deref()),
            media_url,
            category: remote.feeling,
            collection: Some(remote.collection).filter(|c| !c.is_empty()),
            tags: Vec::new(),
            mood: None,
            likes: 0,
            created_at: remote.created_at,
            updated_at: remote.updated_at,
        }
    }
}

/// `data` of `GET /moments/{id}`: the moment with its owner nested inside.
#[derive(Debug, Deserialize)]
struct MomentWithUser {
    #[serde(flatten)]
    moment: RemoteMoment,
    #[serde(default)]
    user: Option<StoredUser>,
}

pub struct RestBackend {
    api: ApiClient,
}

impl RestBackend {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    async fn build_form(new: NewMoment) -> Result<Form> {
        let mut form = Form::new();
        if let Some(media) = &new.media {
            let path = media.local_path();
            let bytes = tokio::fs::read(&path).await.map_err(|e| {
                SmileError::Validation(format!(
                    "Could not read media file {}: {}",
                    path.display(),
                    e
                ))
            })?;
            let part = Part::bytes(bytes)
                .file_name(media.upload_name())
                .mime_str(media.media_type.mime_type())?;
            form = form.part("media", part);
        }
        Ok(form
            .text("description", new.content)
            .text("feeling", new.category)
            .text("collection", new.collection.unwrap_or_default()))
    }
}

#[async_trait]
impl MomentBackend for RestBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Rest
    }

    async fn create(&self, session: &Session, new: NewMoment) -> Result<Moment> {
        let dropped_tags = new.tags.len();
        if dropped_tags > 0 || new.mood.is_some() {
            tracing::warn!(
                tags = dropped_tags,
                mood = new.mood.is_some(),
                "REST backend does not store tags or mood"
            );
        }
        let form = Self::build_form(new).await?;
        let url = self.api.url(&[MOMENTS_PATH])?;
        let request = self
            .api
            .request(Method::POST, url, Some(session))
            .multipart(form);
        let created: RemoteMoment = self.api.send(request).await?;
        tracing::info!(id = %created.id, "Moment created on server");
        Ok(created.into())
    }

    async fn list(&self, session: &Session) -> Result<Vec<Moment>> {
        let url = self.api.url(&[MOMENTS_PATH])?;
        let remote: Vec<RemoteMoment> = self
            .api
            .send(self.api.request(Method::GET, url, Some(session)))
            .await?;
        tracing::debug!(count = remote.len(), "Fetched moments");
        Ok(remote.into_iter().map(Moment::from).collect())
    }

    async fn get(&self, session: &Session, id: &str) -> Result<Moment> {
        let url = self.api.resource_url(MOMENTS_PATH, id)?;
        let found: MomentWithUser = self
            .api
            .send(self.api.request(Method::GET, url, Some(session)))
            .await
            .map_err(|e| match e {
                SmileError::NotFound(_) => SmileError::NotFound(id.to_string()),
                other => other,
            })?;
        if let Some(user) = &found.user {
            tracing::debug!(owner = %user.id, "Moment owner included in response");
        }
        Ok(found.moment.into())
    }

    async fn delete(&self, session: &Session, id: &str) -> Result<()> {
        let url = self.api.resource_url(MOMENTS_PATH, id)?;
        tracing::info!(id, "Deleting moment on server");
        self.api
            .send_empty(self.api.request(Method::DELETE, url, Some(session)))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "id": "f57c5074-78d6-485a-9c0b-1cc7b7858374",
        "mediaUrl": "https://res.cloudinary.com/demo/image/upload/v1/users/u/moments/zcjf.jpg",
        "description": "Testing the moment with image upload",
        "feeling": "happy",
        "collection": "Learning",
        "userId": "5fbb7235-d76d-41a3-8fc3-109a86873f63",
        "createdAt": "2026-02-02T21:26:38.633Z",
        "updatedAt": "2026-02-02T21:26:38.633Z"
    }"#;

    #[test]
    fn test_remote_moment_maps_to_canonical() {
        let remote: RemoteMoment = serde_json::from_str(SAMPLE).unwrap();
        let moment: Moment = remote.into();
        assert_eq!(moment.content, "Testing the moment with image upload");
        assert_eq!(moment.category, "happy");
        assert_eq!(moment.collection.as_deref(), Some("Learning"));
        assert_eq!(moment.media_type, MediaType::Photo);
        assert!(moment.tags.is_empty());
    }

    #[test]
    fn test_remote_moment_without_media_is_text() {
        let mut remote: RemoteMoment = serde_json::from_str(SAMPLE).unwrap();
        remote.media_url = String::new();
        remote.collection = String::new();
        let moment: Moment = remote.into();
        assert_eq!(moment.media_type, MediaType::Text);
        assert!(moment.media_url.is_none());
        assert!(moment.collection.is_none());
    }

    #[test]
    fn test_remote_moment_wire_names() {
        let remote: RemoteMoment = serde_json::from_str(SAMPLE).unwrap();
        let json = serde_json::to_value(&remote).unwrap();
        for key in [
            "id",
            "mediaUrl",
            "description",
            "feeling",
            "collection",
            "userId",
            "createdAt",
            "updatedAt",
        ] {
            assert!(json.get(key).is_some(), "missing {}", key);
        }
    }

    #[test]
    fn test_moment_with_nested_user() {
        let mut data: serde_json::Value = serde_json::from_str(SAMPLE).unwrap();
        data["user"] = serde_json::json!({
            "id": "5fbb7235-d76d-41a3-8fc3-109a86873f63",
            "email": "saddik@example.com",
            "displayName": "saddik1",
            "photoUrl": null,
            "provider": "email",
            "passwordHash": "$2b$12$hash",
            "onboarded": false,
            "lastLogin": "2026-02-02T21:35:34.867Z",
            "createdAt": "2026-01-28T01:27:18.723Z",
            "updatedAt": "2026-02-02T21:35:34.869Z"
        });
        let found: MomentWithUser = serde_json::from_value(data).unwrap();
        assert_eq!(found.user.unwrap().display_name, "saddik1");
        assert_eq!(found.moment.feeling, "happy");
    }

    #[tokio::test]
    async fn test_form_rejects_missing_media_file() {
        let new = NewMoment::new("x").with_media(Some(crate::model::MediaRef::from_path(
            "/definitely/not/here.jpg",
        )));
        let err = RestBackend::build_form(new).await.unwrap_err();
        assert!(matches!(err, SmileError::Validation(_)));
    }
}
