use super::types::{DEFAULT_CATEGORY, MediaType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Moment {
    pub id: String,

    pub content: String,

    #[serde(default)]
    pub media_type: MediaType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,

    #[serde(default)]
    pub category: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<String>,

    #[serde(default)]
    pub likes: u32,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Moment {
    /// Build a stored moment from create input, stamped with `now`.
    pub fn from_new(id: String, new: NewMoment, now: DateTime<Utc>) -> Self {
        let (media_type, media_url) = match new.media {
            Some(media) => (media.media_type, Some(media.uri)),
            None => (MediaType::Text, None),
        };
        Self {
            id,
            content: new.content,
            media_type,
            media_url,
            category: new.category,
            collection: new.collection,
            tags: new.tags,
            mood: new.mood,
            likes: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn has_category(&self) -> bool {
        !self.category.is_empty()
    }
}

/// A pointer to media attached to a new moment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaRef {
    /// Local path or `file://` URI of the captured file.
    pub uri: String,
    pub media_type: MediaType,
    /// Upload file name; generated when absent.
    pub name: Option<String>,
}

impl MediaRef {
    /// Media reference for a file on disk, with the type guessed from its extension.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let uri = path.as_ref().to_string_lossy().into_owned();
        let media_type = MediaType::infer_from_url(&uri);
        Self {
            uri,
            media_type,
            name: None,
        }
    }

    /// Filesystem path behind the URI (strips a `file://` scheme).
    pub fn local_path(&self) -> PathBuf {
        PathBuf::from(self.uri.strip_prefix("file://").unwrap_or(&self.uri))
    }

    /// File name used for uploads.
    pub fn upload_name(&self) -> String {
        if let Some(name) = &self.name {
            return name.clone();
        }
        self.local_path()
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| format!("moment_{}.jpg", Utc::now().timestamp_millis()))
    }
}

/// Input for creating a moment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMoment {
    pub content: String,
    pub media: Option<MediaRef>,
    pub category: String,
    pub collection: Option<String>,
    pub tags: Vec<String>,
    pub mood: Option<String>,
}

impl NewMoment {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            media: None,
            category: DEFAULT_CATEGORY.to_string(),
            collection: None,
            tags: Vec::new(),
            mood: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_collection(mut self, collection: Option<String>) -> Self {
        self.collection = collection.filter(|c| !c.is_empty());
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_mood(mut self, mood: Option<String>) -> Self {
        self.mood = mood.filter(|m| !m.is_empty());
        self
    }

    pub fn with_media(mut self, media: Option<MediaRef>) -> Self {
        self.media = media;
        self
    }

    /// Trim content and drop duplicate tags, keeping first occurrences.
    pub fn normalized(mut self) -> Self {
        self.content = self.content.trim().to_string();
        let mut seen: Vec<String> = Vec::with_capacity(self.tags.len());
        for tag in self.tags.drain(..) {
            let tag = tag.trim().to_string();
            if !seen.contains(&tag) {
                seen.push(tag);
            }
        }
        self.tags = seen;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_trims_and_dedupes() {
        let new = NewMoment::new("  sunset walk  ")
            .with_tags(vec!["b".into(), "a".into(), "b".into(), " a ".into()])
            .normalized();
        assert_eq!(new.content, "sunset walk");
        assert_eq!(new.tags, vec!["b".to_string(), "a".to_string()]);
    }

    #[test]
    fn test_from_new_carries_media() {
        let now = Utc::now();
        let new = NewMoment::new("beach").with_media(Some(MediaRef::from_path("/tmp/wave.mov")));
        let moment = Moment::from_new("m1".into(), new, now);
        assert_eq!(moment.media_type, MediaType::Video);
        assert_eq!(moment.media_url.as_deref(), Some("/tmp/wave.mov"));
        assert_eq!(moment.created_at, now);
        assert_eq!(moment.likes, 0);
    }

    #[test]
    fn test_text_moment_has_no_media() {
        let moment = Moment::from_new("m2".into(), NewMoment::new("hi"), Utc::now());
        assert_eq!(moment.media_type, MediaType::Text);
        assert!(moment.media_url.is_none());
        assert_eq!(moment.category, DEFAULT_CATEGORY);
    }

    #[test]
    fn test_serialized_field_names() {
        let moment = Moment::from_new("m3".into(), NewMoment::new("hi"), Utc::now());
        let json = serde_json::to_value(&moment).unwrap();
        assert!(json.get("mediaType").is_some());
        assert!(json.get("createdAt").is_some());
        assert!(json.get("media_type").is_none());
    }

    #[test]
    fn test_media_ref_paths() {
        let media = MediaRef::from_path("file:///sdcard/DCIM/photo_1.jpg");
        assert_eq!(media.local_path(), PathBuf::from("/sdcard/DCIM/photo_1.jpg"));
        assert_eq!(media.upload_name(), "photo_1.jpg");
        assert_eq!(media.media_type, MediaType::Photo);
    }
}
