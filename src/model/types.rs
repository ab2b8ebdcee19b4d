use crate::error::{Result, SmileError};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

const VIDEO_EXTENSIONS: [&str; 4] = [".mp4", ".webm", ".mov", ".m4v"];
const AUDIO_EXTENSIONS: [&str; 4] = [".mp3", ".wav", ".m4a", ".aac"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    #[default]
    Text,
    Photo,
    Video,
    Audio,
}

impl MediaType {
    /// Guess the media type from a URL or path by its file extension.
    ///
    /// Unknown extensions are treated as photos, which is what hosted image
    /// URLs usually look like.
    pub fn infer_from_url(url: &str) -> Self {
        let lower = url.to_lowercase();
        if VIDEO_EXTENSIONS.iter().any(|ext| lower.contains(ext)) {
            MediaType::Video
        } else if AUDIO_EXTENSIONS.iter().any(|ext| lower.contains(ext)) {
            MediaType::Audio
        } else {
            MediaType::Photo
        }
    }

    /// Media type for an optional URL: no URL means a text-only moment.
    pub fn for_optional_url(url: Option<&str>) -> Self {
        match url {
            Some(u) if !u.trim().is_empty() => Self::infer_from_url(u),
            _ => MediaType::Text,
        }
    }

    /// MIME type sent with multipart uploads.
    pub fn mime_type(&self) -> &'static str {
        match self {
            MediaType::Photo => "image/jpeg",
            MediaType::Video => "video/mp4",
            MediaType::Audio => "audio/mpeg",
            MediaType::Text => "application/octet-stream",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaType::Text => write!(f, "text"),
            MediaType::Photo => write!(f, "photo"),
            MediaType::Video => write!(f, "video"),
            MediaType::Audio => write!(f, "audio"),
        }
    }
}

impl FromStr for MediaType {
    type Err = SmileError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" => Ok(MediaType::Text),
            "photo" | "image" => Ok(MediaType::Photo),
            "video" => Ok(MediaType::Video),
            "audio" => Ok(MediaType::Audio),
            _ => Err(SmileError::Parse(format!("Invalid media type: {}", s))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub color: String,
    pub icon: String,
}

impl Category {
    fn new(id: &str, name: &str, color: &str, icon: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            color: color.to_string(),
            icon: icon.to_string(),
        }
    }
}

/// Category used when a moment is created without one.
pub const DEFAULT_CATEGORY: &str = "random";

pub fn default_categories() -> Vec<Category> {
    vec![
        Category::new("family", "Family", "#FF6B6B", "heart"),
        Category::new("friends", "Friends", "#4ECDC4", "people"),
        Category::new("work", "Work", "#45B7D1", "briefcase"),
        Category::new("random", "Random", "#96CEB4", "star"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_from_url() {
        assert_eq!(
            MediaType::infer_from_url("https://cdn.example.com/moments/abc.MP4"),
            MediaType::Video
        );
        assert_eq!(
            MediaType::infer_from_url("file:///tmp/audio_1.m4a"),
            MediaType::Audio
        );
        assert_eq!(
            MediaType::infer_from_url("https://res.cloudinary.com/x/image/upload/v1/w2ep.jpg"),
            MediaType::Photo
        );
    }

    #[test]
    fn test_for_optional_url() {
        assert_eq!(MediaType::for_optional_url(None), MediaType::Text);
        assert_eq!(MediaType::for_optional_url(Some("  ")), MediaType::Text);
        assert_eq!(
            MediaType::for_optional_url(Some("clip.webm")),
            MediaType::Video
        );
    }

    #[test]
    fn test_mime_type() {
        assert_eq!(MediaType::Photo.mime_type(), "image/jpeg");
        assert_eq!(MediaType::Video.mime_type(), "video/mp4");
        assert_eq!(MediaType::Audio.mime_type(), "audio/mpeg");
        assert_eq!(MediaType::Text.mime_type(), "application/octet-stream");
    }

    #[test]
    fn test_parse_media_type() {
        assert_eq!("PHOTO".parse::<MediaType>().unwrap(), MediaType::Photo);
        assert!("gif".parse::<MediaType>().is_err());
    }

    #[test]
    fn test_default_categories_include_default() {
        assert!(
            default_categories()
                .iter()
                .any(|c| c.id == DEFAULT_CATEGORY)
        );
    }
}
