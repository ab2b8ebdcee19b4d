//! Firestore REST value encoding.
//!
//! Firestore wraps every field in a single-key object naming its type, e.g.
//! `{"stringValue": "hi"}` or `{"arrayValue": {"values": [...]}}`.

use crate::error::{Result, SmileError};
use crate::model::{MediaType, Moment};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Value {
    NullValue(()),
    BooleanValue(bool),
    /// 64-bit integers travel as decimal strings.
    IntegerValue(String),
    DoubleValue(f64),
    TimestampValue(DateTime<Utc>),
    StringValue(String),
    BytesValue(String),
    ReferenceValue(String),
    GeoPointValue(serde_json::Value),
    ArrayValue(ArrayValue),
    MapValue(MapValue),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ArrayValue {
    #[serde(default)]
    pub values: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MapValue {
    #[serde(default)]
    pub fields: BTreeMap<String, Value>,
}

impl Value {
    pub fn string(s: impl Into<String>) -> Self {
        Value::StringValue(s.into())
    }

    pub fn optional_string(s: Option<&str>) -> Self {
        match s {
            Some(s) => Value::string(s),
            None => Value::NullValue(()),
        }
    }

    fn as_str(&self) -> Option<&str> {
        match self {
            Value::StringValue(s) => Some(s),
            _ => None,
        }
    }
}

/// A stored document as returned by `get` and `runQuery`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Full resource name, ending in `/moments/{id}`.
    pub name: String,
    #[serde(default)]
    pub fields: BTreeMap<String, Value>,
    #[serde(default)]
    pub create_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub update_time: Option<DateTime<Utc>>,
}

impl Document {
    pub fn id(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or(&self.name)
    }
}

/// Fields written for a new moment. `createdAt`/`updatedAt` are left to
/// server transforms.
pub fn encode_moment_fields(moment: &Moment) -> BTreeMap<String, Value> {
    let mut fields = BTreeMap::new();
    fields.insert("content".to_string(), Value::string(&moment.content));
    fields.insert(
        "mediaType".to_string(),
        Value::string(moment.media_type.to_string()),
    );
    fields.insert(
        "mediaUrl".to_string(),
        Value::optional_string(moment.media_url.as_deref()),
    );
    fields.insert("category".to_string(), Value::string(&moment.category));
    fields.insert(
        "collection".to_string(),
        Value::optional_string(moment.collection.as_deref()),
    );
    fields.insert(
        "tags".to_string(),
        Value::ArrayValue(ArrayValue {
            values: moment.tags.iter().map(Value::string).collect(),
        }),
    );
    fields.insert(
        "mood".to_string(),
        Value::optional_string(moment.mood.as_deref()),
    );
    fields.insert(
        "likes".to_string(),
        Value::IntegerValue(moment.likes.to_string()),
    );
    fields
}

fn get_string(fields: &BTreeMap<String, Value>, key: &str) -> Option<String> {
    fields
        .get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn get_timestamp(fields: &BTreeMap<String, Value>, key: &str) -> Option<DateTime<Utc>> {
    match fields.get(key) {
        Some(Value::TimestampValue(ts)) => Some(*ts),
        _ => None,
    }
}

/// Decode a moment document; missing optional fields take their defaults.
pub fn decode_moment(doc: &Document) -> Result<Moment> {
    let fields = &doc.fields;
    let created_at = get_timestamp(fields, "createdAt")
        .or(doc.create_time)
        .ok_or_else(|| {
            SmileError::Parse(format!("Document {} has no createdAt", doc.name))
        })?;
    let updated_at = get_timestamp(fields, "updatedAt")
        .or(doc.update_time)
        .unwrap_or(created_at);

    let media_url = get_string(fields, "mediaUrl").filter(|u| !u.is_empty());
    let media_type = match get_string(fields, "mediaType") {
        Some(t) => t
            .parse()
            .unwrap_or_else(|_| MediaType::for_optional_url(media_url.as_deref())),
        None => MediaType::for_optional_url(media_url.as_deref()),
    };

    let tags = match fields.get("tags") {
        Some(Value::ArrayValue(array)) => array
            .values
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    };

    let likes = match fields.get("likes") {
        Some(Value::IntegerValue(n)) => n.parse().unwrap_or(0),
        Some(Value::DoubleValue(n)) => likes_from_double(*n),
        _ => 0,
    };

    Ok(Moment {
        id: doc.id().to_string(),
        content: get_string(fields, "content").unwrap_or_default(),
        media_type,
        media_url,
        category: get_string(fields, "category").unwrap_or_default(),
        collection: get_string(fields, "collection").filter(|c| !c.is_empty()),
        tags,
        mood: get_string(fields, "mood").filter(|m| !m.is_empty()),
        likes,
        created_at,
        updated_at,
    })
}

/// Likes written as a double by another client. Values that are not a
/// whole count in `u32` range read as zero rather than saturating.
fn likes_from_double(n: f64) -> u32 {
    if !n.is_finite() {
        return 0;
    }
    u32::try_from(n.round() as i64).unwrap_or(0)
}
