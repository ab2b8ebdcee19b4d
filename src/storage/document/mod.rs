//! Cloud Firestore adapter.
//!
//! Moments live in a per-user sub-collection `users/{uid}/moments`. Requests
//! go to the Firestore REST API with the session's ID token as bearer.
//!
//! Creation uses a `commit` with `REQUEST_TIME` transforms so `createdAt` is
//! set by the server. Category filtering asks the server first and falls
//! back to a full fetch when the composite index is missing; the fallback is
//! reported through [`QueryStrategy::FullScanFallback`].

mod value;

pub use value::{ArrayValue, Document, MapValue, Value, decode_moment, encode_moment_fields};

use super::backend::{BackendKind, CategoryQuery, MomentBackend, QueryStrategy, retain_category};
use crate::api::error_for_status;
use crate::error::{Result, SmileError};
use crate::model::{Moment, NewMoment};
use crate::session::Session;
use crate::validation;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde_json::json;

const USERS_COLLECTION: &str = "users";
const MOMENTS_COLLECTION: &str = "moments";

/// Firestore auto-id alphabet and length.
const DOCUMENT_ID_ALPHABET: [char; 62] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S',
    'T', 'U', 'V', 'W', 'X', 'Y', 'Z', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l',
    'm', 'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z', '0', '1', '2', '3', '4',
    '5', '6', '7', '8', '9',
];
const DOCUMENT_ID_LENGTH: usize = 20;

#[derive(Debug, Clone)]
pub struct DocumentSettings {
    /// API root, e.g. `https://firestore.googleapis.com/v1`.
    pub base_url: String,
    pub project_id: String,
    pub database: String,
}

#[derive(Debug, Deserialize)]
struct GoogleError {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
}

#[derive(Debug, Deserialize)]
struct GoogleErrorBody {
    error: GoogleError,
}

#[derive(Debug, Deserialize)]
struct RunQueryItem {
    #[serde(default)]
    document: Option<Document>,
    #[serde(default)]
    error: Option<GoogleError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommitResponse {
    #[serde(default)]
    write_results: Vec<WriteResult>,
    #[serde(default)]
    commit_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WriteResult {
    #[serde(default)]
    transform_results: Vec<Value>,
}

/// Failure reported by Firestore, kept apart from [`SmileError`] so the
/// missing-index case can be recognised before mapping.
#[derive(Debug)]
struct RemoteFailure {
    http: StatusCode,
    status: String,
    message: String,
}

impl RemoteFailure {
    fn is_missing_index(&self) -> bool {
        self.status == "FAILED_PRECONDITION"
    }

    fn into_error(self) -> SmileError {
        match self.status.as_str() {
            "UNAUTHENTICATED" => SmileError::Unauthorized(self.message),
            "PERMISSION_DENIED" => SmileError::PermissionDenied(self.message),
            "NOT_FOUND" => SmileError::NotFound(self.message),
            _ => error_for_status(self.http, self.message),
        }
    }
}

fn parse_failure(http: StatusCode, body: &str) -> RemoteFailure {
    let parsed = serde_json::from_str::<GoogleErrorBody>(body)
        .map(|b| b.error)
        .or_else(|_| {
            serde_json::from_str::<Vec<GoogleErrorBody>>(body)
                .ok()
                .and_then(|mut v| if v.is_empty() { None } else { Some(v.remove(0).error) })
                .ok_or(())
        });
    match parsed {
        Ok(err) => RemoteFailure {
            http,
            status: err.status,
            message: err.message,
        },
        Err(()) => RemoteFailure {
            http,
            status: String::new(),
            message: body.trim().to_string(),
        },
    }
}

pub struct DocumentBackend {
    settings: DocumentSettings,
    http: reqwest::Client,
}

impl DocumentBackend {
    pub fn new(settings: DocumentSettings) -> Result<Self> {
        Self::with_client(settings, reqwest::Client::new())
    }

    pub fn with_client(mut settings: DocumentSettings, http: reqwest::Client) -> Result<Self> {
        if settings.project_id.trim().is_empty() {
            return Err(SmileError::Config(
                "Document backend needs document.project_id".to_string(),
            ));
        }
        settings.base_url = settings.base_url.trim_end_matches('/').to_string();
        url::Url::parse(&settings.base_url).map_err(|e| {
            SmileError::Config(format!("Invalid document base URL '{}': {}", settings.base_url, e))
        })?;
        Ok(Self { settings, http })
    }

    /// `projects/{p}/databases/{d}/documents`
    fn documents_root(&self) -> String {
        format!(
            "projects/{}/databases/{}/documents",
            self.settings.project_id, self.settings.database
        )
    }

    fn user_path(&self, session: &Session) -> Result<String> {
        validation::validate_id(&session.user_id)?;
        Ok(format!(
            "{}/{}/{}",
            self.documents_root(),
            USERS_COLLECTION,
            session.user_id
        ))
    }

    fn moment_name(&self, session: &Session, id: &str) -> Result<String> {
        validation::validate_id(id)?;
        Ok(format!(
            "{}/{}/{}",
            self.user_path(session)?,
            MOMENTS_COLLECTION,
            id
        ))
    }

    fn endpoint(&self, resource: &str) -> String {
        format!("{}/{}", self.settings.base_url, resource)
    }

    fn request(&self, method: Method, resource: &str, session: &Session) -> Result<RequestBuilder> {
        let token = session.bearer()?;
        Ok(self
            .http
            .request(method, self.endpoint(resource))
            .bearer_auth(token))
    }

    async fn read_body(response: Response) -> std::result::Result<String, RemoteFailure> {
        let status = response.status();
        let body = response.text().await.map_err(|e| RemoteFailure {
            http: status,
            status: String::new(),
            message: e.to_string(),
        })?;
        if status.is_success() {
            Ok(body)
        } else {
            Err(parse_failure(status, &body))
        }
    }

    fn generate_id() -> String {
        nanoid::format(nanoid::rngs::default, &DOCUMENT_ID_ALPHABET, DOCUMENT_ID_LENGTH)
    }

    fn structured_query(category: Option<&str>) -> serde_json::Value {
        let mut query = json!({
            "from": [{ "collectionId": MOMENTS_COLLECTION }],
            "orderBy": [{
                "field": { "fieldPath": "createdAt" },
                "direction": "DESCENDING"
            }]
        });
        if let Some(category) = category {
            query["where"] = json!({
                "fieldFilter": {
                    "field": { "fieldPath": "category" },
                    "op": "EQUAL",
                    "value": { "stringValue": category }
                }
            });
        }
        json!({ "structuredQuery": query })
    }

    /// Run a query against the user's moments sub-collection.
    async fn run_query(
        &self,
        session: &Session,
        category: Option<&str>,
    ) -> Result<std::result::Result<Vec<Moment>, RemoteFailure>> {
        let resource = format!("{}:runQuery", self.user_path(session)?);
        let response = self
            .request(Method::POST, &resource, session)?
            .json(&Self::structured_query(category))
            .send()
            .await?;
        let body = match Self::read_body(response).await {
            Ok(body) => body,
            Err(failure) => return Ok(Err(failure)),
        };

        let items: Vec<RunQueryItem> = serde_json::from_str(&body)
            .map_err(|e| SmileError::Parse(format!("Unexpected runQuery body: {}", e)))?;
        let mut moments = Vec::with_capacity(items.len());
        for item in items {
            if let Some(err) = item.error {
                return Ok(Err(RemoteFailure {
                    http: StatusCode::BAD_REQUEST,
                    status: err.status,
                    message: err.message,
                }));
            }
            if let Some(doc) = item.document {
                moments.push(decode_moment(&doc)?);
            }
        }
        Ok(Ok(moments))
    }
}

#[async_trait]
impl MomentBackend for DocumentBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Document
    }

    async fn create(&self, session: &Session, new: NewMoment) -> Result<Moment> {
        let id = Self::generate_id();
        let name = self.moment_name(session, &id)?;
        let mut moment = Moment::from_new(id, new, Utc::now());

        let body = json!({
            "writes": [{
                "update": {
                    "name": name,
                    "fields": encode_moment_fields(&moment),
                },
                "currentDocument": { "exists": false },
                "updateTransforms": [
                    { "fieldPath": "createdAt", "setToServerValue": "REQUEST_TIME" },
                    { "fieldPath": "updatedAt", "setToServerValue": "REQUEST_TIME" }
                ]
            }]
        });

        let resource = format!("{}:commit", self.documents_root());
        let response = self
            .request(Method::POST, &resource, session)?
            .json(&body)
            .send()
            .await?;
        let body = Self::read_body(response)
            .await
            .map_err(RemoteFailure::into_error)?;
        let commit: CommitResponse = serde_json::from_str(&body)
            .map_err(|e| SmileError::Parse(format!("Unexpected commit body: {}", e)))?;

        let server_time = commit
            .write_results
            .first()
            .and_then(|w| w.transform_results.first())
            .and_then(|v| match v {
                Value::TimestampValue(ts) => Some(*ts),
                _ => None,
            })
            .or(commit.commit_time);
        match server_time {
            Some(ts) => {
                moment.created_at = ts;
                moment.updated_at = ts;
            }
            None => tracing::warn!(id = %moment.id, "Commit returned no server time, keeping client clock"),
        }

        tracing::info!(id = %moment.id, user = %session.user_id, "Moment document created");
        Ok(moment)
    }

    async fn list(&self, session: &Session) -> Result<Vec<Moment>> {
        self.run_query(session, None)
            .await?
            .map_err(RemoteFailure::into_error)
    }

    async fn get(&self, session: &Session, id: &str) -> Result<Moment> {
        let name = self.moment_name(session, id)?;
        let response = self.request(Method::GET, &name, session)?.send().await?;
        let body = Self::read_body(response).await.map_err(|failure| {
            if failure.http == StatusCode::NOT_FOUND {
                SmileError::NotFound(id.to_string())
            } else {
                failure.into_error()
            }
        })?;
        let doc: Document = serde_json::from_str(&body)
            .map_err(|e| SmileError::Parse(format!("Unexpected document body: {}", e)))?;
        decode_moment(&doc)
    }

    async fn delete(&self, session: &Session, id: &str) -> Result<()> {
        let name = self.moment_name(session, id)?;
        tracing::info!(id, user = %session.user_id, "Deleting moment document");
        let response = self.request(Method::DELETE, &name, session)?.send().await?;
        Self::read_body(response)
            .await
            .map(|_| ())
            .map_err(RemoteFailure::into_error)
    }

    async fn filter_by_category(&self, session: &Session, category: &str) -> Result<CategoryQuery> {
        match self.run_query(session, Some(category)).await? {
            Ok(moments) => Ok(CategoryQuery {
                moments,
                strategy: QueryStrategy::ServerIndexed,
            }),
            Err(failure) if failure.is_missing_index() => {
                tracing::warn!(
                    category,
                    reason = %failure.message,
                    "Category index unavailable, filtering all moments on the client"
                );
                let all = self.list(session).await?;
                Ok(CategoryQuery {
                    moments: retain_category(all, category),
                    strategy: QueryStrategy::FullScanFallback,
                })
            }
            Err(failure) => Err(failure.into_error()),
        }
    }
}
