//! Sign-up and sign-in against the REST backend.
//!
//! Forms are validated locally before any request is made. A successful call
//! returns the access token and user profile; persisting them is left to
//! [`SessionStore::store_user_data`](crate::session::SessionStore::store_user_data).

use crate::api::ApiClient;
use crate::error::{Result, SmileError};
use crate::session::{Session, StoredUser};
use crate::validation;
use reqwest::Method;
use serde::{Deserialize, Serialize};

const AUTH_PATH: &str = "auth";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserPayload {
    pub email: String,
    pub password: String,
    pub display_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginUserPayload {
    pub email: String,
    pub password: String,
}

/// What the sign-up screen collects.
#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub display_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterForm {
    pub fn validate(&self) -> Result<RegisterUserPayload> {
        let display_name = validation::validate_display_name(&self.display_name)?;
        let email = validation::validate_email(&self.email)?;
        validation::validate_password(&self.password)?;
        if self.password != self.confirm_password {
            return Err(SmileError::Validation("Passwords do not match".to_string()));
        }
        Ok(RegisterUserPayload {
            email,
            password: self.password.clone(),
            display_name,
        })
    }
}

impl LoginUserPayload {
    pub fn new(email: &str, password: &str) -> Result<Self> {
        let email = validation::validate_email(email)?;
        if password.is_empty() {
            return Err(SmileError::Validation("Password is required".to_string()));
        }
        Ok(Self {
            email,
            password: password.to_string(),
        })
    }
}

/// `data` of a successful register or login response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthData {
    #[serde(alias = "token")]
    pub access_token: String,
    pub user: StoredUser,
}

impl AuthData {
    pub fn session(&self) -> Session {
        Session::authenticated(self.user.id.clone(), self.access_token.clone())
    }
}

pub struct AuthClient {
    api: ApiClient,
}

impl AuthClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn register(&self, form: &RegisterForm) -> Result<AuthData> {
        let payload = form.validate()?;
        let url = self.api.url(&[AUTH_PATH, "register"])?;
        let data: AuthData = self
            .api
            .send(self.api.request(Method::POST, url, None).json(&payload))
            .await?;
        tracing::info!(user_id = %data.user.id, "Registered new account");
        Ok(data)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthData> {
        let payload = LoginUserPayload::new(email, password)?;
        let url = self.api.url(&[AUTH_PATH, "login"])?;
        let data: AuthData = self
            .api
            .send(self.api.request(Method::POST, url, None).json(&payload))
            .await?;
        tracing::info!(user_id = %data.user.id, "Signed in");
        Ok(data)
    }
}
