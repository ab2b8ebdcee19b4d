//! Input validation for moments and account forms.
//!
//! Everything here runs before any storage or network call.

use crate::error::{Result, SmileError};
use crate::model::NewMoment;
use regex::Regex;
use std::sync::LazyLock;

/// Maximum moment length accepted by the capture form.
pub const MAX_CONTENT_LENGTH: usize = 280;

/// Maximum allowed length for a tag.
pub const MAX_TAG_LENGTH: usize = 50;

/// Maximum allowed length for a moment ID.
pub const MAX_ID_LENGTH: usize = 64;

/// Minimum password length for registration and login.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Characters forbidden in IDs; they would escape a storage key or URL path segment.
const FORBIDDEN_ID_CHARS: &[char] = &['/', '\\', '\0', '?', '#'];

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

/// Validates a moment before it is handed to a backend.
///
/// Text is the required field; media is optional.
pub fn validate_new_moment(new: &NewMoment) -> Result<()> {
    if new.content.trim().is_empty() {
        return Err(SmileError::Validation(
            "Please write something about your moment".to_string(),
        ));
    }
    for tag in &new.tags {
        validate_tag(tag)?;
    }
    match &new.media {
        Some(media) if media.uri.trim().is_empty() => Err(SmileError::Validation(
            "Media reference cannot be empty".to_string(),
        )),
        _ => Ok(()),
    }
}

/// Length cap applied by the capture form.
pub fn validate_content_length(content: &str) -> Result<()> {
    let len = content.trim().chars().count();
    if len > MAX_CONTENT_LENGTH {
        return Err(SmileError::Validation(format!(
            "Moment exceeds maximum length of {} characters ({} given)",
            MAX_CONTENT_LENGTH, len
        )));
    }
    Ok(())
}

/// Validates a tag name.
pub fn validate_tag(tag: &str) -> Result<()> {
    if tag.trim().is_empty() {
        return Err(SmileError::Validation("Tag cannot be empty".to_string()));
    }
    if tag.chars().count() > MAX_TAG_LENGTH {
        return Err(SmileError::Validation(format!(
            "Tag exceeds maximum length of {} characters",
            MAX_TAG_LENGTH
        )));
    }
    Ok(())
}

/// Validates an ID before it is used in a storage key or request path.
pub fn validate_id(id: &str) -> Result<()> {
    if id.is_empty() {
        return Err(SmileError::Validation("ID cannot be empty".to_string()));
    }
    if id.len() > MAX_ID_LENGTH {
        return Err(SmileError::Validation(format!(
            "ID exceeds maximum length of {} characters",
            MAX_ID_LENGTH
        )));
    }
    if id.contains("..") {
        return Err(SmileError::Validation(
            "ID cannot contain '..' (path traversal)".to_string(),
        ));
    }
    for c in FORBIDDEN_ID_CHARS {
        if id.contains(*c) {
            return Err(SmileError::Validation(format!("ID cannot contain {:?}", c)));
        }
    }
    Ok(())
}

/// Validates and normalizes an email address.
pub fn validate_email(email: &str) -> Result<String> {
    let email = email.trim();
    if email.is_empty() {
        return Err(SmileError::Validation("Email is required".to_string()));
    }
    if !EMAIL_RE.is_match(email) {
        return Err(SmileError::Validation(
            "Please enter a valid email address".to_string(),
        ));
    }
    Ok(email.to_string())
}

pub fn validate_password(password: &str) -> Result<()> {
    if password.is_empty() {
        return Err(SmileError::Validation("Password is required".to_string()));
    }
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(SmileError::Validation(format!(
            "Password must be at least {} characters long",
            MIN_PASSWORD_LENGTH
        )));
    }
    Ok(())
}

pub fn validate_display_name(name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(SmileError::Validation("Full name is required".to_string()));
    }
    Ok(name.to_string())
}
