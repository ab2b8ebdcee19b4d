//! # mademesmile - a journal for the moments that made you smile
//!
//! Moments are short text entries with optional photo, video or audio
//! media, a category, a free-form collection and tags. They can be kept on
//! the device, in a per-user Firestore collection, or on the journal's own
//! REST server, all behind one facade.
//!
//! ## Quick Start
//!
//! ```bash
//! # Start a journal in the current directory
//! smile init
//!
//! # Capture a moment
//! smile create "Coffee with mom" --category family --tag morning
//!
//! # Newest first, optionally filtered
//! smile list --category family
//!
//! # Streaks and counts
//! smile stats
//! ```
//!
//! ## Modules
//!
//! - [`service`]: The [`MomentService`](service::MomentService) facade
//! - [`storage`]: Local, document and REST backends
//! - [`session`]: Explicit session and on-device session state
//! - [`auth`]: Registration and login
//! - [`model`]: Moments, categories and stats
//! - [`cli`]: Command-line interface

/// HTTP client for the REST backend's envelope protocol.
pub mod api;

pub mod auth;

/// Command-line interface definitions and handlers.
pub mod cli;

/// Configuration loading and management.
///
/// Handles `.smile.yml` files and journal discovery.
pub mod config;

/// Error types and result aliases.
pub mod error;

pub mod logging;

/// Data models for moments.
pub mod model;

pub mod search;
pub mod service;
pub mod session;

/// Storage backends behind the facade.
pub mod storage;

/// Input validation for moments, ids and account forms.
pub mod validation;
