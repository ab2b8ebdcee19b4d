//! Data models for moments.
//!
//! - [`Moment`]: a stored journal entry in its canonical shape
//! - [`NewMoment`] / [`MediaRef`]: input for creating a moment
//! - [`MediaType`]: text, photo, video or audio
//! - [`Category`]: static category definitions
//! - [`MomentStats`] / [`DailyActivity`]: aggregates for the profile view

mod moment;
mod stats;
mod types;

pub use moment::{MediaRef, Moment, NewMoment};
pub use stats::{DailyActivity, MAX_ACTIVITY_DAYS, MomentStats, daily_activity};
pub use types::{Category, DEFAULT_CATEGORY, MediaType, default_categories};
