//! # Request DTOs
//!
//! Strongly-typed request objects bound after a body has passed schema
//! validation. Enumerated strings become Rust enums here, so a value that
//! survived validation but does not fit the type still fails at binding.

use std::fmt;

use chrono::{DateTime, Utc};
use fitbyte_validator::SchemaId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::extractors::Validate;

/// Longest activity accepted at binding time: one day.
pub const MAX_DURATION_MINUTES: u32 = 1440;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Preference {
    Cardio,
    Weight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WeightUnit {
    Kg,
    Lbs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HeightUnit {
    Cm,
    Inch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum ActivityType {
    Walking,
    Yoga,
    Stretching,
    Cycling,
    Swimming,
    Dancing,
    Hiking,
    Running,
    #[serde(rename = "HIIT")]
    Hiit,
    JumpRope,
}

/// Body of a profile update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdateRequest {
    pub preference: Preference,
    pub weight_unit: WeightUnit,
    pub height_unit: HeightUnit,
    #[schema(minimum = 10, maximum = 1000)]
    pub weight: u32,
    #[schema(minimum = 3, maximum = 250)]
    pub height: u32,
    #[schema(min_length = 2, max_length = 60)]
    pub name: String,
    #[schema(example = "https://example.com/avatar.png")]
    pub image_uri: String,
}

impl ProfileUpdateRequest {
    pub const SCHEMA: SchemaId = SchemaId::ProfileUpdate;
}

impl Validate for ProfileUpdateRequest {}

/// Body of an activity creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRequest {
    pub activity_type: ActivityType,
    #[schema(example = "2024-01-15T07:30:00Z")]
    pub done_at: DateTime<Utc>,
    #[schema(minimum = 1, maximum = 1440)]
    pub duration_in_minutes: u32,
}

impl ActivityRequest {
    pub const SCHEMA: SchemaId = SchemaId::ActivityCreate;
}

impl Validate for ActivityRequest {
    fn validate(&self) -> Result<(), String> {
        check_duration(self.duration_in_minutes)
    }
}

/// Body of an activity update. Every field is optional at the type level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActivityUpdateRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_type: Option<ActivityType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub done_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_in_minutes: Option<u32>,
}

impl ActivityUpdateRequest {
    pub const SCHEMA: SchemaId = SchemaId::ActivityUpdate;
}

impl Validate for ActivityUpdateRequest {
    fn validate(&self) -> Result<(), String> {
        self.duration_in_minutes.map_or(Ok(()), check_duration)
    }
}

fn check_duration(minutes: u32) -> Result<(), String> {
    if (1..=MAX_DURATION_MINUTES).contains(&minutes) {
        Ok(())
    } else {
        Err(format!(
            "durationInMinutes must be between 1 and {MAX_DURATION_MINUTES}, got {minutes}"
        ))
    }
}

/// Body of a login or registration.
#[derive(Clone, PartialEq, Deserialize, ToSchema)]
pub struct LoginRegisterRequest {
    #[schema(example = "jo@example.com")]
    pub email: String,
    #[schema(min_length = 8, max_length = 32)]
    pub password: String,
}

impl fmt::Debug for LoginRegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRegisterRequest")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl Validate for LoginRegisterRequest {}

/// What a credentials route echoes back: never the password.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CredentialsSummary {
    pub email: String,
}

impl From<LoginRegisterRequest> for CredentialsSummary {
    fn from(request: LoginRegisterRequest) -> Self {
        Self {
            email: request.email,
        }
    }
}

/// Dry-run response: the schema a body passed and the bound result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Accepted<T> {
    pub schema: String,
    pub payload: T,
}

impl<T> Accepted<T> {
    pub fn new(schema: SchemaId, payload: T) -> Self {
        Self {
            schema: schema.as_str().to_string(),
            payload,
        }
    }
}
