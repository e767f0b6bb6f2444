use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;

use crate::{CoreError, CoreResult};

pub const MAX_OBSERVATIONS_CHARS: usize = 500;

static NATIONAL_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9]{6,12}$").expect("invalid national ID pattern"));

// Every field defaults to empty so that a missing field never rejects the request
// before the caller has been authenticated.

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileForm {
    #[serde(rename = "nationalID", default)]
    pub national_id: String,
    #[serde(default)]
    pub nationality: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationForm {
    #[serde(default)]
    pub num_guests: String,
    #[serde(default)]
    pub observations: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditReservationForm {
    #[serde(default)]
    pub booking_id: String,
    #[serde(default)]
    pub num_guests: String,
    #[serde(default)]
    pub observations: String,
}

pub fn validate_national_id(national_id: &str) -> CoreResult<()> {
    if NATIONAL_ID.is_match(national_id) {
        Ok(())
    } else {
        Err(CoreError::InvalidInput("Provide a valid ID".to_string()))
    }
}

/// Splits `"<name>%<flag>"`. A value without `%` yields no flag; anything after a
/// second `%` is dropped.
pub fn split_nationality(raw: &str) -> (String, Option<String>) {
    let mut parts = raw.split('%');
    let nationality = parts.next().unwrap_or_default().to_string();
    let flag = parts.next().map(str::to_string);
    (nationality, flag)
}

/// Keeps the first 500 characters (not bytes).
pub fn truncate_observations(raw: &str) -> String {
    raw.chars().take(MAX_OBSERVATIONS_CHARS).collect()
}

/// Numeric coercion of a form field: blank reads as zero, anything that is not
/// an integer reads as `None`.
pub fn coerce_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(0);
    }
    trimmed.parse().ok()
}

pub fn parse_num_guests(raw: &str) -> CoreResult<i32> {
    coerce_int(raw)
        .and_then(|n| i32::try_from(n).ok())
        .ok_or_else(|| CoreError::InvalidInput("Provide a valid number of guests".to_string()))
}
