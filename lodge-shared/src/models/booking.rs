use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle of a booking. Only `Unconfirmed` is ever written by the guest-facing actions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum BookingStatus {
    Unconfirmed,
    CheckedIn,
    CheckedOut,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Unconfirmed => "unconfirmed",
            BookingStatus::CheckedIn => "checked-in",
            BookingStatus::CheckedOut => "checked-out",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unconfirmed" => Ok(BookingStatus::Unconfirmed),
            "checked-in" => Ok(BookingStatus::CheckedIn),
            "checked-out" => Ok(BookingStatus::CheckedOut),
            other => Err(format!("unknown booking status: {}", other)),
        }
    }
}

/// A booking as listed on the guest's reservations page, joined with its cabin.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub num_nights: i32,
    pub num_guests: i32,
    pub total_price: f64,
    pub status: BookingStatus,
    pub guest_id: i64,
    pub cabin_id: i64,
    pub cabin_name: Option<String>,
    pub cabin_image: Option<String>,
}

/// Server-constructed booking data. Never built from client input directly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookingDraft {
    pub cabin_id: i64,
    pub cabin_price: f64,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub num_nights: i32,
}

/// Row inserted into `bookings` by the create-reservation action.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewBooking {
    pub cabin_id: i64,
    pub guest_id: i64,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub num_nights: i32,
    pub num_guests: i32,
    pub observations: String,
    pub cabin_price: f64,
    pub extras_price: f64,
    pub total_price: f64,
    pub is_paid: bool,
    pub has_breakfast: bool,
    pub status: BookingStatus,
}

impl NewBooking {
    /// Merge a draft with the guest's input; extras, payment and breakfast start out empty.
    pub fn unconfirmed(draft: BookingDraft, guest_id: i64, num_guests: i32, observations: String) -> Self {
        Self {
            cabin_id: draft.cabin_id,
            guest_id,
            start_date: draft.start_date,
            end_date: draft.end_date,
            num_nights: draft.num_nights,
            num_guests,
            observations,
            cabin_price: draft.cabin_price,
            extras_price: 0.0,
            total_price: draft.cabin_price,
            is_paid: false,
            has_breakfast: false,
            status: BookingStatus::Unconfirmed,
        }
    }
}

/// The only columns a guest may change on an existing booking.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookingUpdate {
    pub num_guests: i32,
    pub observations: String,
}
