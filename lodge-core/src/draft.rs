use chrono::{NaiveDate, NaiveTime};
use lodge_shared::{BookingDraft, Cabin};

use crate::{CoreError, CoreResult};

/// Prices a stay at `cabin` from `start` (check-in) to `end` (check-out).
pub fn draft_booking(cabin: &Cabin, start: NaiveDate, end: NaiveDate) -> CoreResult<BookingDraft> {
    let num_nights = (end - start).num_days();
    if num_nights < 1 {
        return Err(CoreError::InvalidInput("Select a valid date range".to_string()));
    }
    let num_nights = i32::try_from(num_nights)
        .map_err(|_| CoreError::InvalidInput("Select a valid date range".to_string()))?;

    Ok(BookingDraft {
        cabin_id: cabin.id,
        cabin_price: f64::from(num_nights) * cabin.nightly_price(),
        start_date: start.and_time(NaiveTime::default()).and_utc(),
        end_date: end.and_time(NaiveTime::default()).and_utc(),
        num_nights,
    })
}

pub fn parse_stay_date(raw: &str) -> CoreResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| CoreError::InvalidInput("Select a valid date range".to_string()))
}
