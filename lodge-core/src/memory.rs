//! In-memory collaborators for exercising the actions without Postgres, Redis
//! or a real identity provider.
//!
//! `MemoryStore` counts every mutating call it receives (successful or not) so
//! tests can assert that a rejected action never reached the store.

use async_trait::async_trait;
use chrono::Utc;
use lodge_shared::{Booking, BookingUpdate, Cabin, GuestProfileUpdate, NewBooking};
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;

use crate::cache::PageCache;
use crate::identity::{IdentityProvider, Session};
use crate::repository::{BookingRepository, CabinRepository, GuestRepository, RepoError};
use crate::CoreResult;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuestRecord {
    pub id: i64,
    pub email: String,
    pub nationality: Option<String>,
    pub country_flag: Option<String>,
    pub national_id: Option<String>,
}

#[derive(Debug, Clone)]
struct StoredBooking {
    id: i64,
    created_at: chrono::DateTime<Utc>,
    record: NewBooking,
}

#[derive(Default)]
struct StoreState {
    guests: HashMap<i64, GuestRecord>,
    cabins: HashMap<i64, Cabin>,
    bookings: BTreeMap<i64, StoredBooking>,
    next_booking_id: i64,
    mutations: usize,
}

impl StoreState {
    fn insert_booking(&mut self, booking: NewBooking) -> i64 {
        self.next_booking_id += 1;
        let id = self.next_booking_id;
        self.bookings.insert(
            id,
            StoredBooking {
                id,
                created_at: Utc::now(),
                record: booking,
            },
        );
        id
    }
}

/// Guests, cabins and bookings held in memory.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<StoreState>,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_guest(mut self, id: i64, email: &str) -> Self {
        self.state.get_mut().guests.insert(
            id,
            GuestRecord {
                id,
                email: email.to_string(),
                ..GuestRecord::default()
            },
        );
        self
    }

    pub fn with_cabin(mut self, cabin: Cabin) -> Self {
        self.state.get_mut().cabins.insert(cabin.id, cabin);
        self
    }

    /// Seeds a booking without counting it as a mutation.
    pub fn with_booking(mut self, booking: NewBooking) -> Self {
        self.state.get_mut().insert_booking(booking);
        self
    }

    /// Makes every subsequent insert/update/delete fail.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub async fn mutations(&self) -> usize {
        self.state.lock().await.mutations
    }

    pub async fn guest(&self, id: i64) -> Option<GuestRecord> {
        self.state.lock().await.guests.get(&id).cloned()
    }

    pub async fn booking(&self, id: i64) -> Option<NewBooking> {
        self.state.lock().await.bookings.get(&id).map(|b| b.record.clone())
    }

    pub async fn booking_ids(&self) -> Vec<i64> {
        self.state.lock().await.bookings.keys().copied().collect()
    }

    fn check_writable(&self) -> Result<(), RepoError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err("store unavailable".into());
        }
        Ok(())
    }
}

#[async_trait]
impl GuestRepository for MemoryStore {
    async fn update_profile(
        &self,
        guest_id: i64,
        update: &GuestProfileUpdate,
    ) -> Result<(), RepoError> {
        let mut state = self.state.lock().await;
        state.mutations += 1;
        self.check_writable()?;

        if let Some(guest) = state.guests.get_mut(&guest_id) {
            guest.nationality = Some(update.nationality.clone());
            if let Some(flag) = &update.country_flag {
                guest.country_flag = Some(flag.clone());
            }
            guest.national_id = Some(update.national_id.clone());
        }
        Ok(())
    }
}

#[async_trait]
impl BookingRepository for MemoryStore {
    async fn list_for_guest(
        &self,
        guest_id: i64,
    ) -> Result<Vec<Booking>, RepoError> {
        let state = self.state.lock().await;
        let mut bookings: Vec<Booking> = state
            .bookings
            .values()
            .filter(|b| b.record.guest_id == guest_id)
            .map(|b| {
                let cabin = state.cabins.get(&b.record.cabin_id);
                Booking {
                    id: b.id,
                    created_at: b.created_at,
                    start_date: b.record.start_date,
                    end_date: b.record.end_date,
                    num_nights: b.record.num_nights,
                    num_guests: b.record.num_guests,
                    total_price: b.record.total_price,
                    status: b.record.status,
                    guest_id: b.record.guest_id,
                    cabin_id: b.record.cabin_id,
                    cabin_name: cabin.map(|c| c.name.clone()),
                    cabin_image: cabin.and_then(|c| c.image.clone()),
                }
            })
            .collect();
        bookings.sort_by_key(|b| b.start_date);
        Ok(bookings)
    }

    async fn is_owned_by(
        &self,
        booking_id: i64,
        guest_id: i64,
    ) -> Result<bool, RepoError> {
        let state = self.state.lock().await;
        Ok(state
            .bookings
            .get(&booking_id)
            .is_some_and(|b| b.record.guest_id == guest_id))
    }

    async fn insert(
        &self,
        booking: &NewBooking,
    ) -> Result<i64, RepoError> {
        let mut state = self.state.lock().await;
        state.mutations += 1;
        self.check_writable()?;
        Ok(state.insert_booking(booking.clone()))
    }

    async fn update(
        &self,
        booking_id: i64,
        update: &BookingUpdate,
    ) -> Result<(), RepoError> {
        let mut state = self.state.lock().await;
        state.mutations += 1;
        self.check_writable()?;

        if let Some(stored) = state.bookings.get_mut(&booking_id) {
            stored.record.num_guests = update.num_guests;
            stored.record.observations = update.observations.clone();
        }
        Ok(())
    }

    async fn delete(
        &self,
        booking_id: i64,
    ) -> Result<(), RepoError> {
        let mut state = self.state.lock().await;
        state.mutations += 1;
        self.check_writable()?;
        state.bookings.remove(&booking_id);
        Ok(())
    }
}

#[async_trait]
impl CabinRepository for MemoryStore {
    async fn get_cabin(
        &self,
        cabin_id: i64,
    ) -> Result<Option<Cabin>, RepoError> {
        Ok(self.state.lock().await.cabins.get(&cabin_id).cloned())
    }
}

/// Remembers every invalidated path, in order.
#[derive(Default)]
pub struct RecordingPageCache {
    invalidated: Mutex<Vec<String>>,
}

impl RecordingPageCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn invalidated(&self) -> Vec<String> {
        self.invalidated.lock().await.clone()
    }
}

#[async_trait]
impl PageCache for RecordingPageCache {
    async fn invalidate(&self, path: &str) {
        self.invalidated.lock().await.push(path.to_string());
    }
}

/// Identity provider with a fixed session (or none).
pub struct FixedIdentity {
    session: Option<Session>,
}

impl FixedIdentity {
    pub fn signed_in(session: Session) -> Self {
        Self { session: Some(session) }
    }

    pub fn anonymous() -> Self {
        Self { session: None }
    }
}

#[async_trait]
impl IdentityProvider for FixedIdentity {
    async fn current_session(&self) -> Option<Session> {
        self.session.clone()
    }

    async fn begin_sign_in(&self, provider: &str, redirect_to: &str) -> CoreResult<String> {
        Ok(format!("/auth/{}?callbackUrl={}", provider, redirect_to))
    }

    async fn end_session(&self, redirect_to: &str) -> CoreResult<String> {
        Ok(redirect_to.to_string())
    }
}
