use std::sync::Arc;
use lodge_core::cache::PageCache;
use lodge_core::repository::{BookingRepository, CabinRepository, GuestRepository};
use lodge_core::ReservationActions;

use crate::middleware::auth::RequestIdentity;

#[derive(Clone)]
pub struct AuthConfig {
    pub secret: String,
    pub expiration: u64,
    pub cookie_name: String,
    pub sign_in_url: String,
}

#[derive(Clone)]
pub struct AppState {
    pub guests: Arc<dyn GuestRepository>,
    pub bookings: Arc<dyn BookingRepository>,
    pub cabins: Arc<dyn CabinRepository>,
    pub cache: Arc<dyn PageCache>,
    pub auth: AuthConfig,
}

impl AppState {
    /// Binds the form actions to this request's caller.
    pub fn actions<'a>(&'a self, identity: &'a RequestIdentity) -> ReservationActions<'a> {
        ReservationActions::new(
            identity,
            self.guests.as_ref(),
            self.bookings.as_ref(),
            self.cabins.as_ref(),
            self.cache.as_ref(),
        )
    }
}
