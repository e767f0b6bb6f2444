use async_trait::async_trait;
use lodge_shared::{Booking, BookingUpdate, Cabin, GuestProfileUpdate, NewBooking};

pub type RepoError = Box<dyn std::error::Error + Send + Sync>;

/// Access to the `guests` table
#[async_trait]
pub trait GuestRepository: Send + Sync {
    async fn update_profile(
        &self,
        guest_id: i64,
        update: &GuestProfileUpdate,
    ) -> Result<(), RepoError>;
}

/// Access to the `bookings` table
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn list_for_guest(
        &self,
        guest_id: i64,
    ) -> Result<Vec<Booking>, RepoError>;

    /// Point lookup filtered on both the booking id and its owner.
    async fn is_owned_by(
        &self,
        booking_id: i64,
        guest_id: i64,
    ) -> Result<bool, RepoError>;

    async fn insert(
        &self,
        booking: &NewBooking,
    ) -> Result<i64, RepoError>;

    async fn update(
        &self,
        booking_id: i64,
        update: &BookingUpdate,
    ) -> Result<(), RepoError>;

    async fn delete(
        &self,
        booking_id: i64,
    ) -> Result<(), RepoError>;
}

/// Read-only access to the `cabins` table
#[async_trait]
pub trait CabinRepository: Send + Sync {
    async fn get_cabin(
        &self,
        cabin_id: i64,
    ) -> Result<Option<Cabin>, RepoError>;
}
