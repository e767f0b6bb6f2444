pub mod models;
pub mod pii;

pub use models::{Booking, BookingDraft, BookingStatus, BookingUpdate, Cabin, GuestProfileUpdate, NewBooking};
pub use pii::Masked;
