pub mod booking;
pub mod cabin;
pub mod guest;

pub use booking::{Booking, BookingDraft, BookingStatus, BookingUpdate, NewBooking};
pub use cabin::Cabin;
pub use guest::GuestProfileUpdate;
