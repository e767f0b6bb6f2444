pub mod actions;
pub mod cache;
pub mod draft;
pub mod forms;
pub mod identity;
#[cfg(any(test, feature = "test-utils"))]
pub mod memory;
pub mod repository;

pub use actions::{Navigation, ReservationActions};
pub use identity::{IdentityProvider, Session};

/// Terminal failures of a guest-facing action. None of them are retried; the
/// caller renders the message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    #[error("You must be logged in.")]
    Unauthenticated,
    #[error("{0}")]
    InvalidInput(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    PersistenceError(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
