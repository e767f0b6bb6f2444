pub mod auth;

pub use auth::{RequestIdentity, SessionClaims};
