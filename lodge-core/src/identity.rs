use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::CoreResult;

/// The authenticated caller, as vouched for by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub guest_id: i64,
    pub email: String,
    pub name: Option<String>,
}

/// Request-scoped view of the identity provider.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// The caller's session, or `None` when nobody is signed in.
    async fn current_session(&self) -> Option<Session>;

    /// Start an OAuth sign-in with `provider`; returns the URL the browser should load.
    async fn begin_sign_in(&self, provider: &str, redirect_to: &str) -> CoreResult<String>;

    /// Terminate the current session; returns the URL the browser should load afterwards.
    async fn end_session(&self, redirect_to: &str) -> CoreResult<String>;
}
