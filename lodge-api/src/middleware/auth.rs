use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::request::Parts,
};
use axum_extra::{headers::Cookie, TypedHeader};
use jsonwebtoken::{decode, DecodingKey, Validation};
use lodge_core::{CoreResult, IdentityProvider, Session};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;

use crate::state::{AppState, AuthConfig};

// ============================================================================
// JWT Claims
// ============================================================================

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SessionClaims {
    /// Guest email
    pub sub: String,
    pub guest_id: i64,
    pub name: Option<String>,
    pub exp: usize,
}

impl From<SessionClaims> for Session {
    fn from(claims: SessionClaims) -> Self {
        Session {
            guest_id: claims.guest_id,
            email: claims.sub,
            name: claims.name,
        }
    }
}

pub fn decode_session(token: &str, secret: &str) -> Option<Session> {
    decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims.into())
    .map_err(|e| tracing::debug!("Ignoring session cookie: {}", e))
    .ok()
}

// ============================================================================
// Request-scoped identity
// ============================================================================

/// The caller behind one request, read from the session cookie.
///
/// Extraction never fails: a missing, malformed or expired token is simply no session,
/// and the action decides whether that matters.
pub struct RequestIdentity {
    session: Option<Session>,
    auth: AuthConfig,
}

impl FromRequestParts<AppState> for RequestIdentity {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = TypedHeader::<Cookie>::from_request_parts(parts, state)
            .await
            .ok()
            .and_then(|TypedHeader(cookie)| cookie.get(&state.auth.cookie_name).map(str::to_owned));

        let session = token.and_then(|t| decode_session(&t, &state.auth.secret));

        Ok(Self {
            session,
            auth: state.auth.clone(),
        })
    }
}

#[async_trait]
impl IdentityProvider for RequestIdentity {
    async fn current_session(&self) -> Option<Session> {
        self.session.clone()
    }

    async fn begin_sign_in(&self, provider: &str, redirect_to: &str) -> CoreResult<String> {
        Ok(format!(
            "{}/{}?callbackUrl={}",
            self.auth.sign_in_url.trim_end_matches('/'),
            provider,
            redirect_to
        ))
    }

    async fn end_session(&self, redirect_to: &str) -> CoreResult<String> {
        if let Some(session) = &self.session {
            tracing::info!(guest_id = session.guest_id, "Session ended");
        }
        Ok(redirect_to.to_string())
    }
}
