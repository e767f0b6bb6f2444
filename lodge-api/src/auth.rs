use axum::{
    extract::State,
    http::header::SET_COOKIE,
    response::{AppendHeaders, IntoResponse},
    routing::post,
    Router,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use lodge_core::Session;

use crate::{
    actions::ActionResponse,
    error::AppError,
    middleware::auth::{RequestIdentity, SessionClaims},
    state::{AppState, AuthConfig},
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signin", post(sign_in))
        .route("/auth/signout", post(sign_out))
}

/// Mints the session cookie value the identity provider's callback hands out.
pub fn issue_session_token(auth: &AuthConfig, session: &Session) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = SessionClaims {
        sub: session.email.clone(),
        guest_id: session.guest_id,
        name: session.name.clone(),
        exp: (Utc::now() + Duration::seconds(auth.expiration as i64)).timestamp() as usize,
    };

    encode(&Header::default(), &claims, &EncodingKey::from_secret(auth.secret.as_bytes()))
}

async fn sign_in(
    State(state): State<AppState>,
    identity: RequestIdentity,
) -> Result<ActionResponse, AppError> {
    let nav = state.actions(&identity).sign_in().await?;
    Ok(ActionResponse(nav))
}

async fn sign_out(
    State(state): State<AppState>,
    identity: RequestIdentity,
) -> Result<impl IntoResponse, AppError> {
    let nav = state.actions(&identity).sign_out().await?;
    let expired = format!(
        "{}=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax",
        state.auth.cookie_name
    );
    Ok((AppendHeaders([(SET_COOKIE, expired)]), ActionResponse(nav)))
}
