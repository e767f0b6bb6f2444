use axum::{
    extract::{Path, State},
    routing::{delete, get, post},
    Form, Json, Router,
};
use lodge_core::forms::{EditReservationForm, ProfileForm};
use lodge_shared::Booking;

use crate::{
    actions::ActionResponse,
    error::AppError,
    middleware::auth::RequestIdentity,
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/account/profile", post(update_profile))
        .route("/account/reservations", get(list_reservations))
        .route("/account/reservations/edit", post(update_reservation))
        .route("/account/reservations/{id}", delete(delete_reservation))
        .route("/account/reservations/{id}/delete", post(delete_reservation))
}

/// POST /account/profile
async fn update_profile(
    State(state): State<AppState>,
    identity: RequestIdentity,
    Form(form): Form<ProfileForm>,
) -> Result<ActionResponse, AppError> {
    let nav = state.actions(&identity).update_profile(form).await?;
    Ok(ActionResponse(nav))
}

/// GET /account/reservations
async fn list_reservations(
    State(state): State<AppState>,
    identity: RequestIdentity,
) -> Result<Json<Vec<Booking>>, AppError> {
    let bookings = state.actions(&identity).list_reservations().await?;
    Ok(Json(bookings))
}

/// POST /account/reservations/edit
async fn update_reservation(
    State(state): State<AppState>,
    identity: RequestIdentity,
    Form(form): Form<EditReservationForm>,
) -> Result<ActionResponse, AppError> {
    let nav = state.actions(&identity).update_reservation(form).await?;
    Ok(ActionResponse(nav))
}

/// DELETE /account/reservations/{id}
async fn delete_reservation(
    State(state): State<AppState>,
    identity: RequestIdentity,
    Path(booking_id): Path<i64>,
) -> Result<ActionResponse, AppError> {
    let nav = state.actions(&identity).delete_reservation(booking_id).await?;
    Ok(ActionResponse(nav))
}
