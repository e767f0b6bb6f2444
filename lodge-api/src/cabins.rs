use axum::{
    extract::{Path, State},
    routing::post,
    Form, Router,
};
use lodge_core::forms::ReservationForm;
use serde::Deserialize;

use crate::{
    actions::ActionResponse,
    error::AppError,
    middleware::auth::RequestIdentity,
    state::AppState,
};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationForm {
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub num_guests: String,
    #[serde(default)]
    pub observations: String,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/cabins/{cabin_id}/reservations", post(create_reservation))
}

/// POST /cabins/{cabin_id}/reservations
///
/// Prices come from the stored cabin, never from the form.
async fn create_reservation(
    State(state): State<AppState>,
    identity: RequestIdentity,
    Path(cabin_id): Path<i64>,
    Form(form): Form<CreateReservationForm>,
) -> Result<ActionResponse, AppError> {
    let actions = state.actions(&identity);

    let draft = actions
        .draft_booking(cabin_id, &form.start_date, &form.end_date)
        .await?;
    let nav = actions
        .create_reservation(
            draft,
            ReservationForm {
                num_guests: form.num_guests,
                observations: form.observations,
            },
        )
        .await?;

    Ok(ActionResponse(nav))
}
