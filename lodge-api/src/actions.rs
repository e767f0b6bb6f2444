use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use lodge_core::Navigation;

/// Renders a committed action: `204 No Content` when the page stays put,
/// `303 See Other` when it moves on.
pub struct ActionResponse(pub Navigation);

impl IntoResponse for ActionResponse {
    fn into_response(self) -> Response {
        match self.0 {
            Navigation::Stay => StatusCode::NO_CONTENT.into_response(),
            Navigation::Redirect(path) => Redirect::to(&path).into_response(),
        }
    }
}
