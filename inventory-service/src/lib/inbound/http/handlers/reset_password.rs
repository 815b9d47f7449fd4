use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use crate::inbound::http::router::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequestBody {
    pub token: String,
    pub new_password: String,
}

#[derive(Debug, Serialize)]
pub struct ResetPasswordResponseBody {
    pub valid: &'static str,
}

/// Complete the password-reset flow.
///
/// A consumable token sets the new password and answers `{"valid": "true"}`.
/// Unknown, expired and already-used tokens are indistinguishable to the
/// caller: all answer 400 with `{"valid": "false"}`.
pub async fn reset_password(
    State(state): State<AppState>,
    Json(body): Json<ResetPasswordRequestBody>,
) -> Response {
    match state
        .user_service
        .reset_password(&body.token, &body.new_password)
        .await
    {
        Ok(()) => (
            StatusCode::OK,
            Json(ResetPasswordResponseBody { valid: "true" }),
        )
            .into_response(),
        Err(e) => {
            tracing::debug!("Password reset refused: {}", e);
            (
                StatusCode::BAD_REQUEST,
                Json(ResetPasswordResponseBody { valid: "false" }),
            )
                .into_response()
        }
    }
}
