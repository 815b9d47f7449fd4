use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

#[derive(Debug, Deserialize)]
pub struct RequestPasswordResetBody {
    pub email: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestPasswordResetResponseBody {
    pub message: String,
    pub user_id: i64,
}

/// Start the password-reset flow for an email.
///
/// Generates a fresh token, displacing any previous one for the same user,
/// and hands it to the notification channel. An unknown email answers 404.
pub async fn request_password_reset(
    State(state): State<AppState>,
    Json(body): Json<RequestPasswordResetBody>,
) -> Result<Json<RequestPasswordResetResponseBody>, ApiError> {
    let user_id = state.user_service.request_password_reset(&body.email).await?;

    Ok(Json(RequestPasswordResetResponseBody {
        message: "Password reset email sent".to_string(),
        user_id: user_id.0,
    }))
}
