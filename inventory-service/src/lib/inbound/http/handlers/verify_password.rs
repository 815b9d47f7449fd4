use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyPasswordRequestBody {
    pub user_id: i64,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct VerifyPasswordResponseBody {
    pub valid: bool,
}

/// Check a candidate password against a user's stored hash.
///
/// Always answers with a `valid` flag; an unknown user reports `false` with
/// a 404 rather than an error body.
pub async fn verify_password(
    State(state): State<AppState>,
    Json(body): Json<VerifyPasswordRequestBody>,
) -> Result<Response, ApiError> {
    let id = UserId(body.user_id);

    match state.user_service.verify_password(&id, &body.password).await {
        Ok(valid) => Ok((StatusCode::OK, Json(VerifyPasswordResponseBody { valid })).into_response()),
        Err(UserError::NotFound(_)) => Ok((
            StatusCode::NOT_FOUND,
            Json(VerifyPasswordResponseBody { valid: false }),
        )
            .into_response()),
        Err(e) => Err(e.into()),
    }
}
