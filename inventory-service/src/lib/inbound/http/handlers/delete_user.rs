use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

/// Delete a user. Any reset token they hold goes with them.
pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = UserId::from_string(&user_id).map_err(UserError::from)?;
    state.user_service.delete_user(&id).await?;

    Ok(StatusCode::NO_CONTENT)
}
