use axum::extract::Path;
use axum::extract::State;
use axum::Json;

use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::UserData;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

/// Flip a user's active flag. A deactivated user keeps their record but can
/// no longer sign in.
pub async fn change_user_status(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<UserData>, ApiError> {
    let id = UserId::from_string(&user_id).map_err(UserError::from)?;
    let user = state.user_service.change_status(&id).await?;

    Ok(Json(UserData::from(&user)))
}
