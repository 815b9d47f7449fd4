use axum::extract::Path;
use axum::extract::State;
use axum::Json;

use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::UserData;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

/// Fetch a single user by numeric id.
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<UserData>, ApiError> {
    let id = UserId::from_string(&user_id).map_err(UserError::from)?;
    let user = state.user_service.get_user(&id).await?;

    Ok(Json(UserData::from(&user)))
}
