use axum::extract::Path;
use axum::extract::State;
use axum::Json;

use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::UserData;
use crate::inbound::http::router::AppState;

/// Fetch a single user by login email.
pub async fn get_user_by_email(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<UserData>, ApiError> {
    let user = state.user_service.get_user_by_email(&email).await?;

    Ok(Json(UserData::from(&user)))
}
