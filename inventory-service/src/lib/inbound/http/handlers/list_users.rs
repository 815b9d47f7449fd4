use axum::extract::State;
use axum::Json;

use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::UserData;
use crate::inbound::http::router::AppState;

/// List every provisioned account.
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserData>>, ApiError> {
    let users = state.user_service.list_users().await?;

    Ok(Json(users.iter().map(UserData::from).collect()))
}
