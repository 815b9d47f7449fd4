use std::str::FromStr;

use axum::extract::Path;
use axum::extract::State;
use axum::Json;

use crate::domain::user::models::Role;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::UserData;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

/// List users holding a given role name.
pub async fn get_users_by_role(
    State(state): State<AppState>,
    Path(role): Path<String>,
) -> Result<Json<Vec<UserData>>, ApiError> {
    let role = Role::from_str(&role).map_err(UserError::from)?;
    let users = state.user_service.find_by_role(role).await?;

    Ok(Json(users.iter().map(UserData::from).collect()))
}
