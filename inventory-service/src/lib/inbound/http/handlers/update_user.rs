use std::str::FromStr;

use axum::extract::Path;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Role;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::UserData;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequestBody {
    pub username: Option<String>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
    pub active: Option<bool>,
}

impl UpdateUserRequestBody {
    fn try_into_command(self) -> Result<UpdateUserCommand, UserError> {
        Ok(UpdateUserCommand {
            username: self.username,
            full_name: self.full_name,
            email: self.email.map(EmailAddress::new).transpose()?,
            password: self.password,
            role: self
                .role
                .as_deref()
                .map(Role::from_str)
                .transpose()
                .map_err(UserError::from)?,
            active: self.active,
        })
    }
}

/// Partially update a user. Absent fields keep their current values; a
/// provided password is re-hashed before storage.
pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(body): Json<UpdateUserRequestBody>,
) -> Result<Json<UserData>, ApiError> {
    let id = UserId::from_string(&user_id).map_err(UserError::from)?;
    let command = body.try_into_command()?;
    let user = state.user_service.update_user(&id, command).await?;

    Ok(Json(UserData::from(&user)))
}
