use std::str::FromStr;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Role;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::UserData;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequestBody {
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub role: String,
}

impl CreateUserRequestBody {
    fn try_into_command(self) -> Result<CreateUserCommand, UserError> {
        if self.username.trim().is_empty() || self.password.trim().is_empty() {
            return Err(UserError::BadRequest(
                "username and password are required".to_string(),
            ));
        }

        Ok(CreateUserCommand {
            username: self.username,
            full_name: self.full_name,
            email: EmailAddress::new(self.email)?,
            password: self.password,
            role: Role::from_str(&self.role)?,
        })
    }
}

/// Provision a new account. New accounts start active.
pub async fn create_user(
    State(state): State<AppState>,
    Json(body): Json<CreateUserRequestBody>,
) -> Result<(StatusCode, Json<UserData>), ApiError> {
    let command = body.try_into_command()?;
    let user = state.user_service.create_user(command).await?;

    Ok((StatusCode::CREATED, Json(UserData::from(&user))))
}
