use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::UserData;
use crate::inbound::http::router::AppState;

#[derive(Debug, Deserialize)]
pub struct SignInRequestBody {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInResponseBody {
    pub token: String,
    pub token_type: &'static str,
    pub user: UserData,
    pub role: String,
}

/// Verify credentials and issue a bearer token.
///
/// Unknown emails yield 404. A disabled account and a wrong password both
/// yield 400, with distinct `UserDisabled` / `CredentialMismatch` codes so
/// clients can tell the cases apart.
pub async fn sign_in(
    State(state): State<AppState>,
    Json(body): Json<SignInRequestBody>,
) -> Result<(StatusCode, Json<SignInResponseBody>), ApiError> {
    let signed = state
        .auth_service
        .sign_in(&body.email, &body.password)
        .await?;

    let role = signed.user.role.as_str().to_string();

    Ok((
        StatusCode::OK,
        Json(SignInResponseBody {
            token: signed.token,
            token_type: signed.token_type,
            user: UserData::from(&signed.user),
            role,
        }),
    ))
}
