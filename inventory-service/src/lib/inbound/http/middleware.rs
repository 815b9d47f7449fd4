use axum::extract::Request;
use axum::extract::State;
use axum::http;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::Utc;
use serde_json::json;

use auth::TokenCodec;

use crate::domain::user::models::Role;
use crate::domain::user::models::User;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

/// Authenticated identity attached to the request by [`authorize`].
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user: User,
    pub authorities: Vec<String>,
}

/// Bearer-token gate applied to every request.
///
/// A request without a bearer token passes through unauthenticated and the
/// route policy decides its fate. A token that fails signature or structural
/// checks is rejected outright with 403. A token that is authentic but past
/// its expiry is treated exactly like no token at all. Only a token that
/// clears both checks and resolves to a known account attaches a
/// [`CurrentUser`] to the request.
pub async fn authorize(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let token = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(TokenCodec::extract_from_header)
        .map(str::to_owned);

    let Some(token) = token else {
        return next.run(req).await;
    };

    let claims = match state.token_codec.parse(&token) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::warn!("Rejected malformed bearer token: {}", e);
            return forbidden("Invalid token");
        }
    };

    // Authentic but stale: same treatment as no token at all
    if !claims.is_valid(Utc::now().timestamp()) {
        tracing::debug!(subject = %claims.sub, "Expired bearer token ignored");
        return next.run(req).await;
    }

    match state.user_service.get_user_by_email(&claims.sub).await {
        Ok(user) => {
            let authorities = vec![user.role.as_str().to_string()];
            req.extensions_mut().insert(CurrentUser { user, authorities });
            next.run(req).await
        }
        Err(UserError::NotFound(_)) => {
            tracing::warn!(subject = %claims.sub, "Token subject no longer resolves to an account");
            forbidden("Invalid token")
        }
        Err(e) => {
            // Fail closed: if the identity cannot be resolved, the request
            // never reaches a handler authenticated.
            tracing::error!("Identity resolution failed: {}", e);
            forbidden("Invalid token")
        }
    }
}

/// Route-policy guard for protected routes.
///
/// Unauthenticated requests get 401; an authenticated identity whose
/// authorities include no recognized role gets 403.
pub async fn require_any_role(req: Request, next: Next) -> Response {
    let Some(current) = req.extensions().get::<CurrentUser>() else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "Authentication required" })),
        )
            .into_response();
    };

    let recognized = current.authorities.iter().any(|authority| {
        Role::RECOGNIZED
            .iter()
            .any(|role| role.as_str() == authority)
    });

    if recognized {
        next.run(req).await
    } else {
        forbidden("Insufficient role")
    }
}

fn forbidden(message: &str) -> Response {
    (StatusCode::FORBIDDEN, Json(json!({ "error": message }))).into_response()
}
