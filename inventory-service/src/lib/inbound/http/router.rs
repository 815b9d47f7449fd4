use std::sync::Arc;

use axum::middleware;
use axum::routing::get;
use axum::routing::patch;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use auth::TokenCodec;

use crate::domain::auth::service::AuthService;
use crate::domain::user::service::UserService;
use crate::inbound::http::handlers::change_user_status::change_user_status;
use crate::inbound::http::handlers::create_user::create_user;
use crate::inbound::http::handlers::delete_user::delete_user;
use crate::inbound::http::handlers::get_user::get_user;
use crate::inbound::http::handlers::get_user_by_email::get_user_by_email;
use crate::inbound::http::handlers::get_users_by_role::get_users_by_role;
use crate::inbound::http::handlers::list_users::list_users;
use crate::inbound::http::handlers::request_password_reset::request_password_reset;
use crate::inbound::http::handlers::reset_password::reset_password;
use crate::inbound::http::handlers::sign_in::sign_in;
use crate::inbound::http::handlers::update_user::update_user;
use crate::inbound::http::handlers::verify_password::verify_password;
use crate::inbound::http::middleware::authorize;
use crate::inbound::http::middleware::require_any_role;
use crate::outbound::notifications::TracingNotificationSender;
use crate::outbound::repositories::PostgresResetTokenRepository;
use crate::outbound::repositories::PostgresUserRepository;

pub type AppUserService =
    UserService<PostgresUserRepository, PostgresResetTokenRepository, TracingNotificationSender>;
pub type AppAuthService = AuthService<PostgresUserRepository>;

/// Shared application state injected into handlers and middleware.
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<AppUserService>,
    pub auth_service: Arc<AppAuthService>,
    pub token_codec: Arc<TokenCodec>,
}

/// Build the HTTP router.
///
/// Sign-in, account creation and the password-reset pair are reachable
/// without a token. Everything else sits behind the role guard. The bearer
/// gate wraps the whole tree so even public routes carry an identity when a
/// valid token is presented.
pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/api/auth/signin", post(sign_in))
        .route("/api/users", post(create_user))
        .route(
            "/api/users/request-password-reset",
            post(request_password_reset),
        )
        .route("/api/users/reset-password", post(reset_password));

    let protected_routes = Router::new()
        .route("/api/users", get(list_users))
        .route("/api/users/verify-password", post(verify_password))
        .route(
            "/api/users/:user_id",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route("/api/users/:user_id/status", patch(change_user_status))
        .route("/api/users/by-email/:email", get(get_user_by_email))
        .route("/api/users/by-role/:role", get(get_users_by_role))
        .route_layer(middleware::from_fn(require_any_role));

    public_routes
        .merge(protected_routes)
        .layer(middleware::from_fn_with_state(state.clone(), authorize))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
