use crate::user::models::User;

/// Token type reported alongside every issued token.
pub const TOKEN_TYPE: &str = "Bearer";

/// Result of a successful sign-in.
#[derive(Debug, Clone)]
pub struct SignedToken {
    /// Compact bearer token
    pub token: String,

    /// Always "Bearer"
    pub token_type: &'static str,

    /// The authenticated user (role included)
    pub user: User,
}
