use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use rand::distributions::Alphanumeric;
use rand::Rng;

use crate::user::models::UserId;

/// Length of the random reset token string.
pub const TOKEN_LENGTH: usize = 10;

/// Lifetime of a reset token.
pub const TOKEN_TTL_HOURS: i64 = 1;

/// Single-use, time-limited password reset token.
///
/// At most one row exists per user (enforced by a unique constraint);
/// issuing a new token replaces any prior one. `used` transitions
/// false -> true exactly once and never back.
#[derive(Debug, Clone)]
pub struct PasswordResetToken {
    pub id: i64,
    pub token: String,
    pub user_id: UserId,
    pub expiry_date: DateTime<Utc>,
    pub used: bool,
}

impl PasswordResetToken {
    /// A token is consumable only while unused and before its expiry.
    pub fn is_consumable(&self, now: DateTime<Utc>) -> bool {
        !self.used && now < self.expiry_date
    }
}

/// Freshly generated token pending persistence.
#[derive(Debug, Clone)]
pub struct NewResetToken {
    pub token: String,
    pub user_id: UserId,
    pub expiry_date: DateTime<Utc>,
}

impl NewResetToken {
    /// Generate a random fixed-length alphanumeric token, case-normalized
    /// to uppercase, expiring one hour from now.
    pub fn generate(user_id: UserId) -> Self {
        let token: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(TOKEN_LENGTH)
            .map(char::from)
            .collect::<String>()
            .to_uppercase();

        Self {
            token,
            user_id,
            expiry_date: Utc::now() + Duration::hours(TOKEN_TTL_HOURS),
        }
    }
}
