use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Claims carried by a bearer token.
///
/// Subject is the login identifier (email); `roles` holds the granted
/// authority names. Timestamps are Unix seconds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccessClaims {
    /// Subject (login email)
    pub sub: String,

    /// Granted authority names
    pub roles: Vec<String>,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl AccessClaims {
    /// Create claims for a subject with the given lifetime.
    ///
    /// # Arguments
    /// * `subject` - Login identifier to embed as `sub`
    /// * `roles` - Authority names for the `roles` claim
    /// * `ttl_seconds` - Seconds until the token expires
    ///
    /// # Returns
    /// AccessClaims with iat = now and exp = now + ttl
    pub fn new(subject: impl Into<String>, roles: &[String], ttl_seconds: i64) -> Self {
        let now = Utc::now();
        let expiry = now + Duration::seconds(ttl_seconds);

        Self {
            sub: subject.into(),
            roles: roles.to_vec(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
        }
    }

    /// Temporal validity check.
    ///
    /// Signature validity is established by `TokenCodec::parse`; this only
    /// answers whether the expiry is strictly in the future.
    ///
    /// # Arguments
    /// * `now` - Current time as Unix timestamp
    ///
    /// # Returns
    /// True iff `exp` is strictly after `now`
    pub fn is_valid(&self, now: i64) -> bool {
        self.exp > now
    }

    /// Check whether a given authority name is among the role claims.
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}
