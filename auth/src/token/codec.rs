use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::AccessClaims;
use super::errors::TokenError;

/// Scheme prefix recognized in the Authorization header.
const BEARER_SCHEME: &str = "Bearer ";

/// Signs and verifies compact bearer tokens.
///
/// Uses HS256 (HMAC with SHA-256). `parse` establishes cryptographic trust
/// only; expiry is checked separately via `AccessClaims::is_valid` so the
/// caller decides how to treat an authentic-but-expired token.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl TokenCodec {
    /// Create a codec keyed with a server-held secret.
    ///
    /// # Arguments
    /// * `secret` - Signing secret (loaded from configuration, never hardcoded)
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Issue a signed token for a subject.
    ///
    /// # Arguments
    /// * `subject` - Login identifier embedded as `sub`
    /// * `roles` - Authority names embedded in the `roles` claim
    /// * `ttl_seconds` - Token lifetime in seconds
    ///
    /// # Returns
    /// Compact token string
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(
        &self,
        subject: &str,
        roles: &[String],
        ttl_seconds: i64,
    ) -> Result<String, TokenError> {
        let claims = AccessClaims::new(subject, roles, ttl_seconds);
        let header = Header::new(self.algorithm);

        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Verify a token's signature and structure and return its claims.
    ///
    /// Expiry is deliberately NOT validated here: an expired token with a
    /// good signature parses fine, and `AccessClaims::is_valid` answers the
    /// temporal question.
    ///
    /// # Arguments
    /// * `token` - Compact token string
    ///
    /// # Returns
    /// Decoded claims
    ///
    /// # Errors
    /// * `Malformed` - Bad signature or corrupt structure
    pub fn parse(&self, token: &str) -> Result<AccessClaims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        decode::<AccessClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| TokenError::Malformed(e.to_string()))
    }

    /// Extract the token from an Authorization header value.
    ///
    /// A missing or non-Bearer header is not an error, just "no token
    /// presented".
    ///
    /// # Arguments
    /// * `header_value` - Raw Authorization header value
    ///
    /// # Returns
    /// The token portion, or None if the scheme does not match
    pub fn extract_from_header(header_value: &str) -> Option<&str> {
        header_value.strip_prefix(BEARER_SCHEME)
    }
}
