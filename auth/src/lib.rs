//! Authentication utilities library
//!
//! Provides reusable authentication infrastructure for the inventory backend:
//! - Password hashing (Argon2id)
//! - Bearer token issuance and parsing (HS256)
//! - Credential verification against a plain credential record
//!
//! The service defines its own domain types and adapts these implementations.
//! Parsing a token only establishes cryptographic trust; temporal validity is
//! a separate check so callers can treat an expired-but-authentic token as
//! "no token presented" instead of a hard failure.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! ```
//!
//! ## Bearer Tokens
//! ```
//! use auth::TokenCodec;
//! use chrono::Utc;
//!
//! let codec = TokenCodec::new(b"secret_key_at_least_32_bytes_long!");
//! let token = codec
//!     .issue("user@example.com", &["WORKER".to_string()], 3600)
//!     .unwrap();
//! let claims = codec.parse(&token).unwrap();
//! assert!(claims.is_valid(Utc::now().timestamp()));
//! ```
//!
//! ## Credential Verification
//! ```
//! use auth::{CredentialRecord, CredentialVerifier, PasswordHasher};
//!
//! let hasher = PasswordHasher::new();
//! let record = CredentialRecord {
//!     subject: "user@example.com".to_string(),
//!     password_hash: hasher.hash("secret").unwrap(),
//!     active: true,
//!     roles: vec!["WORKER".to_string()],
//! };
//! let verifier = CredentialVerifier::new();
//! assert!(verifier.verify(&record, "secret").is_ok());
//! ```

pub mod password;
pub mod token;
pub mod verifier;

// Re-export commonly used items
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::AccessClaims;
pub use token::TokenCodec;
pub use token::TokenError;
pub use verifier::CredentialError;
pub use verifier::CredentialRecord;
pub use verifier::CredentialVerifier;
