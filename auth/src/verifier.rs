use thiserror::Error;

use crate::password::PasswordHasher;

/// Plain credential record consumed by the verifier.
///
/// Flat data, no polymorphic identity: the service builds one of these from
/// its own user entity.
#[derive(Debug, Clone)]
pub struct CredentialRecord {
    /// Login identifier (email)
    pub subject: String,

    /// Stored one-way password digest
    pub password_hash: String,

    /// Inactive accounts must not authenticate
    pub active: bool,

    /// Granted authority names
    pub roles: Vec<String>,
}

/// Credential verification failures.
///
/// Disabled accounts and password mismatches stay distinguishable; callers
/// map them to their own error codes.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CredentialError {
    #[error("Account is disabled")]
    DisabledAccount,

    #[error("Invalid credentials")]
    CredentialMismatch,
}

/// Verifies a plaintext password against a credential record.
pub struct CredentialVerifier {
    hasher: PasswordHasher,
}

impl CredentialVerifier {
    /// Create a new verifier with the default password hasher.
    pub fn new() -> Self {
        Self {
            hasher: PasswordHasher::new(),
        }
    }

    /// Verify a password against a record.
    ///
    /// The active flag is checked before the password so a disabled account
    /// fails as disabled even with the right password.
    ///
    /// # Arguments
    /// * `record` - Credential record loaded from the store
    /// * `password` - Plaintext password to check
    ///
    /// # Errors
    /// * `DisabledAccount` - Record is marked inactive
    /// * `CredentialMismatch` - Password does not match the stored digest
    pub fn verify(&self, record: &CredentialRecord, password: &str) -> Result<(), CredentialError> {
        if !record.active {
            return Err(CredentialError::DisabledAccount);
        }

        if !self.hasher.verify(password, &record.password_hash) {
            return Err(CredentialError::CredentialMismatch);
        }

        Ok(())
    }
}

impl Default for CredentialVerifier {
    fn default() -> Self {
        Self::new()
    }
}
