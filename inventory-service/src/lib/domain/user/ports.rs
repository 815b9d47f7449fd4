use async_trait::async_trait;

use crate::user::errors::NotificationError;
use crate::user::errors::UserError;
use crate::user::models::Role;
use crate::user::models::User;
use crate::user::models::UserId;
use crate::user::reset::NewResetToken;
use crate::user::reset::PasswordResetToken;

/// Persistence operations for the user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new user.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: User) -> Result<User, UserError>;

    /// Retrieve a user by identifier.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Retrieve a user by login email.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;

    /// Retrieve all users.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_all(&self) -> Result<Vec<User>, UserError>;

    /// Retrieve all users holding a role.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_role(&self, role: Role) -> Result<Vec<User>, UserError>;

    /// Update an existing user.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `EmailAlreadyExists` - New email is already registered
    /// * `UsernameAlreadyExists` - New username is already taken
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, user: User) -> Result<User, UserError>;

    /// Remove a user.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, id: &UserId) -> Result<(), UserError>;
}

/// Persistence operations for password reset tokens.
///
/// Multi-step operations (`replace_for_user`, `consume`) run as single
/// transactions so the one-active-token and one-shot-consumption invariants
/// hold under concurrent requests.
#[async_trait]
pub trait ResetTokenRepository: Send + Sync + 'static {
    /// Look up a token by its string value.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_token(&self, token: &str) -> Result<Option<PasswordResetToken>, UserError>;

    /// Delete any existing tokens for the owning user and insert the new
    /// one, in one transaction.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn replace_for_user(&self, token: NewResetToken) -> Result<(), UserError>;

    /// Consume a token: overwrite the owning user's password hash and mark
    /// the token used, in one transaction.
    ///
    /// # Arguments
    /// * `token` - Token string value
    /// * `user_id` - Owning user
    /// * `password_hash` - New password digest to store
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn consume(
        &self,
        token: &str,
        user_id: &UserId,
        password_hash: &str,
    ) -> Result<(), UserError>;

    /// Delete every token whose expiry is in the past, used or not.
    ///
    /// # Returns
    /// Number of rows deleted
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn delete_expired(&self) -> Result<u64, UserError>;
}

/// Outbound hand-off for password reset notifications.
///
/// Invoked with a destination address and the token string; rendering and
/// delivery are the collaborator's concern.
#[async_trait]
pub trait NotificationSender: Send + Sync + 'static {
    /// Dispatch a password reset notification.
    ///
    /// # Errors
    /// * `DispatchFailed` - Hand-off to the delivery channel failed
    async fn send_password_reset(&self, email: &str, token: &str)
        -> Result<(), NotificationError>;
}
