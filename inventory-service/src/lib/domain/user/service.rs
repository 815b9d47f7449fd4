use std::sync::Arc;

use chrono::Utc;

use crate::user::errors::UserError;
use crate::user::models::CreateUserCommand;
use crate::user::models::Role;
use crate::user::models::UpdateUserCommand;
use crate::user::models::User;
use crate::user::models::UserId;
use crate::user::ports::NotificationSender;
use crate::user::ports::ResetTokenRepository;
use crate::user::ports::UserRepository;
use crate::user::reset::NewResetToken;

/// Domain service for user management and the password reset lifecycle.
pub struct UserService<UR, RT, NS>
where
    UR: UserRepository,
    RT: ResetTokenRepository,
    NS: NotificationSender,
{
    users: Arc<UR>,
    reset_tokens: Arc<RT>,
    notifier: Arc<NS>,
    password_hasher: auth::PasswordHasher,
}

impl<UR, RT, NS> UserService<UR, RT, NS>
where
    UR: UserRepository,
    RT: ResetTokenRepository,
    NS: NotificationSender,
{
    /// Create a new user service with injected dependencies.
    pub fn new(users: Arc<UR>, reset_tokens: Arc<RT>, notifier: Arc<NS>) -> Self {
        Self {
            users,
            reset_tokens,
            notifier,
            password_hasher: auth::PasswordHasher::new(),
        }
    }

    /// Create a new user: hash the password, activate the account, persist.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `DatabaseError` - Database operation failed
    pub async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError> {
        let password_hash = self
            .password_hasher
            .hash(&command.password)
            .map_err(|e| UserError::Unknown(format!("Password hashing failed: {}", e)))?;

        let user = User {
            id: UserId(0), // assigned by the store
            username: command.username,
            full_name: command.full_name,
            email: command.email,
            password_hash,
            role: command.role,
            active: true,
            created_at: Utc::now(),
        };

        self.users.create(user).await
    }

    /// Retrieve a user by identifier.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    pub async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }

    /// Retrieve a user by login email.
    ///
    /// # Errors
    /// * `NotFound` - No user with this email
    pub async fn get_user_by_email(&self, email: &str) -> Result<User, UserError> {
        self.users
            .find_by_email(email)
            .await?
            .ok_or(UserError::NotFound(email.to_string()))
    }

    /// List every user.
    pub async fn list_users(&self) -> Result<Vec<User>, UserError> {
        self.users.list_all().await
    }

    /// List users holding a given role.
    pub async fn find_by_role(&self, role: Role) -> Result<Vec<User>, UserError> {
        self.users.find_by_role(role).await
    }

    /// Partially update a user. A provided password is re-hashed.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `EmailAlreadyExists` - New email is already registered
    pub async fn update_user(
        &self,
        id: &UserId,
        command: UpdateUserCommand,
    ) -> Result<User, UserError> {
        let mut user = self
            .users
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))?;

        if let Some(username) = command.username {
            user.username = username;
        }

        if let Some(full_name) = command.full_name {
            user.full_name = full_name;
        }

        if let Some(email) = command.email {
            user.email = email;
        }

        if let Some(password) = command.password {
            user.password_hash = self
                .password_hasher
                .hash(&password)
                .map_err(|e| UserError::Unknown(format!("Password hashing failed: {}", e)))?;
        }

        if let Some(role) = command.role {
            user.role = role;
        }

        if let Some(active) = command.active {
            user.active = active;
        }

        self.users.update(user).await
    }

    /// Delete a user.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    pub async fn delete_user(&self, id: &UserId) -> Result<(), UserError> {
        self.users.delete(id).await
    }

    /// Flip a user's active flag.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    pub async fn change_status(&self, id: &UserId) -> Result<User, UserError> {
        let mut user = self
            .users
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))?;

        user.active = !user.active;
        self.users.update(user).await
    }

    /// Check a plaintext password against a user's stored digest.
    ///
    /// A malformed stored digest verifies as false rather than erroring.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    pub async fn verify_password(&self, id: &UserId, password: &str) -> Result<bool, UserError> {
        let user = self
            .users
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))?;

        Ok(self.password_hasher.verify(password, &user.password_hash))
    }

    /// Start a password reset: replace any prior token for the user with a
    /// fresh one and hand it off to the notification collaborator.
    ///
    /// Returns the owning user's id. Unknown emails answer `NotFound`; the
    /// enumeration side channel this opens is preserved deliberately.
    ///
    /// # Errors
    /// * `NotFound` - No user with this email
    /// * `Notification` - Hand-off to the delivery channel failed
    pub async fn request_password_reset(&self, email: &str) -> Result<UserId, UserError> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(UserError::NotFound(email.to_string()))?;

        let fresh = NewResetToken::generate(user.id);
        let token = fresh.token.clone();
        self.reset_tokens.replace_for_user(fresh).await?;

        tracing::info!(user_id = %user.id, "Password reset token issued");

        self.notifier
            .send_password_reset(user.email.as_str(), &token)
            .await?;

        Ok(user.id)
    }

    /// Consume a reset token: set the new password and mark the token used,
    /// atomically.
    ///
    /// # Errors
    /// * `BadRequest` - Token or password is blank
    /// * `InvalidToken` - Token is unknown, already used, or expired
    pub async fn reset_password(&self, token: &str, new_password: &str) -> Result<(), UserError> {
        if token.trim().is_empty() || new_password.trim().is_empty() {
            return Err(UserError::BadRequest(
                "token and newPassword are required".to_string(),
            ));
        }

        let reset_token = self
            .reset_tokens
            .find_by_token(token)
            .await?
            .ok_or(UserError::InvalidToken)?;

        if !reset_token.is_consumable(Utc::now()) {
            return Err(UserError::InvalidToken);
        }

        let password_hash = self
            .password_hasher
            .hash(new_password)
            .map_err(|e| UserError::Unknown(format!("Password hashing failed: {}", e)))?;

        self.reset_tokens
            .consume(&reset_token.token, &reset_token.user_id, &password_hash)
            .await?;

        tracing::info!(user_id = %reset_token.user_id, "Password reset completed");

        Ok(())
    }

    /// Delete every expired reset token, used or not.
    pub async fn sweep_expired_tokens(&self) -> Result<u64, UserError> {
        let deleted = self.reset_tokens.delete_expired().await?;
        if deleted > 0 {
            tracing::info!(deleted, "Expired reset tokens swept");
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use chrono::Duration;
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;
    use crate::user::errors::NotificationError;
    use crate::user::models::EmailAddress;
    use crate::user::reset::PasswordResetToken;

    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, user: User) -> Result<User, UserError>;
            async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;
            async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;
            async fn list_all(&self) -> Result<Vec<User>, UserError>;
            async fn find_by_role(&self, role: Role) -> Result<Vec<User>, UserError>;
            async fn update(&self, user: User) -> Result<User, UserError>;
            async fn delete(&self, id: &UserId) -> Result<(), UserError>;
        }
    }

    mock! {
        pub TestResetTokenRepository {}

        #[async_trait]
        impl ResetTokenRepository for TestResetTokenRepository {
            async fn find_by_token(&self, token: &str) -> Result<Option<PasswordResetToken>, UserError>;
            async fn replace_for_user(&self, token: NewResetToken) -> Result<(), UserError>;
            async fn consume(&self, token: &str, user_id: &UserId, password_hash: &str) -> Result<(), UserError>;
            async fn delete_expired(&self) -> Result<u64, UserError>;
        }
    }

    mock! {
        pub TestNotificationSender {}

        #[async_trait]
        impl NotificationSender for TestNotificationSender {
            async fn send_password_reset(&self, email: &str, token: &str) -> Result<(), NotificationError>;
        }
    }

    fn test_user(id: i64, email: &str, active: bool) -> User {
        User {
            id: UserId(id),
            username: "worker1".to_string(),
            full_name: "Worker One".to_string(),
            email: EmailAddress::new(email.to_string()).unwrap(),
            password_hash: auth::PasswordHasher::new().hash("secret").unwrap(),
            role: Role::Worker,
            active,
            created_at: Utc::now(),
        }
    }

    fn service(
        users: MockTestUserRepository,
        reset_tokens: MockTestResetTokenRepository,
        notifier: MockTestNotificationSender,
    ) -> UserService<MockTestUserRepository, MockTestResetTokenRepository, MockTestNotificationSender>
    {
        UserService::new(Arc::new(users), Arc::new(reset_tokens), Arc::new(notifier))
    }

    #[tokio::test]
    async fn test_create_user_hashes_password_and_activates() {
        let mut users = MockTestUserRepository::new();
        users
            .expect_create()
            .withf(|user| {
                user.password_hash.starts_with("$argon2")
                    && user.active
                    && user.email.as_str() == "a@x.com"
            })
            .times(1)
            .returning(|user| Ok(user));

        let service = service(
            users,
            MockTestResetTokenRepository::new(),
            MockTestNotificationSender::new(),
        );

        let command = CreateUserCommand {
            username: "worker1".to_string(),
            full_name: "Worker One".to_string(),
            email: EmailAddress::new("a@x.com".to_string()).unwrap(),
            password: "secret".to_string(),
            role: Role::Worker,
        };

        let user = service.create_user(command).await.unwrap();
        assert_ne!(user.password_hash, "secret");
    }

    #[tokio::test]
    async fn test_verify_password() {
        let mut users = MockTestUserRepository::new();
        let user = test_user(7, "a@x.com", true);
        users
            .expect_find_by_id()
            .returning(move |_| Ok(Some(user.clone())));

        let service = service(
            users,
            MockTestResetTokenRepository::new(),
            MockTestNotificationSender::new(),
        );

        assert!(service.verify_password(&UserId(7), "secret").await.unwrap());
        assert!(!service.verify_password(&UserId(7), "wrong").await.unwrap());
    }

    #[tokio::test]
    async fn test_verify_password_unknown_user() {
        let mut users = MockTestUserRepository::new();
        users.expect_find_by_id().returning(|_| Ok(None));

        let service = service(
            users,
            MockTestResetTokenRepository::new(),
            MockTestNotificationSender::new(),
        );

        let result = service.verify_password(&UserId(404), "secret").await;
        assert!(matches!(result, Err(UserError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_change_status_flips_active() {
        let mut users = MockTestUserRepository::new();
        let user = test_user(7, "a@x.com", true);
        users
            .expect_find_by_id()
            .returning(move |_| Ok(Some(user.clone())));
        users
            .expect_update()
            .withf(|user| !user.active)
            .times(1)
            .returning(|user| Ok(user));

        let service = service(
            users,
            MockTestResetTokenRepository::new(),
            MockTestNotificationSender::new(),
        );

        let updated = service.change_status(&UserId(7)).await.unwrap();
        assert!(!updated.active);
    }

    #[tokio::test]
    async fn test_request_password_reset_replaces_and_notifies() {
        let mut users = MockTestUserRepository::new();
        let user = test_user(7, "a@x.com", true);
        users
            .expect_find_by_email()
            .with(eq("a@x.com"))
            .returning(move |_| Ok(Some(user.clone())));

        let mut reset_tokens = MockTestResetTokenRepository::new();
        reset_tokens
            .expect_replace_for_user()
            .withf(|fresh| {
                fresh.user_id == UserId(7)
                    && fresh.token.len() == 10
                    && fresh.token == fresh.token.to_uppercase()
            })
            .times(1)
            .returning(|_| Ok(()));

        let mut notifier = MockTestNotificationSender::new();
        notifier
            .expect_send_password_reset()
            .withf(|email, token| email == "a@x.com" && token.len() == 10)
            .times(1)
            .returning(|_, _| Ok(()));

        let service = service(users, reset_tokens, notifier);

        let user_id = service.request_password_reset("a@x.com").await.unwrap();
        assert_eq!(user_id, UserId(7));
    }

    #[tokio::test]
    async fn test_request_password_reset_unknown_email() {
        let mut users = MockTestUserRepository::new();
        users.expect_find_by_email().returning(|_| Ok(None));

        let mut reset_tokens = MockTestResetTokenRepository::new();
        reset_tokens.expect_replace_for_user().times(0);

        let service = service(users, reset_tokens, MockTestNotificationSender::new());

        let result = service.request_password_reset("ghost@x.com").await;
        assert!(matches!(result, Err(UserError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_reset_password_blank_fields() {
        let service = service(
            MockTestUserRepository::new(),
            MockTestResetTokenRepository::new(),
            MockTestNotificationSender::new(),
        );

        let result = service.reset_password("", "newpw").await;
        assert!(matches!(result, Err(UserError::BadRequest(_))));

        let result = service.reset_password("ABC1234567", "  ").await;
        assert!(matches!(result, Err(UserError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_reset_password_unknown_token() {
        let mut reset_tokens = MockTestResetTokenRepository::new();
        reset_tokens.expect_find_by_token().returning(|_| Ok(None));

        let service = service(
            MockTestUserRepository::new(),
            reset_tokens,
            MockTestNotificationSender::new(),
        );

        let result = service.reset_password("ABC1234567", "newpw").await;
        assert!(matches!(result, Err(UserError::InvalidToken)));
    }

    #[tokio::test]
    async fn test_reset_password_used_token() {
        let mut reset_tokens = MockTestResetTokenRepository::new();
        reset_tokens.expect_find_by_token().returning(|_| {
            Ok(Some(PasswordResetToken {
                id: 1,
                token: "ABC1234567".to_string(),
                user_id: UserId(7),
                expiry_date: Utc::now() + Duration::hours(1),
                used: true,
            }))
        });
        reset_tokens.expect_consume().times(0);

        let service = service(
            MockTestUserRepository::new(),
            reset_tokens,
            MockTestNotificationSender::new(),
        );

        let result = service.reset_password("ABC1234567", "newpw").await;
        assert!(matches!(result, Err(UserError::InvalidToken)));
    }

    #[tokio::test]
    async fn test_reset_password_expired_token() {
        let mut reset_tokens = MockTestResetTokenRepository::new();
        reset_tokens.expect_find_by_token().returning(|_| {
            Ok(Some(PasswordResetToken {
                id: 1,
                token: "ABC1234567".to_string(),
                user_id: UserId(7),
                // Issued an hour ago with a one-hour ttl, consumed one second late
                expiry_date: Utc::now() - Duration::seconds(1),
                used: false,
            }))
        });
        reset_tokens.expect_consume().times(0);

        let service = service(
            MockTestUserRepository::new(),
            reset_tokens,
            MockTestNotificationSender::new(),
        );

        let result = service.reset_password("ABC1234567", "newpw").await;
        assert!(matches!(result, Err(UserError::InvalidToken)));
    }

    #[tokio::test]
    async fn test_reset_password_success_consumes_once() {
        let mut reset_tokens = MockTestResetTokenRepository::new();
        reset_tokens.expect_find_by_token().returning(|_| {
            Ok(Some(PasswordResetToken {
                id: 1,
                token: "ABC1234567".to_string(),
                user_id: UserId(7),
                expiry_date: Utc::now() + Duration::hours(1),
                used: false,
            }))
        });
        reset_tokens
            .expect_consume()
            .withf(|token, user_id, password_hash| {
                token == "ABC1234567"
                    && *user_id == UserId(7)
                    && password_hash.starts_with("$argon2")
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        let service = service(
            MockTestUserRepository::new(),
            reset_tokens,
            MockTestNotificationSender::new(),
        );

        assert!(service.reset_password("ABC1234567", "newpw").await.is_ok());
    }

    #[tokio::test]
    async fn test_sweep_expired_tokens() {
        let mut reset_tokens = MockTestResetTokenRepository::new();
        reset_tokens
            .expect_delete_expired()
            .times(1)
            .returning(|| Ok(3));

        let service = service(
            MockTestUserRepository::new(),
            reset_tokens,
            MockTestNotificationSender::new(),
        );

        assert_eq!(service.sweep_expired_tokens().await.unwrap(), 3);
    }
}
