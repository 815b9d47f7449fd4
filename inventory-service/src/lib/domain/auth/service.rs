use std::sync::Arc;

use auth::CredentialError;
use auth::CredentialRecord;
use auth::CredentialVerifier;
use auth::TokenCodec;

use crate::domain::auth::models::SignedToken;
use crate::domain::auth::models::TOKEN_TYPE;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;

/// Authentication service: verifies email/password pairs and issues bearer
/// tokens on success.
pub struct AuthService<UR>
where
    UR: UserRepository,
{
    users: Arc<UR>,
    verifier: CredentialVerifier,
    codec: Arc<TokenCodec>,
    token_ttl_seconds: i64,
}

impl<UR> AuthService<UR>
where
    UR: UserRepository,
{
    /// Create a new authentication service.
    ///
    /// # Arguments
    /// * `users` - Credential store
    /// * `codec` - Token codec keyed with the server secret
    /// * `token_ttl_seconds` - Lifetime of issued tokens
    pub fn new(users: Arc<UR>, codec: Arc<TokenCodec>, token_ttl_seconds: i64) -> Self {
        Self {
            users,
            verifier: CredentialVerifier::new(),
            codec,
            token_ttl_seconds,
        }
    }

    /// Verify credentials and issue a bearer token.
    ///
    /// The token embeds the user's email as subject and the role name as the
    /// single role claim. Disabled accounts and password mismatches are
    /// reported with distinct codes.
    ///
    /// # Errors
    /// * `NotFound` - No user with this email
    /// * `DisabledAccount` - Account is inactive
    /// * `CredentialMismatch` - Password does not match
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<SignedToken, UserError> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(UserError::NotFound(email.to_string()))?;

        let record = CredentialRecord {
            subject: user.email.as_str().to_string(),
            password_hash: user.password_hash.clone(),
            active: user.active,
            roles: vec![user.role.as_str().to_string()],
        };

        self.verifier
            .verify(&record, password)
            .map_err(|e| match e {
                CredentialError::DisabledAccount => UserError::DisabledAccount,
                CredentialError::CredentialMismatch => UserError::CredentialMismatch,
            })?;

        let token = self
            .codec
            .issue(&record.subject, &record.roles, self.token_ttl_seconds)
            .map_err(|e| UserError::Unknown(format!("Token generation failed: {}", e)))?;

        tracing::info!(user_id = %user.id, "Sign-in succeeded");

        Ok(SignedToken {
            token,
            token_type: TOKEN_TYPE,
            user,
        })
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use chrono::Utc;
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;
    use crate::user::models::EmailAddress;
    use crate::user::models::Role;
    use crate::user::models::User;
    use crate::user::models::UserId;

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

    const SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

    fn test_user(active: bool) -> User {
        User {
            id: UserId(7),
            username: "worker1".to_string(),
            full_name: "Worker One".to_string(),
            email: EmailAddress::new("a@x.com".to_string()).unwrap(),
            password_hash: auth::PasswordHasher::new().hash("secret").unwrap(),
            role: Role::Worker,
            active,
            created_at: Utc::now(),
        }
    }

    fn auth_service(users: MockTestUserRepository) -> AuthService<MockTestUserRepository> {
        AuthService::new(Arc::new(users), Arc::new(TokenCodec::new(SECRET)), 3600)
    }

    #[tokio::test]
    async fn test_sign_in_success_embeds_subject_and_role() {
        let mut users = MockTestUserRepository::new();
        let user = test_user(true);
        users
            .expect_find_by_email()
            .with(eq("a@x.com"))
            .returning(move |_| Ok(Some(user.clone())));

        let service = auth_service(users);

        let signed = service.sign_in("a@x.com", "secret").await.unwrap();
        assert_eq!(signed.token_type, "Bearer");
        assert_eq!(signed.user.id, UserId(7));

        let claims = TokenCodec::new(SECRET).parse(&signed.token).unwrap();
        assert_eq!(claims.sub, "a@x.com");
        assert_eq!(claims.roles, vec!["WORKER".to_string()]);
        assert!(claims.is_valid(Utc::now().timestamp()));
    }

    #[tokio::test]
    async fn test_sign_in_unknown_user() {
        let mut users = MockTestUserRepository::new();
        users.expect_find_by_email().returning(|_| Ok(None));

        let service = auth_service(users);

        let result = service.sign_in("ghost@x.com", "secret").await;
        assert!(matches!(result, Err(UserError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_sign_in_wrong_password() {
        let mut users = MockTestUserRepository::new();
        let user = test_user(true);
        users
            .expect_find_by_email()
            .returning(move |_| Ok(Some(user.clone())));

        let service = auth_service(users);

        let result = service.sign_in("a@x.com", "wrong").await;
        assert!(matches!(result, Err(UserError::CredentialMismatch)));
    }

    #[tokio::test]
    async fn test_sign_in_disabled_account() {
        let mut users = MockTestUserRepository::new();
        let user = test_user(false);
        users
            .expect_find_by_email()
            .returning(move |_| Ok(Some(user.clone())));

        let service = auth_service(users);

        // Correct password still fails as disabled
        let result = service.sign_in("a@x.com", "secret").await;
        assert!(matches!(result, Err(UserError::DisabledAccount)));
    }
}
