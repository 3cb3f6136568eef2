use std::sync::Arc;

use argon2::{
    password_hash::{PasswordHasher, PasswordVerifier, SaltString},
    Argon2, PasswordHash,
};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header as JwtHeader, Validation};
use rand::rngs::OsRng;
use tracing::{debug, info, instrument};

use super::domain::{AuthSession, AuthUser, Claims, LoginInput, RegisterInput};
use super::errors::AuthError;
use super::repository::AuthRepository;

/// Auth service configuration
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub password_algorithm: String,
}

/// Auth business service independent of web framework
pub struct AuthService<R: AuthRepository> {
    repo: Arc<R>,
    cfg: AuthConfig,
}

impl<R: AuthRepository> AuthService<R> {
    pub fn new(repo: Arc<R>, cfg: AuthConfig) -> Self {
        Self { repo, cfg }
    }

    /// Register a new account with a hashed password and issue a token.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{service::{AuthService, AuthConfig}, repository::mock::MockAuthRepository};
    /// use service::auth::domain::RegisterInput;
    /// use models::profile::ProfileKind;
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockAuthRepository::default());
    /// let svc = AuthService::new(repo, AuthConfig { jwt_secret: "secret".into(), password_algorithm: "argon2".into() });
    /// let input = RegisterInput {
    ///     username: "exampleUsername".into(),
    ///     email: "user@example.com".into(),
    ///     password: "examplePassword".into(),
    ///     repeated_password: "examplePassword".into(),
    ///     kind: ProfileKind::Customer,
    /// };
    /// let session = tokio_test::block_on(svc.register(input)).unwrap();
    /// assert_eq!(session.user.email, "user@example.com");
    /// assert!(!session.token.is_empty());
    /// ```
    #[instrument(skip(self, input), fields(username = %input.username))]
    pub async fn register(&self, input: RegisterInput) -> Result<AuthSession, AuthError> {
        if input.password != input.repeated_password {
            return Err(AuthError::Validation("password: passwords do not match".into()));
        }
        if input.password.len() < 8 {
            return Err(AuthError::Validation("password: too short (>=8)".into()));
        }
        if let Some(existing) = self.repo.find_user_by_username(&input.username).await? {
            debug!("username taken: {}", existing.username);
            return Err(AuthError::Validation("username: already exists".into()));
        }
        if self.repo.find_user_by_email(&input.email).await?.is_some() {
            return Err(AuthError::Validation("email: already exists".into()));
        }

        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(input.password.as_bytes(), &salt)
            .map_err(|e| AuthError::HashError(e.to_string()))?
            .to_string();

        let user = self
            .repo
            .create_account(&input.username, &input.email, hash, self.cfg.password_algorithm.clone(), input.kind)
            .await?;
        info!(user_id = %user.id, username = %user.username, kind = %input.kind, "user_registered");

        let token = self.issue_token(&user)?;
        Ok(AuthSession { user, token })
    }

    /// Authenticate a user and issue a fresh token.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{service::{AuthService, AuthConfig}, repository::mock::MockAuthRepository};
    /// use service::auth::domain::{RegisterInput, LoginInput};
    /// use models::profile::ProfileKind;
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockAuthRepository::default());
    /// let svc = AuthService::new(repo, AuthConfig { jwt_secret: "secret".into(), password_algorithm: "argon2".into() });
    /// let _ = tokio_test::block_on(svc.register(RegisterInput {
    ///     username: "u".into(), email: "u@e.com".into(),
    ///     password: "Passw0rd!".into(), repeated_password: "Passw0rd!".into(),
    ///     kind: ProfileKind::Business,
    /// }));
    /// let session = tokio_test::block_on(svc.login(LoginInput { username: "u".into(), password: "Passw0rd!".into() })).unwrap();
    /// assert_eq!(session.user.username, "u");
    /// ```
    #[instrument(skip(self, input), fields(username = %input.username))]
    pub async fn login(&self, input: LoginInput) -> Result<AuthSession, AuthError> {
        let user = self
            .repo
            .find_user_by_username(&input.username)
            .await?
            .ok_or(AuthError::Unauthorized)?;

        let cred = self
            .repo
            .get_credentials(user.id)
            .await?
            .ok_or(AuthError::Unauthorized)?;

        let parsed = PasswordHash::new(&cred.password_hash).map_err(|e| AuthError::HashError(e.to_string()))?;
        if Argon2::default().verify_password(input.password.as_bytes(), &parsed).is_err() {
            return Err(AuthError::Unauthorized);
        }

        let token = self.issue_token(&user)?;
        info!(user_id = %user.id, "user_logged_in");
        Ok(AuthSession { user, token })
    }

    fn issue_token(&self, user: &AuthUser) -> Result<String, AuthError> {
        let exp = (chrono::Utc::now() + chrono::Duration::hours(12)).timestamp() as usize;
        let claims = Claims { sub: user.username.clone(), uid: user.id.to_string(), exp };
        encode(&JwtHeader::default(), &claims, &EncodingKey::from_secret(self.cfg.jwt_secret.as_bytes()))
            .map_err(|e| AuthError::TokenError(e.to_string()))
    }
}

/// Verify a bearer token and return its claims. Expiry is enforced.
pub fn decode_token(secret: &str, token: &str) -> Result<Claims, AuthError> {
    let data = decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &Validation::default())
        .map_err(|e| AuthError::TokenError(e.to_string()))?;
    Ok(data.claims)
}
