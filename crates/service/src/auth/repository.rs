use async_trait::async_trait;
use uuid::Uuid;

use models::profile::ProfileKind;

use super::domain::{AuthUser, Credentials};
use super::errors::AuthError;

/// Repository abstraction for auth-related persistence.
#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn find_user_by_username(&self, username: &str) -> Result<Option<AuthUser>, AuthError>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<AuthUser>, AuthError>;

    /// Create the account and its profile as one atomic unit.
    async fn create_account(
        &self,
        username: &str,
        email: &str,
        password_hash: String,
        password_algorithm: String,
        kind: ProfileKind,
    ) -> Result<AuthUser, AuthError>;

    async fn get_credentials(&self, user_id: Uuid) -> Result<Option<Credentials>, AuthError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockAuthRepository {
        users: Mutex<HashMap<String, (AuthUser, ProfileKind)>>, // key: username
        creds: Mutex<HashMap<Uuid, Credentials>>,               // key: user_id
    }

    #[async_trait]
    impl AuthRepository for MockAuthRepository {
        async fn find_user_by_username(&self, username: &str) -> Result<Option<AuthUser>, AuthError> {
            let users = self.users.lock().unwrap();
            Ok(users.get(username).map(|(u, _)| u.clone()))
        }

        async fn find_user_by_email(&self, email: &str) -> Result<Option<AuthUser>, AuthError> {
            let users = self.users.lock().unwrap();
            Ok(users.values().find(|(u, _)| u.email == email).map(|(u, _)| u.clone()))
        }

        async fn create_account(
            &self,
            username: &str,
            email: &str,
            password_hash: String,
            password_algorithm: String,
            kind: ProfileKind,
        ) -> Result<AuthUser, AuthError> {
            let mut users = self.users.lock().unwrap();
            if users.contains_key(username) {
                return Err(AuthError::Conflict);
            }
            let user = AuthUser { id: Uuid::new_v4(), username: username.to_string(), email: email.to_string() };
            users.insert(username.to_string(), (user.clone(), kind));

            let mut creds = self.creds.lock().unwrap();
            creds.insert(user.id, Credentials { user_id: user.id, password_hash, password_algorithm });
            Ok(user)
        }

        async fn get_credentials(&self, user_id: Uuid) -> Result<Option<Credentials>, AuthError> {
            let creds = self.creds.lock().unwrap();
            Ok(creds.get(&user_id).cloned())
        }
    }
}
