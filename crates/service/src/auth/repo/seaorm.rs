use sea_orm::{DatabaseConnection, TransactionTrait};
use uuid::Uuid;

use models::profile::ProfileKind;

use crate::auth::domain::{AuthUser, Credentials};
use crate::auth::errors::AuthError;
use crate::auth::repository::AuthRepository;

pub struct SeaOrmAuthRepository {
    pub db: DatabaseConnection,
}

fn to_auth_user(u: models::user::Model) -> AuthUser {
    AuthUser { id: u.id, username: u.username, email: u.email }
}

#[async_trait::async_trait]
impl AuthRepository for SeaOrmAuthRepository {
    async fn find_user_by_username(&self, username: &str) -> Result<Option<AuthUser>, AuthError> {
        let res = models::user::find_by_username(&self.db, username)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?;
        Ok(res.map(to_auth_user))
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<AuthUser>, AuthError> {
        let res = models::user::find_by_email(&self.db, email)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?;
        Ok(res.map(to_auth_user))
    }

    async fn create_account(
        &self,
        username: &str,
        email: &str,
        password_hash: String,
        password_algorithm: String,
        kind: ProfileKind,
    ) -> Result<AuthUser, AuthError> {
        let txn = self.db.begin().await.map_err(|e| AuthError::Repository(e.to_string()))?;
        let created = models::user::create(&txn, username, email, &password_hash, &password_algorithm)
            .await
            .map_err(|e| AuthError::Validation(e.to_string()))?;
        models::profile::create(&txn, created.id, kind)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?;
        txn.commit().await.map_err(|e| AuthError::Repository(e.to_string()))?;
        Ok(to_auth_user(created))
    }

    async fn get_credentials(&self, user_id: Uuid) -> Result<Option<Credentials>, AuthError> {
        use sea_orm::EntityTrait;
        let res = models::user::Entity::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?;
        Ok(res.map(|u| Credentials {
            user_id: u.id,
            password_hash: u.password_hash,
            password_algorithm: u.password_algorithm,
        }))
    }
}
