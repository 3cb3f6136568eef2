//! Profile store: read and owner-only patch, keyed by the profile's user id.
//! The customer/business kind is immutable here; only registration sets it.

use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set, TransactionTrait};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use models::profile::ProfileKind;
use models::{profile, user};

use crate::errors::ServiceError;
use crate::policy::Actor;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProfileInput {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub tel: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub working_hours: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProfileBody {
    pub user: Uuid,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub file: Option<String>,
    pub location: String,
    pub tel: String,
    pub description: String,
    pub working_hours: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub email: String,
    pub created_at: DateTimeWithTimeZone,
}

fn to_body(u: &user::Model, p: &profile::Model) -> ProfileBody {
    ProfileBody {
        user: u.id,
        username: u.username.clone(),
        first_name: u.first_name.clone(),
        last_name: u.last_name.clone(),
        file: p.file.clone(),
        location: p.location.clone(),
        tel: p.tel.clone(),
        description: p.description.clone(),
        working_hours: p.working_hours.clone(),
        kind: p.kind.clone(),
        email: u.email.clone(),
        created_at: p.created_at,
    }
}

async fn load(db: &DatabaseConnection, user_id: Uuid) -> Result<(user::Model, profile::Model), ServiceError> {
    let u = user::Entity::find_by_id(user_id)
        .one(db)
        .await
        .map_err(ServiceError::db)?
        .ok_or_else(|| ServiceError::not_found("profile"))?;
    let p = profile::find_by_user(db, user_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("profile"))?;
    Ok((u, p))
}

pub async fn get_profile(db: &DatabaseConnection, user_id: Uuid) -> Result<ProfileBody, ServiceError> {
    let (u, p) = load(db, user_id).await?;
    Ok(to_body(&u, &p))
}

/// Patch the caller's own profile. Name and email live on the user row, the
/// rest on the profile row; both are written in one transaction.
#[instrument(skip_all, fields(actor = %actor.user_id(), target = %user_id))]
pub async fn update_profile(
    db: &DatabaseConnection,
    actor: &Actor,
    user_id: Uuid,
    input: UpdateProfileInput,
) -> Result<ProfileBody, ServiceError> {
    let (u, p) = load(db, user_id).await?;
    if actor.user_id() != u.id {
        return Err(ServiceError::forbidden("profiles may only be edited by their owner"));
    }
    if let Some(email) = input.email.as_deref() {
        models::user::validate_email(email)?;
    }

    let txn = db.begin().await.map_err(ServiceError::db)?;

    let touch_user = input.first_name.is_some() || input.last_name.is_some() || input.email.is_some();
    let updated_user = if touch_user {
        let mut am: user::ActiveModel = u.into();
        if let Some(first_name) = input.first_name {
            am.first_name = Set(first_name);
        }
        if let Some(last_name) = input.last_name {
            am.last_name = Set(last_name);
        }
        if let Some(email) = input.email {
            am.email = Set(email);
        }
        am.update(&txn).await.map_err(ServiceError::db)?
    } else {
        u
    };

    let touch_profile = input.file.is_some()
        || input.location.is_some()
        || input.tel.is_some()
        || input.description.is_some()
        || input.working_hours.is_some();
    let updated_profile = if touch_profile {
        let mut am: profile::ActiveModel = p.into();
        if let Some(file) = input.file {
            am.file = Set(Some(file));
        }
        if let Some(location) = input.location {
            am.location = Set(location);
        }
        if let Some(tel) = input.tel {
            am.tel = Set(tel);
        }
        if let Some(description) = input.description {
            am.description = Set(description);
        }
        if let Some(working_hours) = input.working_hours {
            am.working_hours = Set(working_hours);
        }
        am.update(&txn).await.map_err(ServiceError::db)?
    } else {
        p
    };

    txn.commit().await.map_err(ServiceError::db)?;
    info!(user = %user_id, "profile_updated");
    Ok(to_body(&updated_user, &updated_profile))
}

/// All profiles of one kind, with their owner identity joined in.
pub async fn list_by_kind(db: &DatabaseConnection, kind: ProfileKind) -> Result<Vec<ProfileBody>, ServiceError> {
    use sea_orm::{ColumnTrait, QueryFilter};
    let rows = profile::Entity::find()
        .filter(profile::Column::Kind.eq(kind.as_str()))
        .find_also_related(user::Entity)
        .all(db)
        .await
        .map_err(ServiceError::db)?;
    rows.into_iter()
        .map(|(p, u)| {
            let u = u.ok_or_else(|| ServiceError::Db("profile without user".into()))?;
            Ok(to_body(&u, &p))
        })
        .collect()
}
