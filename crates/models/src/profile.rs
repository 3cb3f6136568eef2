use chrono::Utc;
use sea_orm::{entity::prelude::*, ConnectionTrait, DatabaseConnection, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors;
use crate::user;

/// Role a profile plays on the platform. Stored as a string column; set
/// once at registration and read-only through the update surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileKind {
    Customer,
    Business,
}

impl ProfileKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileKind::Customer => "customer",
            ProfileKind::Business => "business",
        }
    }

    pub fn parse(value: &str) -> Result<Self, errors::ModelError> {
        match value {
            "customer" => Ok(ProfileKind::Customer),
            "business" => Ok(ProfileKind::Business),
            other => Err(errors::ModelError::Validation(format!(
                "type must be customer or business, got {other:?}"
            ))),
        }
    }
}

impl std::fmt::Display for ProfileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "profile")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub kind: String,
    pub file: Option<String>,
    pub location: String,
    pub tel: String,
    pub description: String,
    pub working_hours: String,
    pub created_at: DateTimeWithTimeZone,
}

impl Model {
    pub fn kind(&self) -> Result<ProfileKind, errors::ModelError> {
        ProfileKind::parse(&self.kind)
    }

    pub fn is_business(&self) -> bool {
        self.kind == ProfileKind::Business.as_str()
    }

    pub fn is_customer(&self) -> bool {
        self.kind == ProfileKind::Customer.as_str()
    }
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    User,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::User => Entity::belongs_to(user::Entity)
                .from(Column::UserId)
                .to(user::Column::Id)
                .into(),
        }
    }
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn create(
    db: &impl ConnectionTrait,
    user_id: Uuid,
    kind: ProfileKind,
) -> Result<Model, errors::ModelError> {
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        kind: Set(kind.as_str().to_string()),
        file: Set(None),
        location: Set(String::new()),
        tel: Set(String::new()),
        description: Set(String::new()),
        working_hours: Set(String::new()),
        created_at: Set(Utc::now().into()),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn find_by_user(db: &DatabaseConnection, user_id: Uuid) -> Result<Option<Model>, errors::ModelError> {
    Entity::find()
        .filter(Column::UserId.eq(user_id))
        .one(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}
