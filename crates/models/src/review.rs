use chrono::Utc;
use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "review")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub business_id: Uuid,
    pub reviewer_id: Uuid,
    pub rating: i32,
    pub description: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        panic!("no relations defined")
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_rating(rating: i32) -> Result<(), errors::ModelError> {
    if !(1..=5).contains(&rating) {
        return Err(errors::ModelError::Validation("rating must be between 1 and 5".into()));
    }
    Ok(())
}

pub async fn create(
    db: &impl ConnectionTrait,
    business_id: Uuid,
    reviewer_id: Uuid,
    rating: i32,
    description: &str,
) -> Result<Model, errors::ModelError> {
    validate_rating(rating)?;
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        business_id: Set(business_id),
        reviewer_id: Set(reviewer_id),
        rating: Set(rating),
        description: Set(description.to_string()),
        created_at: Set(now),
        updated_at: Set(now),
    };
    am.insert(db).await.map_err(|e| match e.sql_err() {
        Some(sea_orm::SqlErr::UniqueConstraintViolation(_)) => {
            errors::ModelError::Validation("you have already submitted a review for this business user".into())
        }
        _ => errors::ModelError::Db(e.to_string()),
    })
}
