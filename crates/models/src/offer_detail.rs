use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors;
use crate::offer;

/// Tier of an offer. Every offer owns exactly one detail of each type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OfferType {
    Basic,
    Standard,
    Premium,
}

impl OfferType {
    pub const ALL: [OfferType; 3] = [OfferType::Basic, OfferType::Standard, OfferType::Premium];

    pub fn as_str(&self) -> &'static str {
        match self {
            OfferType::Basic => "basic",
            OfferType::Standard => "standard",
            OfferType::Premium => "premium",
        }
    }

    pub fn parse(value: &str) -> Result<Self, errors::ModelError> {
        match value {
            "basic" => Ok(OfferType::Basic),
            "standard" => Ok(OfferType::Standard),
            "premium" => Ok(OfferType::Premium),
            other => Err(errors::ModelError::Validation(format!(
                "offer_type must be basic, standard or premium, got {other:?}"
            ))),
        }
    }
}

impl std::fmt::Display for OfferType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "offer_detail")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub offer_id: Uuid,
    pub title: String,
    pub revisions: i32,
    pub delivery_time_in_days: i32,
    pub price: Decimal,
    pub features: Json,
    pub offer_type: String,
}

impl Model {
    /// Features are persisted as a JSON array of strings, order preserved.
    pub fn features_vec(&self) -> Vec<String> {
        self.features
            .as_array()
            .map(|items| {
                items
                    .iter()
                    .filter_map(|v| v.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Offer,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Offer => Entity::belongs_to(offer::Entity)
                .from(Column::OfferId)
                .to(offer::Column::Id)
                .into(),
        }
    }
}

impl Related<offer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Offer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_fields(revisions: i32, delivery_time_in_days: i32, price: Decimal) -> Result<(), errors::ModelError> {
    if revisions < 0 {
        return Err(errors::ModelError::Validation("revisions must be >= 0".into()));
    }
    if delivery_time_in_days <= 0 {
        return Err(errors::ModelError::Validation("delivery_time_in_days must be positive".into()));
    }
    if price.is_sign_negative() {
        return Err(errors::ModelError::Validation("price must be >= 0".into()));
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub async fn create(
    db: &impl ConnectionTrait,
    offer_id: Uuid,
    title: &str,
    revisions: i32,
    delivery_time_in_days: i32,
    price: Decimal,
    features: Vec<String>,
    offer_type: OfferType,
) -> Result<Model, errors::ModelError> {
    validate_fields(revisions, delivery_time_in_days, price)?;
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        offer_id: Set(offer_id),
        title: Set(title.to_string()),
        revisions: Set(revisions),
        delivery_time_in_days: Set(delivery_time_in_days),
        price: Set(price.round_dp(2)),
        features: Set(serde_json::json!(features)),
        offer_type: Set(offer_type.as_str().to_string()),
    };
    am.insert(db).await.map_err(|e| match e.sql_err() {
        Some(sea_orm::SqlErr::UniqueConstraintViolation(_)) => {
            errors::ModelError::Validation(format!("offer already has a {offer_type} detail"))
        }
        _ => errors::ModelError::Db(e.to_string()),
    })
}

pub async fn find_for_offer(db: &DatabaseConnection, offer_id: Uuid) -> Result<Vec<Model>, errors::ModelError> {
    Entity::find()
        .filter(Column::OfferId.eq(offer_id))
        .all(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}
