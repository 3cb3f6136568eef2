use chrono::Utc;
use sea_orm::{entity::prelude::*, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors;
use crate::offer_detail;

/// Order lifecycle. Any state is reachable from any other; transitions are
/// fired only by the owning business profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    InProgress,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::InProgress => "in_progress",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(value: &str) -> Result<Self, errors::ModelError> {
        match value {
            "in_progress" => Ok(OrderStatus::InProgress),
            "completed" => Ok(OrderStatus::Completed),
            "cancelled" => Ok(OrderStatus::Cancelled),
            other => Err(errors::ModelError::Validation(format!(
                "status must be in_progress, completed or cancelled, got {other:?}"
            ))),
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub offer_detail_id: Uuid,
    pub customer_id: Uuid,
    pub business_id: Uuid,
    pub status: String,
    pub title: String,
    pub revisions: i32,
    pub delivery_time_in_days: i32,
    pub price: Decimal,
    pub features: Json,
    pub offer_type: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

impl Model {
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
    OfferDetail,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::OfferDetail => Entity::belongs_to(offer_detail::Entity)
                .from(Column::OfferDetailId)
                .to(offer_detail::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Point-in-time copy of a tier, taken at order creation. The order keeps
/// these values even if the source tier is edited afterwards.
pub fn snapshot_from(
    detail: &offer_detail::Model,
    customer_id: Uuid,
    business_id: Uuid,
) -> ActiveModel {
    let now = Utc::now().into();
    ActiveModel {
        id: Set(Uuid::new_v4()),
        offer_detail_id: Set(detail.id),
        customer_id: Set(customer_id),
        business_id: Set(business_id),
        status: Set(OrderStatus::InProgress.as_str().to_string()),
        title: Set(detail.title.clone()),
        revisions: Set(detail.revisions),
        delivery_time_in_days: Set(detail.delivery_time_in_days),
        price: Set(detail.price),
        features: Set(detail.features.clone()),
        offer_type: Set(detail.offer_type.clone()),
        created_at: Set(now),
        updated_at: Set(now),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::ActiveValue;

    #[test]
    fn status_roundtrips() {
        for s in ["in_progress", "completed", "cancelled"] {
            assert_eq!(OrderStatus::parse(s).unwrap().as_str(), s);
        }
        assert!(OrderStatus::parse("done").is_err());
    }

    #[test]
    fn snapshot_copies_every_tier_field() {
        let detail = offer_detail::Model {
            id: Uuid::new_v4(),
            offer_id: Uuid::new_v4(),
            title: "Standard".into(),
            revisions: 5,
            delivery_time_in_days: 7,
            price: Decimal::new(20000, 2),
            features: serde_json::json!(["Logo", "Homepage", "Contact"]),
            offer_type: "standard".into(),
        };
        let customer = Uuid::new_v4();
        let business = Uuid::new_v4();
        let am = snapshot_from(&detail, customer, business);

        assert_eq!(am.title, ActiveValue::Set("Standard".into()));
        assert_eq!(am.revisions, ActiveValue::Set(5));
        assert_eq!(am.delivery_time_in_days, ActiveValue::Set(7));
        assert_eq!(am.price, ActiveValue::Set(Decimal::new(20000, 2)));
        assert_eq!(am.offer_type, ActiveValue::Set("standard".into()));
        assert_eq!(am.status, ActiveValue::Set("in_progress".into()));
        assert_eq!(am.customer_id, ActiveValue::Set(customer));
        assert_eq!(am.business_id, ActiveValue::Set(business));
    }
}
