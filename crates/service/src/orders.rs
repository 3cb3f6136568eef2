//! Order ledger: customer-created orders that freeze a copy of the chosen
//! tier at creation time, participant-scoped reads, business-driven status
//! transitions, staff-only deletion and per-business status counts.

use std::collections::{HashMap, HashSet};

use rust_decimal::Decimal;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use models::order::OrderStatus;
use models::{offer, offer_detail, order, profile, user};

use crate::errors::ServiceError;
use crate::policy::Actor;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateOrderInput {
    #[serde(default)]
    pub offer_detail_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateOrderInput {
    #[serde(default)]
    pub status: Option<String>,
}

/// Order representation for listing and detail. The creation response omits
/// `updated_at` to underline that a fresh order has never been mutated.
#[derive(Debug, Serialize)]
pub struct OrderBody {
    pub id: Uuid,
    pub customer_user: Uuid,
    pub business_user: Uuid,
    pub title: String,
    pub revisions: i32,
    pub delivery_time_in_days: i32,
    pub price: Decimal,
    pub features: Vec<String>,
    pub offer_type: String,
    pub status: String,
    pub created_at: DateTimeWithTimeZone,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTimeWithTimeZone>,
}

async fn profile_user_map(
    db: &DatabaseConnection,
    profile_ids: HashSet<Uuid>,
) -> Result<HashMap<Uuid, Uuid>, ServiceError> {
    let profiles = profile::Entity::find()
        .filter(profile::Column::Id.is_in(profile_ids))
        .all(db)
        .await
        .map_err(ServiceError::db)?;
    Ok(profiles.into_iter().map(|p| (p.id, p.user_id)).collect())
}

fn to_body(m: &order::Model, users: &HashMap<Uuid, Uuid>, include_updated_at: bool) -> Result<OrderBody, ServiceError> {
    let customer_user = users
        .get(&m.customer_id)
        .copied()
        .ok_or_else(|| ServiceError::Db("order customer profile missing".into()))?;
    let business_user = users
        .get(&m.business_id)
        .copied()
        .ok_or_else(|| ServiceError::Db("order business profile missing".into()))?;
    Ok(OrderBody {
        id: m.id,
        customer_user,
        business_user,
        title: m.title.clone(),
        revisions: m.revisions,
        delivery_time_in_days: m.delivery_time_in_days,
        price: m.price,
        features: m.features_vec(),
        offer_type: m.offer_type.clone(),
        status: m.status.clone(),
        created_at: m.created_at,
        updated_at: include_updated_at.then_some(m.updated_at),
    })
}

async fn single_body(db: &DatabaseConnection, m: &order::Model, include_updated_at: bool) -> Result<OrderBody, ServiceError> {
    let users = profile_user_map(db, HashSet::from([m.customer_id, m.business_id])).await?;
    to_body(m, &users, include_updated_at)
}

/// Place an order for one tier. The caller's profile becomes the customer
/// party, the tier's offer owner the business party, and the tier fields are
/// copied verbatim into the order inside one transaction.
#[instrument(skip_all, fields(actor = %actor.user_id()))]
pub async fn create_order(
    db: &DatabaseConnection,
    actor: &Actor,
    input: CreateOrderInput,
) -> Result<OrderBody, ServiceError> {
    actor.require_customer()?;
    let raw = input
        .offer_detail_id
        .as_deref()
        .ok_or_else(|| ServiceError::validation("offer_detail_id", "this field is required"))?;
    let detail_id = Uuid::parse_str(raw)
        .map_err(|_| ServiceError::validation("offer_detail_id", "must be a valid id"))?;

    let txn = db.begin().await.map_err(ServiceError::db)?;
    let detail = offer_detail::Entity::find_by_id(detail_id)
        .one(&txn)
        .await
        .map_err(ServiceError::db)?
        .ok_or_else(|| ServiceError::NotFound("the specified offer detail could not be found".into()))?;
    let owning_offer = offer::Entity::find_by_id(detail.offer_id)
        .one(&txn)
        .await
        .map_err(ServiceError::db)?
        .ok_or_else(|| ServiceError::Db("offer missing for detail".into()))?;

    let placed = order::snapshot_from(&detail, actor.profile_id(), owning_offer.creator_id)
        .insert(&txn)
        .await
        .map_err(ServiceError::db)?;
    txn.commit().await.map_err(ServiceError::db)?;

    info!(order = %placed.id, detail = %detail_id, customer = %actor.profile_id(), "order_created");
    single_body(db, &placed, false).await
}

/// Orders where the caller is either party, newest first.
#[instrument(skip_all, fields(actor = %actor.user_id()))]
pub async fn list_orders(db: &DatabaseConnection, actor: &Actor) -> Result<Vec<OrderBody>, ServiceError> {
    let pid = actor.profile_id();
    let rows = order::Entity::find()
        .filter(
            Condition::any()
                .add(order::Column::CustomerId.eq(pid))
                .add(order::Column::BusinessId.eq(pid)),
        )
        .order_by_desc(order::Column::CreatedAt)
        .all(db)
        .await
        .map_err(ServiceError::db)?;

    let profile_ids: HashSet<Uuid> = rows.iter().flat_map(|o| [o.customer_id, o.business_id]).collect();
    let users = profile_user_map(db, profile_ids).await?;
    rows.iter().map(|m| to_body(m, &users, true)).collect()
}

/// Single order, visible only to its two participants.
pub async fn get_order(db: &DatabaseConnection, actor: &Actor, order_id: Uuid) -> Result<OrderBody, ServiceError> {
    let found = order::Entity::find_by_id(order_id)
        .one(db)
        .await
        .map_err(ServiceError::db)?
        .ok_or_else(|| ServiceError::not_found("order"))?;
    actor.require_participant(found.customer_id, found.business_id)?;
    single_body(db, &found, true).await
}

/// Status is the only mutable order field, and only the business party may
/// move it. All transitions between the three states are allowed.
#[instrument(skip_all, fields(actor = %actor.user_id(), order = %order_id))]
pub async fn update_order_status(
    db: &DatabaseConnection,
    actor: &Actor,
    order_id: Uuid,
    input: UpdateOrderInput,
) -> Result<OrderBody, ServiceError> {
    let found = order::Entity::find_by_id(order_id)
        .one(db)
        .await
        .map_err(ServiceError::db)?
        .ok_or_else(|| ServiceError::not_found("order"))?;
    if actor.profile_id() != found.business_id {
        return Err(ServiceError::forbidden("only the business participant may update an order"));
    }

    let raw = input
        .status
        .as_deref()
        .ok_or_else(|| ServiceError::validation("status", "this field is required"))?;
    let status = OrderStatus::parse(raw).map_err(|e| ServiceError::validation("status", &e.to_string()))?;

    let mut am: order::ActiveModel = found.into();
    am.status = Set(status.as_str().to_string());
    am.updated_at = Set(chrono::Utc::now().into());
    let updated = am.update(db).await.map_err(ServiceError::db)?;

    info!(order = %order_id, status = %status, "order_status_changed");
    single_body(db, &updated, true).await
}

/// Orders never leave the ledger through their participants; removal is a
/// staff-only operation.
#[instrument(skip_all, fields(actor = %actor.user_id(), order = %order_id))]
pub async fn delete_order(db: &DatabaseConnection, actor: &Actor, order_id: Uuid) -> Result<(), ServiceError> {
    let found = order::Entity::find_by_id(order_id)
        .one(db)
        .await
        .map_err(ServiceError::db)?
        .ok_or_else(|| ServiceError::not_found("order"))?;
    actor.require_staff()?;

    order::Entity::delete_by_id(found.id).exec(db).await.map_err(ServiceError::db)?;
    info!(order = %order_id, "order_deleted");
    Ok(())
}

async fn status_count(db: &DatabaseConnection, business_user_id: Uuid, status: OrderStatus) -> Result<u64, ServiceError> {
    user::Entity::find_by_id(business_user_id)
        .one(db)
        .await
        .map_err(ServiceError::db)?
        .ok_or_else(|| ServiceError::NotFound("no business user matching the specified id was found".into()))?;

    let Some(business_profile) = profile::find_by_user(db, business_user_id).await? else {
        return Ok(0);
    };
    order::Entity::find()
        .filter(order::Column::BusinessId.eq(business_profile.id))
        .filter(order::Column::Status.eq(status.as_str()))
        .count(db)
        .await
        .map_err(ServiceError::db)
}

/// Count of a business user's in-progress orders. Open to any authenticated
/// caller; 404 on unknown user.
pub async fn count_in_progress(db: &DatabaseConnection, business_user_id: Uuid) -> Result<u64, ServiceError> {
    status_count(db, business_user_id, OrderStatus::InProgress).await
}

/// Count of a business user's completed orders.
pub async fn count_completed(db: &DatabaseConnection, business_user_id: Uuid) -> Result<u64, ServiceError> {
    status_count(db, business_user_id, OrderStatus::Completed).await
}
