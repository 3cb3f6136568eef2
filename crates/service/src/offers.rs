//! Offer catalog: atomic create with exactly three tiers, filtered/sorted/
//! paginated listing with derived aggregates, typed partial update keyed by
//! offer_type, owner-gated delete, and the standalone tier read.

use std::collections::{HashMap, HashSet};

use rust_decimal::Decimal;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use models::offer_detail::OfferType;
use models::{offer, offer_detail, profile, user};

use crate::errors::ServiceError;
use crate::pagination::{Page, Pagination};
use crate::policy::Actor;

/// Tier payload as supplied by clients. All fields optional so that create
/// and partial update share one shape; create validates completeness.
#[derive(Debug, Clone, Deserialize)]
pub struct OfferDetailPayload {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub revisions: Option<i32>,
    #[serde(default)]
    pub delivery_time_in_days: Option<i32>,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub features: Option<Vec<String>>,
    #[serde(default)]
    pub offer_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateOfferInput {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub details: Vec<OfferDetailPayload>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateOfferInput {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub details: Vec<OfferDetailPayload>,
}

/// Listing filters and knobs, straight from the query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OfferQuery {
    pub creator_id: Option<Uuid>,
    pub min_price: Option<Decimal>,
    pub max_delivery_time: Option<i32>,
    pub search: Option<String>,
    pub ordering: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

/// Full tier body, used by create/update echoes and the tier read endpoint.
#[derive(Debug, Serialize)]
pub struct OfferDetailBody {
    pub id: Uuid,
    pub title: String,
    pub revisions: i32,
    pub delivery_time_in_days: i32,
    pub price: Decimal,
    pub features: Vec<String>,
    pub offer_type: String,
}

impl From<&offer_detail::Model> for OfferDetailBody {
    fn from(m: &offer_detail::Model) -> Self {
        Self {
            id: m.id,
            title: m.title.clone(),
            revisions: m.revisions,
            delivery_time_in_days: m.delivery_time_in_days,
            price: m.price,
            features: m.features_vec(),
            offer_type: m.offer_type.clone(),
        }
    }
}

/// Compact tier reference for list/detail responses.
#[derive(Debug, Serialize)]
pub struct OfferDetailRef {
    pub id: Uuid,
    pub url: String,
}

impl From<&offer_detail::Model> for OfferDetailRef {
    fn from(m: &offer_detail::Model) -> Self {
        Self { id: m.id, url: format!("/offerdetails/{}", m.id) }
    }
}

/// Denormalized owner identity attached to listed offers.
#[derive(Debug, Serialize)]
pub struct OwnerDetails {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
}

#[derive(Debug, Serialize)]
pub struct OfferListItem {
    pub id: Uuid,
    pub user: Uuid,
    pub title: String,
    pub image: Option<String>,
    pub description: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub details: Vec<OfferDetailRef>,
    pub min_price: Option<Decimal>,
    pub min_delivery_time: Option<i32>,
    pub user_details: OwnerDetails,
}

/// Echo for create/update: the offer with its tiers in full.
#[derive(Debug, Serialize)]
pub struct OfferBody {
    pub id: Uuid,
    pub title: String,
    pub image: Option<String>,
    pub description: String,
    pub details: Vec<OfferDetailBody>,
}

/// Minimum price across a tier set. Pure so list and detail always agree.
pub fn min_price(details: &[offer_detail::Model]) -> Option<Decimal> {
    details.iter().map(|d| d.price).min()
}

/// Minimum delivery time across a tier set.
pub fn min_delivery_time(details: &[offer_detail::Model]) -> Option<i32> {
    details.iter().map(|d| d.delivery_time_in_days).min()
}

fn normalize_price(price: Decimal) -> Decimal {
    let mut p = price;
    p.rescale(2);
    p
}

/// A validated tier ready for insertion.
#[derive(Debug)]
struct CompleteDetail {
    title: String,
    revisions: i32,
    delivery_time_in_days: i32,
    price: Decimal,
    features: Vec<String>,
    offer_type: OfferType,
}

fn validate_create_details(payloads: &[OfferDetailPayload]) -> Result<Vec<CompleteDetail>, ServiceError> {
    if payloads.len() != 3 {
        return Err(ServiceError::validation("details", "an offer must contain exactly 3 details"));
    }
    let mut seen: HashSet<OfferType> = HashSet::new();
    let mut out = Vec::with_capacity(3);
    for payload in payloads {
        let offer_type = payload
            .offer_type
            .as_deref()
            .ok_or_else(|| ServiceError::validation("details", "each detail requires an offer_type"))?;
        let offer_type = OfferType::parse(offer_type)
            .map_err(|e| ServiceError::validation("details", &e.to_string()))?;
        if !seen.insert(offer_type) {
            return Err(ServiceError::validation(
                "details",
                &format!("duplicate offer_type {offer_type}"),
            ));
        }
        let title = payload
            .title
            .clone()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| ServiceError::validation("details", "title is required for each detail"))?;
        let delivery_time_in_days = payload
            .delivery_time_in_days
            .ok_or_else(|| ServiceError::validation("details", "delivery_time_in_days is required for each detail"))?;
        let price = payload
            .price
            .ok_or_else(|| ServiceError::validation("details", "price is required for each detail"))?;
        out.push(CompleteDetail {
            title,
            revisions: payload.revisions.unwrap_or(0),
            delivery_time_in_days,
            price: normalize_price(price),
            features: payload.features.clone().unwrap_or_default(),
            offer_type,
        });
    }
    Ok(out)
}

/// Create an offer together with its three tiers in one transaction. The
/// owner is always the caller's business profile, never client input.
#[instrument(skip_all, fields(actor = %actor.user_id()))]
pub async fn create_offer(
    db: &DatabaseConnection,
    actor: &Actor,
    input: CreateOfferInput,
) -> Result<OfferBody, ServiceError> {
    actor.require_business()?;
    if input.title.trim().is_empty() {
        return Err(ServiceError::validation("title", "this field is required"));
    }
    let details = validate_create_details(&input.details)?;

    let txn = db.begin().await.map_err(ServiceError::db)?;
    let created = offer::create(&txn, actor.profile_id(), &input.title, input.image.clone(), &input.description).await?;
    let mut detail_models = Vec::with_capacity(3);
    for d in details {
        let m = offer_detail::create(
            &txn,
            created.id,
            &d.title,
            d.revisions,
            d.delivery_time_in_days,
            d.price,
            d.features,
            d.offer_type,
        )
        .await?;
        detail_models.push(m);
    }
    txn.commit().await.map_err(ServiceError::db)?;

    info!(offer_id = %created.id, creator = %actor.profile_id(), "offer_created");
    Ok(OfferBody {
        id: created.id,
        title: created.title,
        image: created.image,
        description: created.description,
        details: detail_models.iter().map(OfferDetailBody::from).collect(),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum OfferOrdering {
    #[default]
    CreatedAtDesc,
    CreatedAtAsc,
    UpdatedAtAsc,
    UpdatedAtDesc,
    MinPriceAsc,
    MinPriceDesc,
}

impl OfferOrdering {
    // Unknown tokens fall back to the default ordering rather than erroring.
    fn parse(value: Option<&str>) -> Self {
        match value {
            Some("created_at") => OfferOrdering::CreatedAtAsc,
            Some("-created_at") => OfferOrdering::CreatedAtDesc,
            Some("updated_at") => OfferOrdering::UpdatedAtAsc,
            Some("-updated_at") => OfferOrdering::UpdatedAtDesc,
            Some("min_price") => OfferOrdering::MinPriceAsc,
            Some("-min_price") => OfferOrdering::MinPriceDesc,
            _ => OfferOrdering::default(),
        }
    }
}

struct LoadedOffer {
    offer: offer::Model,
    details: Vec<offer_detail::Model>,
    owner: user::Model,
}

fn to_list_item(loaded: &LoadedOffer) -> OfferListItem {
    OfferListItem {
        id: loaded.offer.id,
        user: loaded.owner.id,
        title: loaded.offer.title.clone(),
        image: loaded.offer.image.clone(),
        description: loaded.offer.description.clone(),
        created_at: loaded.offer.created_at,
        updated_at: loaded.offer.updated_at,
        details: loaded.details.iter().map(OfferDetailRef::from).collect(),
        min_price: min_price(&loaded.details),
        min_delivery_time: min_delivery_time(&loaded.details),
        user_details: OwnerDetails {
            first_name: loaded.owner.first_name.clone(),
            last_name: loaded.owner.last_name.clone(),
            username: loaded.owner.username.clone(),
        },
    }
}

async fn load_owners(
    db: &DatabaseConnection,
    rows: Vec<(offer::Model, Vec<offer_detail::Model>)>,
) -> Result<Vec<LoadedOffer>, ServiceError> {
    let profile_ids: HashSet<Uuid> = rows.iter().map(|(o, _)| o.creator_id).collect();
    let profiles: HashMap<Uuid, profile::Model> = profile::Entity::find()
        .filter(profile::Column::Id.is_in(profile_ids))
        .all(db)
        .await
        .map_err(ServiceError::db)?
        .into_iter()
        .map(|p| (p.id, p))
        .collect();
    let user_ids: HashSet<Uuid> = profiles.values().map(|p| p.user_id).collect();
    let users: HashMap<Uuid, user::Model> = user::Entity::find()
        .filter(user::Column::Id.is_in(user_ids))
        .all(db)
        .await
        .map_err(ServiceError::db)?
        .into_iter()
        .map(|u| (u.id, u))
        .collect();

    let mut out = Vec::with_capacity(rows.len());
    for (o, details) in rows {
        let owner = profiles
            .get(&o.creator_id)
            .and_then(|p| users.get(&p.user_id))
            .ok_or_else(|| ServiceError::Db("offer owner missing".into()))?;
        out.push(LoadedOffer { offer: o, details, owner: owner.clone() });
    }
    Ok(out)
}

/// List offers with filters, derived aggregates, ordering and pagination.
/// Open to anonymous callers.
#[instrument(skip_all)]
pub async fn list_offers(db: &DatabaseConnection, query: OfferQuery) -> Result<Page<OfferListItem>, ServiceError> {
    let pagination = Pagination {
        page: query.page.unwrap_or(1),
        page_size: query.page_size.unwrap_or_else(|| Pagination::default().page_size),
    };

    let mut find = offer::Entity::find();
    if let Some(creator_user_id) = query.creator_id {
        match profile::find_by_user(db, creator_user_id).await? {
            Some(p) => find = find.filter(offer::Column::CreatorId.eq(p.id)),
            None => return Ok(pagination.paginate("/offers", Vec::new())),
        }
    }
    let rows = find
        .find_with_related(offer_detail::Entity)
        .all(db)
        .await
        .map_err(ServiceError::db)?;
    let mut loaded = load_owners(db, rows).await?;

    if let Some(search) = query.search.as_deref().filter(|s| !s.is_empty()) {
        let needle = search.to_lowercase();
        loaded.retain(|l| {
            l.offer.title.to_lowercase().contains(&needle)
                || l.offer.description.to_lowercase().contains(&needle)
        });
    }
    if let Some(floor) = query.min_price {
        loaded.retain(|l| min_price(&l.details).is_some_and(|p| p >= floor));
    }
    if let Some(ceiling) = query.max_delivery_time {
        loaded.retain(|l| min_delivery_time(&l.details).is_some_and(|d| d <= ceiling));
    }

    match OfferOrdering::parse(query.ordering.as_deref()) {
        OfferOrdering::CreatedAtDesc => loaded.sort_by(|a, b| b.offer.created_at.cmp(&a.offer.created_at)),
        OfferOrdering::CreatedAtAsc => loaded.sort_by(|a, b| a.offer.created_at.cmp(&b.offer.created_at)),
        OfferOrdering::UpdatedAtAsc => loaded.sort_by(|a, b| a.offer.updated_at.cmp(&b.offer.updated_at)),
        OfferOrdering::UpdatedAtDesc => loaded.sort_by(|a, b| b.offer.updated_at.cmp(&a.offer.updated_at)),
        OfferOrdering::MinPriceAsc => loaded.sort_by_key(|l| min_price(&l.details)),
        OfferOrdering::MinPriceDesc => {
            loaded.sort_by_key(|l| min_price(&l.details));
            loaded.reverse();
        }
    }

    let items: Vec<OfferListItem> = loaded.iter().map(to_list_item).collect();
    Ok(pagination.paginate("/offers", items))
}

/// Single offer with the same derived fields as the listing.
pub async fn get_offer(db: &DatabaseConnection, offer_id: Uuid) -> Result<OfferListItem, ServiceError> {
    let rows = offer::Entity::find_by_id(offer_id)
        .find_with_related(offer_detail::Entity)
        .all(db)
        .await
        .map_err(ServiceError::db)?;
    let loaded = load_owners(db, rows).await?;
    loaded
        .first()
        .map(to_list_item)
        .ok_or_else(|| ServiceError::not_found("offer"))
}

/// Partial update of an offer and, optionally, some of its tiers. Tier
/// payloads are matched by offer_type; a type with no existing tier is
/// skipped on purpose, so updating never adds or removes tiers.
#[instrument(skip_all, fields(actor = %actor.user_id(), offer = %offer_id))]
pub async fn update_offer(
    db: &DatabaseConnection,
    actor: &Actor,
    offer_id: Uuid,
    input: UpdateOfferInput,
) -> Result<OfferBody, ServiceError> {
    let existing = offer::Entity::find_by_id(offer_id)
        .one(db)
        .await
        .map_err(ServiceError::db)?
        .ok_or_else(|| ServiceError::not_found("offer"))?;
    actor.require_owner(existing.creator_id, "offer")?;

    // Every tier payload must carry its lookup key before anything is written
    let mut keyed: Vec<(OfferType, &OfferDetailPayload)> = Vec::with_capacity(input.details.len());
    for payload in &input.details {
        let offer_type = payload
            .offer_type
            .as_deref()
            .ok_or_else(|| ServiceError::validation("details", "offer_type is required to match an existing detail"))?;
        let offer_type = OfferType::parse(offer_type)
            .map_err(|e| ServiceError::validation("details", &e.to_string()))?;
        keyed.push((offer_type, payload));
    }

    let txn = db.begin().await.map_err(ServiceError::db)?;

    let mut offer_am: offer::ActiveModel = existing.into();
    if let Some(title) = input.title.clone() {
        if title.trim().is_empty() {
            return Err(ServiceError::validation("title", "must not be blank"));
        }
        offer_am.title = Set(title);
    }
    if let Some(image) = input.image.clone() {
        offer_am.image = Set(Some(image));
    }
    if let Some(description) = input.description.clone() {
        offer_am.description = Set(description);
    }
    offer_am.updated_at = Set(chrono::Utc::now().into());
    let updated = offer_am.update(&txn).await.map_err(ServiceError::db)?;

    for (offer_type, payload) in keyed {
        let found = offer_detail::Entity::find()
            .filter(offer_detail::Column::OfferId.eq(offer_id))
            .filter(offer_detail::Column::OfferType.eq(offer_type.as_str()))
            .one(&txn)
            .await
            .map_err(ServiceError::db)?;
        // No matching tier for this type: deliberate no-op
        let Some(detail) = found else { continue };

        let revisions = payload.revisions.unwrap_or(detail.revisions);
        let delivery = payload.delivery_time_in_days.unwrap_or(detail.delivery_time_in_days);
        let price = payload.price.map(normalize_price).unwrap_or(detail.price);
        offer_detail::validate_fields(revisions, delivery, price)?;

        let mut am: offer_detail::ActiveModel = detail.into();
        if let Some(title) = payload.title.clone() {
            am.title = Set(title);
        }
        am.revisions = Set(revisions);
        am.delivery_time_in_days = Set(delivery);
        am.price = Set(price);
        if let Some(features) = payload.features.clone() {
            am.features = Set(serde_json::json!(features));
        }
        am.update(&txn).await.map_err(ServiceError::db)?;
    }

    txn.commit().await.map_err(ServiceError::db)?;

    let details = offer_detail::find_for_offer(db, offer_id).await?;
    info!(offer = %offer_id, "offer_updated");
    Ok(OfferBody {
        id: updated.id,
        title: updated.title,
        image: updated.image,
        description: updated.description,
        details: details.iter().map(OfferDetailBody::from).collect(),
    })
}

/// Delete an offer and its tiers. Tiers referenced by orders are protected
/// at the store level, which surfaces here as a conflict.
#[instrument(skip_all, fields(actor = %actor.user_id(), offer = %offer_id))]
pub async fn delete_offer(db: &DatabaseConnection, actor: &Actor, offer_id: Uuid) -> Result<(), ServiceError> {
    let existing = offer::Entity::find_by_id(offer_id)
        .one(db)
        .await
        .map_err(ServiceError::db)?
        .ok_or_else(|| ServiceError::not_found("offer"))?;
    actor.require_owner(existing.creator_id, "offer")?;

    offer::Entity::delete_by_id(offer_id)
        .exec(db)
        .await
        .map_err(ServiceError::db)?;
    info!(offer = %offer_id, "offer_deleted");
    Ok(())
}

/// Standalone tier read, gated to authenticated callers at the HTTP layer.
pub async fn get_offer_detail(db: &DatabaseConnection, detail_id: Uuid) -> Result<OfferDetailBody, ServiceError> {
    let found = offer_detail::Entity::find_by_id(detail_id)
        .one(db)
        .await
        .map_err(ServiceError::db)?
        .ok_or_else(|| ServiceError::not_found("offer detail"))?;
    Ok(OfferDetailBody::from(&found))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;

    fn payload(offer_type: &str, price: i64, days: i32) -> OfferDetailPayload {
        OfferDetailPayload {
            title: Some(format!("{offer_type} tier")),
            revisions: Some(2),
            delivery_time_in_days: Some(days),
            price: Some(Decimal::new(price, 0)),
            features: Some(vec!["Logo".into()]),
            offer_type: Some(offer_type.into()),
        }
    }

    fn create_input(title: &str) -> CreateOfferInput {
        CreateOfferInput {
            title: title.into(),
            image: None,
            description: "Professional work".into(),
            details: vec![payload("basic", 100, 5), payload("standard", 200, 7), payload("premium", 500, 10)],
        }
    }

    #[test]
    fn min_aggregates_are_minimums() {
        let details = vec![
            test_support::detail_model(Decimal::new(10000, 2), 5),
            test_support::detail_model(Decimal::new(5000, 2), 3),
            test_support::detail_model(Decimal::new(20000, 2), 10),
        ];
        assert_eq!(min_price(&details), Some(Decimal::new(5000, 2)));
        assert_eq!(min_delivery_time(&details), Some(3));
        assert_eq!(min_price(&[]), None);
    }

    #[test]
    fn create_validation_requires_exactly_three() {
        let two = vec![payload("basic", 100, 5), payload("standard", 200, 7)];
        let err = validate_create_details(&two).unwrap_err();
        assert!(err.to_string().contains("details"));

        let mut four = two.clone();
        four.push(payload("premium", 500, 10));
        four.push(payload("premium", 600, 12));
        assert!(validate_create_details(&four).is_err());
    }

    #[test]
    fn create_validation_rejects_duplicate_types() {
        let dup = vec![payload("basic", 100, 5), payload("basic", 200, 7), payload("premium", 500, 10)];
        assert!(validate_create_details(&dup).is_err());
    }

    #[tokio::test]
    async fn create_and_list_with_filters() -> anyhow::Result<()> {
        let db = test_support::get_db().await?;
        let business = test_support::business_actor(&db, "designer").await?;

        let cheap = create_offer(&db, &business, {
            let mut input = create_input("Logo design");
            input.details[0].price = Some(Decimal::new(50, 0));
            input
        })
        .await?;
        let pricey = create_offer(&db, &business, create_input("Website design")).await?;

        // min over the tier set, not any single tier
        let all = list_offers(&db, OfferQuery::default()).await?;
        assert_eq!(all.count, 2);

        let floor = list_offers(&db, OfferQuery { min_price: Some(Decimal::new(100, 0)), ..Default::default() }).await?;
        assert_eq!(floor.count, 1);
        assert_eq!(floor.results[0].id, pricey.id);

        let fast = list_offers(&db, OfferQuery { max_delivery_time: Some(3), ..Default::default() }).await?;
        assert_eq!(fast.count, 0);

        let by_price = list_offers(&db, OfferQuery { ordering: Some("min_price".into()), ..Default::default() }).await?;
        assert_eq!(by_price.results[0].id, cheap.id);

        let search = list_offers(&db, OfferQuery { search: Some("WEBSITE".into()), ..Default::default() }).await?;
        assert_eq!(search.count, 1);
        assert_eq!(search.results[0].id, pricey.id);

        let by_user = list_offers(&db, OfferQuery { creator_id: Some(business.user_id()), ..Default::default() }).await?;
        assert_eq!(by_user.count, 2);
        let nobody = list_offers(&db, OfferQuery { creator_id: Some(Uuid::new_v4()), ..Default::default() }).await?;
        assert_eq!(nobody.count, 0);
        Ok(())
    }

    #[tokio::test]
    async fn detail_and_list_aggregates_agree() -> anyhow::Result<()> {
        let db = test_support::get_db().await?;
        let business = test_support::business_actor(&db, "designer").await?;
        let created = create_offer(&db, &business, create_input("Website design")).await?;

        let listed = list_offers(&db, OfferQuery::default()).await?;
        let single = get_offer(&db, created.id).await?;
        assert_eq!(listed.results[0].min_price, single.min_price);
        assert_eq!(listed.results[0].min_delivery_time, single.min_delivery_time);
        assert_eq!(single.min_price, Some(Decimal::new(10000, 2)));
        assert_eq!(single.min_delivery_time, Some(5));
        Ok(())
    }

    #[tokio::test]
    async fn update_merges_one_tier_and_leaves_others_alone() -> anyhow::Result<()> {
        let db = test_support::get_db().await?;
        let business = test_support::business_actor(&db, "designer").await?;
        let created = create_offer(&db, &business, create_input("Website design")).await?;

        let before: HashMap<String, OfferDetailBody> =
            created.details.into_iter().map(|d| (d.offer_type.clone(), d)).collect();

        let updated = update_offer(
            &db,
            &business,
            created.id,
            UpdateOfferInput {
                details: vec![OfferDetailPayload {
                    title: None,
                    revisions: Some(3),
                    delivery_time_in_days: None,
                    price: Some(Decimal::new(150, 0)),
                    features: None,
                    offer_type: Some("basic".into()),
                }],
                ..Default::default()
            },
        )
        .await?;

        let basic = updated.details.iter().find(|d| d.offer_type == "basic").unwrap();
        assert_eq!(basic.price, Decimal::new(15000, 2));
        assert_eq!(basic.revisions, 3);
        assert_eq!(basic.title, before["basic"].title);

        for kind in ["standard", "premium"] {
            let after = updated.details.iter().find(|d| d.offer_type == kind).unwrap();
            let orig = &before[kind];
            assert_eq!(after.price, orig.price);
            assert_eq!(after.revisions, orig.revisions);
            assert_eq!(after.delivery_time_in_days, orig.delivery_time_in_days);
            assert_eq!(after.features, orig.features);
        }
        Ok(())
    }

    #[tokio::test]
    async fn update_without_offer_type_fails_unmatched_type_is_noop() -> anyhow::Result<()> {
        let db = test_support::get_db().await?;
        let business = test_support::business_actor(&db, "designer").await?;
        let created = create_offer(&db, &business, create_input("Website design")).await?;

        let missing_key = update_offer(
            &db,
            &business,
            created.id,
            UpdateOfferInput {
                details: vec![OfferDetailPayload {
                    price: Some(Decimal::new(1, 0)),
                    title: None,
                    revisions: None,
                    delivery_time_in_days: None,
                    features: None,
                    offer_type: None,
                }],
                ..Default::default()
            },
        )
        .await;
        let err = missing_key.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert!(err.to_string().contains("details"));

        // A well-formed type that matches nothing is skipped, not an error;
        // exercised through an offer whose premium tier was never created is
        // impossible here (create enforces all three), so assert the update
        // succeeds and changes nothing.
        let before = get_offer(&db, created.id).await?;
        let after_update = update_offer(&db, &business, created.id, UpdateOfferInput::default()).await?;
        assert_eq!(after_update.details.len(), 3);
        let after = get_offer(&db, created.id).await?;
        assert_eq!(before.min_price, after.min_price);
        Ok(())
    }

    #[tokio::test]
    async fn non_owner_cannot_update_or_delete() -> anyhow::Result<()> {
        let db = test_support::get_db().await?;
        let owner = test_support::business_actor(&db, "owner").await?;
        let other = test_support::business_actor(&db, "other").await?;
        let created = create_offer(&db, &owner, create_input("Website design")).await?;

        let patch = UpdateOfferInput { title: Some("Hijacked".into()), ..Default::default() };
        assert!(matches!(
            update_offer(&db, &other, created.id, patch).await.unwrap_err(),
            ServiceError::Forbidden(_)
        ));
        assert!(matches!(
            delete_offer(&db, &other, created.id).await.unwrap_err(),
            ServiceError::Forbidden(_)
        ));

        delete_offer(&db, &owner, created.id).await?;
        assert!(matches!(get_offer(&db, created.id).await.unwrap_err(), ServiceError::NotFound(_)));
        assert_eq!(models::offer_detail::find_for_offer(&db, created.id).await?.len(), 0);
        Ok(())
    }

    #[tokio::test]
    async fn customer_cannot_create() -> anyhow::Result<()> {
        let db = test_support::get_db().await?;
        let customer = test_support::customer_actor(&db, "buyer").await?;
        let err = create_offer(&db, &customer, create_input("Nope")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden(_)));
        Ok(())
    }
}
