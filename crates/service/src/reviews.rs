//! Review store: one review per (business, reviewer) pair, customer-only
//! create, reviewer-only mutate, open reads for authenticated callers.

use std::collections::{HashMap, HashSet};

use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use models::{profile, review};

use crate::errors::ServiceError;
use crate::policy::Actor;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateReviewInput {
    #[serde(default)]
    pub business_user: Option<Uuid>,
    #[serde(default)]
    pub rating: Option<i32>,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateReviewInput {
    #[serde(default)]
    pub rating: Option<i32>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewQuery {
    pub business_user_id: Option<Uuid>,
    pub reviewer_id: Option<Uuid>,
    pub ordering: Option<String>,
}

/// Review representation; both parties are reported as user ids.
#[derive(Debug, Serialize)]
pub struct ReviewBody {
    pub id: Uuid,
    pub business_user: Uuid,
    pub reviewer: Uuid,
    pub rating: i32,
    pub description: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
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

fn to_body(m: &review::Model, users: &HashMap<Uuid, Uuid>) -> Result<ReviewBody, ServiceError> {
    let business_user = users
        .get(&m.business_id)
        .copied()
        .ok_or_else(|| ServiceError::Db("review business profile missing".into()))?;
    let reviewer = users
        .get(&m.reviewer_id)
        .copied()
        .ok_or_else(|| ServiceError::Db("review reviewer profile missing".into()))?;
    Ok(ReviewBody {
        id: m.id,
        business_user,
        reviewer,
        rating: m.rating,
        description: m.description.clone(),
        created_at: m.created_at,
        updated_at: m.updated_at,
    })
}

async fn single_body(db: &DatabaseConnection, m: &review::Model) -> Result<ReviewBody, ServiceError> {
    let users = profile_user_map(db, HashSet::from([m.business_id, m.reviewer_id])).await?;
    to_body(m, &users)
}

/// List reviews with optional party filters. Defaults to best-rated first,
/// newest breaking ties.
pub async fn list_reviews(db: &DatabaseConnection, query: ReviewQuery) -> Result<Vec<ReviewBody>, ServiceError> {
    let mut find = review::Entity::find();
    if let Some(user_id) = query.business_user_id {
        match profile::find_by_user(db, user_id).await? {
            Some(p) => find = find.filter(review::Column::BusinessId.eq(p.id)),
            None => return Ok(Vec::new()),
        }
    }
    if let Some(user_id) = query.reviewer_id {
        match profile::find_by_user(db, user_id).await? {
            Some(p) => find = find.filter(review::Column::ReviewerId.eq(p.id)),
            None => return Ok(Vec::new()),
        }
    }
    find = match query.ordering.as_deref() {
        Some("updated_at") => find.order_by_asc(review::Column::UpdatedAt),
        Some("-updated_at") => find.order_by_desc(review::Column::UpdatedAt),
        Some("rating") => find.order_by_asc(review::Column::Rating),
        _ => find
            .order_by_desc(review::Column::Rating)
            .order_by_desc(review::Column::CreatedAt),
    };

    let rows = find.all(db).await.map_err(ServiceError::db)?;
    let profile_ids: HashSet<Uuid> = rows.iter().flat_map(|r| [r.business_id, r.reviewer_id]).collect();
    let users = profile_user_map(db, profile_ids).await?;
    rows.iter().map(|m| to_body(m, &users)).collect()
}

/// Create a review for a business user. The reviewer is always the caller;
/// the (business, reviewer) pair is unique and enforced by the store too.
#[instrument(skip_all, fields(actor = %actor.user_id()))]
pub async fn create_review(
    db: &DatabaseConnection,
    actor: &Actor,
    input: CreateReviewInput,
) -> Result<ReviewBody, ServiceError> {
    actor.require_customer()?;
    let business_user = input
        .business_user
        .ok_or_else(|| ServiceError::validation("business_user", "this field is required"))?;
    let business_profile = profile::find_by_user(db, business_user)
        .await?
        .ok_or_else(|| ServiceError::validation("business_user", "business user not found"))?;
    let rating = input
        .rating
        .ok_or_else(|| ServiceError::validation("rating", "this field is required"))?;

    let duplicate = review::Entity::find()
        .filter(review::Column::BusinessId.eq(business_profile.id))
        .filter(review::Column::ReviewerId.eq(actor.profile_id()))
        .one(db)
        .await
        .map_err(ServiceError::db)?;
    if duplicate.is_some() {
        return Err(ServiceError::Validation(
            "you have already submitted a review for this business user".into(),
        ));
    }

    let created = review::create(db, business_profile.id, actor.profile_id(), rating, &input.description).await?;
    info!(review = %created.id, business = %business_profile.id, "review_created");
    single_body(db, &created).await
}

pub async fn get_review(db: &DatabaseConnection, review_id: Uuid) -> Result<ReviewBody, ServiceError> {
    let found = review::Entity::find_by_id(review_id)
        .one(db)
        .await
        .map_err(ServiceError::db)?
        .ok_or_else(|| ServiceError::not_found("review"))?;
    single_body(db, &found).await
}

/// Rating and description are the only mutable fields, reviewer-only.
#[instrument(skip_all, fields(actor = %actor.user_id(), review = %review_id))]
pub async fn update_review(
    db: &DatabaseConnection,
    actor: &Actor,
    review_id: Uuid,
    input: UpdateReviewInput,
) -> Result<ReviewBody, ServiceError> {
    let found = review::Entity::find_by_id(review_id)
        .one(db)
        .await
        .map_err(ServiceError::db)?
        .ok_or_else(|| ServiceError::not_found("review"))?;
    actor.require_owner(found.reviewer_id, "review")?;

    if let Some(rating) = input.rating {
        models::review::validate_rating(rating)?;
    }
    let mut am: review::ActiveModel = found.into();
    if let Some(rating) = input.rating {
        am.rating = Set(rating);
    }
    if let Some(description) = input.description {
        am.description = Set(description);
    }
    am.updated_at = Set(chrono::Utc::now().into());
    let updated = am.update(db).await.map_err(ServiceError::db)?;
    single_body(db, &updated).await
}

#[instrument(skip_all, fields(actor = %actor.user_id(), review = %review_id))]
pub async fn delete_review(db: &DatabaseConnection, actor: &Actor, review_id: Uuid) -> Result<(), ServiceError> {
    let found = review::Entity::find_by_id(review_id)
        .one(db)
        .await
        .map_err(ServiceError::db)?
        .ok_or_else(|| ServiceError::not_found("review"))?;
    actor.require_owner(found.reviewer_id, "review")?;
    review::Entity::delete_by_id(found.id).exec(db).await.map_err(ServiceError::db)?;
    info!(review = %review_id, "review_deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;

    fn input(business_user: Uuid, rating: i32) -> CreateReviewInput {
        CreateReviewInput { business_user: Some(business_user), rating: Some(rating), description: "solid work".into() }
    }

    #[tokio::test]
    async fn one_review_per_business_but_many_businesses() -> anyhow::Result<()> {
        let db = test_support::get_db().await?;
        let b1 = test_support::business_actor(&db, "biz1").await?;
        let b2 = test_support::business_actor(&db, "biz2").await?;
        let customer = test_support::customer_actor(&db, "buyer").await?;

        let first = create_review(&db, &customer, input(b1.user_id(), 4)).await?;
        assert_eq!(first.business_user, b1.user_id());
        assert_eq!(first.reviewer, customer.user_id());

        let dup = create_review(&db, &customer, input(b1.user_id(), 5)).await;
        assert!(matches!(dup.unwrap_err(), ServiceError::Validation(_)));

        create_review(&db, &customer, input(b2.user_id(), 5)).await?;
        assert_eq!(list_reviews(&db, ReviewQuery::default()).await?.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn create_gates_and_bad_targets() -> anyhow::Result<()> {
        let db = test_support::get_db().await?;
        let business = test_support::business_actor(&db, "biz").await?;
        let customer = test_support::customer_actor(&db, "buyer").await?;

        assert!(matches!(
            create_review(&db, &business, input(business.user_id(), 3)).await.unwrap_err(),
            ServiceError::Forbidden(_)
        ));
        assert!(matches!(
            create_review(&db, &customer, input(Uuid::new_v4(), 3)).await.unwrap_err(),
            ServiceError::Validation(_)
        ));
        assert!(matches!(
            create_review(&db, &customer, input(business.user_id(), 9)).await.unwrap_err(),
            ServiceError::Model(_)
        ));
        Ok(())
    }

    #[tokio::test]
    async fn only_reviewer_mutates() -> anyhow::Result<()> {
        let db = test_support::get_db().await?;
        let business = test_support::business_actor(&db, "biz").await?;
        let customer = test_support::customer_actor(&db, "buyer").await?;
        let other = test_support::customer_actor(&db, "other").await?;

        let created = create_review(&db, &customer, input(business.user_id(), 3)).await?;

        assert!(matches!(
            update_review(&db, &other, created.id, UpdateReviewInput { rating: Some(1), description: None })
                .await
                .unwrap_err(),
            ServiceError::Forbidden(_)
        ));
        let updated = update_review(
            &db,
            &customer,
            created.id,
            UpdateReviewInput { rating: Some(5), description: Some("even better".into()) },
        )
        .await?;
        assert_eq!(updated.rating, 5);

        assert!(matches!(
            delete_review(&db, &other, created.id).await.unwrap_err(),
            ServiceError::Forbidden(_)
        ));
        delete_review(&db, &customer, created.id).await?;
        assert!(matches!(get_review(&db, created.id).await.unwrap_err(), ServiceError::NotFound(_)));
        Ok(())
    }

    #[tokio::test]
    async fn list_filters_by_party() -> anyhow::Result<()> {
        let db = test_support::get_db().await?;
        let b1 = test_support::business_actor(&db, "biz1").await?;
        let b2 = test_support::business_actor(&db, "biz2").await?;
        let customer = test_support::customer_actor(&db, "buyer").await?;

        create_review(&db, &customer, input(b1.user_id(), 2)).await?;
        create_review(&db, &customer, input(b2.user_id(), 5)).await?;

        let for_b1 = list_reviews(&db, ReviewQuery { business_user_id: Some(b1.user_id()), ..Default::default() }).await?;
        assert_eq!(for_b1.len(), 1);
        assert_eq!(for_b1[0].rating, 2);

        let by_customer = list_reviews(&db, ReviewQuery { reviewer_id: Some(customer.user_id()), ..Default::default() }).await?;
        assert_eq!(by_customer.len(), 2);
        // default ordering: best rated first
        assert_eq!(by_customer[0].rating, 5);
        Ok(())
    }
}
