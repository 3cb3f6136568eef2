//! Platform-wide statistics for the public landing surface.

use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QuerySelect};
use serde::Serialize;

use models::profile::ProfileKind;
use models::{offer, profile, review};

use crate::errors::ServiceError;

#[derive(Debug, Serialize)]
pub struct BaseInfoBody {
    pub review_count: u64,
    pub average_rating: f64,
    pub business_profile_count: u64,
    pub offer_count: u64,
}

/// Counts and the average rating, rounded to one decimal and defaulting to
/// 0.0 when there are no reviews yet.
pub async fn base_info(db: &DatabaseConnection) -> Result<BaseInfoBody, ServiceError> {
    let review_count = review::Entity::find().count(db).await.map_err(ServiceError::db)?;

    let ratings: Vec<i32> = review::Entity::find()
        .select_only()
        .column(review::Column::Rating)
        .into_tuple()
        .all(db)
        .await
        .map_err(ServiceError::db)?;
    let average_rating = if ratings.is_empty() {
        0.0
    } else {
        let sum: i64 = ratings.iter().map(|r| *r as i64).sum();
        let avg = sum as f64 / ratings.len() as f64;
        (avg * 10.0).round() / 10.0
    };

    let business_profile_count = profile::Entity::find()
        .filter(profile::Column::Kind.eq(ProfileKind::Business.as_str()))
        .count(db)
        .await
        .map_err(ServiceError::db)?;
    let offer_count = offer::Entity::find().count(db).await.map_err(ServiceError::db)?;

    Ok(BaseInfoBody { review_count, average_rating, business_profile_count, offer_count })
}
