#![cfg(test)]
use migration::MigratorTrait;
use rust_decimal::Decimal;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use uuid::Uuid;

use models::profile::ProfileKind;
use models::{offer_detail, profile, user};

use crate::policy::Actor;

/// Fresh single-connection in-memory database with the full schema applied.
/// One connection means every query in a test sees the same database.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let mut opts = ConnectOptions::new("sqlite::memory:".to_owned());
    opts.max_connections(1).sqlx_logging(false);
    let db = Database::connect(opts).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

async fn actor(db: &DatabaseConnection, username: &str, kind: ProfileKind) -> Result<Actor, anyhow::Error> {
    let u = user::create(db, username, &format!("{username}@example.com"), "hash", "argon2").await?;
    let p = profile::create(db, u.id, kind).await?;
    Ok(Actor { user: u, profile: p })
}

pub async fn business_actor(db: &DatabaseConnection, username: &str) -> Result<Actor, anyhow::Error> {
    actor(db, username, ProfileKind::Business).await
}

pub async fn customer_actor(db: &DatabaseConnection, username: &str) -> Result<Actor, anyhow::Error> {
    actor(db, username, ProfileKind::Customer).await
}

/// Staff flag is never settable through the API; tests flip it directly.
pub async fn staff_actor(db: &DatabaseConnection, username: &str) -> Result<Actor, anyhow::Error> {
    use sea_orm::{ActiveModelTrait, Set};
    let base = actor(db, username, ProfileKind::Customer).await?;
    let mut am: user::ActiveModel = base.user.into();
    am.is_staff = Set(true);
    let updated = am.update(db).await?;
    Ok(Actor { user: updated, profile: base.profile })
}

/// Detached tier model for pure-function tests.
pub fn detail_model(price: Decimal, delivery_time_in_days: i32) -> offer_detail::Model {
    offer_detail::Model {
        id: Uuid::new_v4(),
        offer_id: Uuid::new_v4(),
        title: "Tier".into(),
        revisions: 1,
        delivery_time_in_days,
        price,
        features: serde_json::json!(["Logo"]),
        offer_type: "basic".into(),
    }
}
