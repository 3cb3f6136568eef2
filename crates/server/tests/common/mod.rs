#![allow(dead_code)]
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use migration::MigratorTrait;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use serde_json::{json, Value};
use tower::ServiceExt;
use tower_http::cors::CorsLayer;

use server::auth::{ServerAuthConfig, ServerState};
use server::routes;

pub const JWT_SECRET: &str = "test-secret";

/// App over a fresh single-connection in-memory database with the schema
/// applied, plus the raw connection for fixture surgery.
pub async fn build_app() -> anyhow::Result<(Router, DatabaseConnection)> {
    let mut opts = ConnectOptions::new("sqlite::memory:".to_owned());
    opts.max_connections(1).sqlx_logging(false);
    let db = Database::connect(opts).await?;
    migration::Migrator::up(&db, None).await?;

    let state = ServerState { db: db.clone(), auth: ServerAuthConfig { jwt_secret: JWT_SECRET.into() } };
    Ok((routes::build_router(CorsLayer::very_permissive(), state), db))
}

/// Fire one request and return (status, parsed body). Empty bodies come
/// back as `Value::Null`.
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(t) = token {
        builder = builder.header("Authorization", format!("Bearer {t}"));
    }
    let request = match body {
        Some(b) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&b).expect("serialize body")))
            .expect("build request"),
        None => builder.body(Body::empty()).expect("build request"),
    };
    let response = app.clone().oneshot(request).await.expect("infallible");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).expect("json body") };
    (status, value)
}

pub struct Session {
    pub token: String,
    pub user_id: String,
}

/// Register an account of the given kind and hand back its bearer session.
pub async fn register(app: &Router, username: &str, kind: &str) -> Session {
    let (status, body) = send(
        app,
        "POST",
        "/registration",
        None,
        Some(json!({
            "username": username,
            "email": format!("{username}@example.com"),
            "password": "examplePassword",
            "repeated_password": "examplePassword",
            "type": kind,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "registration failed: {body}");
    Session {
        token: body["token"].as_str().expect("token").to_string(),
        user_id: body["user_id"].as_str().expect("user_id").to_string(),
    }
}

/// Well-formed offer payload: three tiers at 100/200/500 with delivery
/// 5/7/10 days.
pub fn offer_payload(title: &str) -> Value {
    json!({
        "title": title,
        "image": null,
        "description": "Professional website design",
        "details": [
            {
                "title": "Basic",
                "revisions": 2,
                "delivery_time_in_days": 5,
                "price": 100,
                "features": ["Logo", "Homepage"],
                "offer_type": "basic"
            },
            {
                "title": "Standard",
                "revisions": 5,
                "delivery_time_in_days": 7,
                "price": 200,
                "features": ["Logo", "Homepage", "Contact"],
                "offer_type": "standard"
            },
            {
                "title": "Premium",
                "revisions": 10,
                "delivery_time_in_days": 10,
                "price": 500,
                "features": ["Logo", "Full Website", "SEO"],
                "offer_type": "premium"
            }
        ]
    })
}

/// Prices serialize as decimal strings; the fraction-digit padding depends
/// on the database driver, so compare them numerically.
pub fn money(v: &Value) -> f64 {
    v.as_str()
        .map(|s| s.parse::<f64>().expect("decimal string"))
        .or_else(|| v.as_f64())
        .expect("price value")
}

/// Promote an account to staff; there is deliberately no API for this.
pub async fn make_staff(db: &DatabaseConnection, user_id: &str) {
    use sea_orm::{ActiveModelTrait, EntityTrait, Set};
    let id = uuid::Uuid::parse_str(user_id).expect("uuid");
    let found = models::user::Entity::find_by_id(id)
        .one(db)
        .await
        .expect("query user")
        .expect("user exists");
    let mut am: models::user::ActiveModel = found.into();
    am.is_staff = Set(true);
    am.update(db).await.expect("update user");
}
