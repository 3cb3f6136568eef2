use axum::http::StatusCode;
use serde_json::json;

mod common;
use common::{build_app, register, send};

#[tokio::test]
async fn read_requires_auth_and_returns_full_body() -> anyhow::Result<()> {
    let (app, _db) = build_app().await?;
    let business = register(&app, "designer", "business").await;
    let uri = format!("/profile/{}", business.user_id);

    let (status, _) = send(&app, "GET", &uri, None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(&app, "GET", &uri, Some(&business.token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"], business.user_id.as_str());
    assert_eq!(body["username"], "designer");
    assert_eq!(body["type"], "business");
    assert_eq!(body["email"], "designer@example.com");

    let missing = format!("/profile/{}", uuid::Uuid::new_v4());
    let (status, _) = send(&app, "GET", &missing, Some(&business.token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn owner_only_patch_with_whitelisted_fields() -> anyhow::Result<()> {
    let (app, _db) = build_app().await?;
    let business = register(&app, "designer", "business").await;
    let other = register(&app, "other", "customer").await;
    let uri = format!("/profile/{}", business.user_id);

    let patch = json!({
        "first_name": "Max",
        "last_name": "Muster",
        "location": "Berlin",
        "tel": "123456",
        "working_hours": "9-17",
    });
    let (status, body) = send(&app, "PATCH", &uri, Some(&business.token), Some(patch.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["first_name"], "Max");
    assert_eq!(body["location"], "Berlin");
    // kind never moves through this surface
    assert_eq!(body["type"], "business");

    let (status, _) = send(&app, "PATCH", &uri, Some(&other.token), Some(patch)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    Ok(())
}

#[tokio::test]
async fn kind_lists_are_split() -> anyhow::Result<()> {
    let (app, _db) = build_app().await?;
    let business = register(&app, "designer", "business").await;
    register(&app, "buyer", "customer").await;
    register(&app, "buyer2", "customer").await;

    let (status, body) = send(&app, "GET", "/profiles/business", Some(&business.token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["username"], "designer");

    let (_, body) = send(&app, "GET", "/profiles/customer", Some(&business.token), None).await;
    assert_eq!(body.as_array().unwrap().len(), 2);

    let (status, _) = send(&app, "GET", "/profiles/business", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    Ok(())
}
