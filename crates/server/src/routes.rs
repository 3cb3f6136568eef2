use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;

use crate::auth::ServerState;

pub mod accounts;
pub mod base_info;
pub mod offers;
pub mod orders;
pub mod profiles;
pub mod reviews;

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: open reads, token-gated API routes,
/// CORS and request tracing.
pub fn build_router(cors: CorsLayer, state: ServerState) -> Router {
    let api = Router::new()
        .route("/health", get(health))
        .route("/registration", post(accounts::registration))
        .route("/login", post(accounts::login))
        .route("/logout", post(accounts::logout))
        .route("/base-info", get(base_info::retrieve))
        .route("/profile/:user_id", get(profiles::retrieve).patch(profiles::update))
        .route("/profiles/business", get(profiles::list_business))
        .route("/profiles/customer", get(profiles::list_customer))
        .route("/offers", get(offers::list).post(offers::create))
        .route(
            "/offers/:id",
            get(offers::retrieve).patch(offers::update).delete(offers::destroy),
        )
        .route("/offerdetails/:id", get(offers::retrieve_detail))
        .route("/orders", get(orders::list).post(orders::create))
        .route(
            "/orders/:id",
            get(orders::retrieve).patch(orders::update).delete(orders::destroy),
        )
        .route("/order-count/:business_user_id", get(orders::count_in_progress))
        .route("/completed-order-count/:business_user_id", get(orders::count_completed))
        .route("/reviews", get(reviews::list).post(reviews::create))
        .route(
            "/reviews/:id",
            get(reviews::retrieve).patch(reviews::update).delete(reviews::destroy),
        );

    api.with_state(state).layer(cors).layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
            .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
    )
}
