//! HTTP API route definitions.

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::handlers::{
    create_bet, create_coupon, create_match, delete_bet, delete_coupon, delete_match, get_coupon, get_match, health,
    list_catalog, list_coupons, list_matches, metrics, ready, status, update_match, AppState,
};

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health endpoints
        .route("/health", get(health))
        .route("/ready", get(ready))
        .route("/metrics", get(metrics))
        // Status endpoint
        .route("/api/v1/status", get(status))
        .route("/api/v1/catalog", get(list_catalog))
        // Matches
        .route("/api/v1/matches", get(list_matches).post(create_match))
        .route(
            "/api/v1/matches/:id",
            get(get_match).patch(update_match).delete(delete_match),
        )
        // Coupons
        .route("/api/v1/coupons", get(list_coupons).post(create_coupon))
        .route("/api/v1/coupons/:id", get(get_coupon).delete(delete_coupon))
        // Bets
        .route("/api/v1/bets", post(create_bet))
        .route("/api/v1/bets/:id", delete(delete_bet))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
