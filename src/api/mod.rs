//! HTTP API module for matches, coupons, bets, health and metrics.

pub mod handlers;
pub mod routes;

pub use handlers::{ApiError, AppState};
pub use routes::create_router;
