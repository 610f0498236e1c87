//! HTTP API handlers.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::catalog::{catalog, describe_bet, BetTag, BetTypeEntry};
use crate::coupon::{Coupon, CouponDetail, CouponWithStatus, LegView, StatusCounts};
use crate::error::{MatchError, StoreError};
use crate::fixture::{Match, MatchUpdate};
use crate::metrics::{record_coupon_status, record_leg_outcome, timer_evaluation};
use crate::resolution::resolve;
use crate::store::{MatchRef, MemoryStore, NewBet};

/// Application state shared with handlers.
#[derive(Clone)]
pub struct AppState {
    /// Match, coupon and bet storage.
    pub store: Arc<MemoryStore>,
    /// Whether startup (seed loading) has completed.
    pub ready: Arc<AtomicBool>,
    /// Prometheus render handle, when a recorder is installed.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create new app state over a store.
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self {
            store,
            ready: Arc::new(AtomicBool::new(false)),
            metrics: None,
        }
    }

    /// Attach a Prometheus handle for `/metrics`.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    /// Set ready state.
    pub fn set_ready(&self, ready: bool) {
        self.ready.store(ready, Ordering::SeqCst);
    }

    /// Check if ready.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }
}

// === Errors ===

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ApiError {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

impl ApiError {
    /// Create an error body.
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }

    /// 404 body.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new("not_found", message)
    }

    /// 400 body.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("bad_request", message)
    }
}

type ApiResult<T> = Result<T, (StatusCode, Json<ApiError>)>;

/// Map a store error to a status code and JSON body.
fn reject(err: StoreError) -> (StatusCode, Json<ApiError>) {
    let (status, body) = match &err {
        e if e.is_not_found() => (StatusCode::NOT_FOUND, ApiError::not_found(e.to_string())),
        StoreError::DuplicateBet { .. } => (StatusCode::CONFLICT, ApiError::new("duplicate_bet", err.to_string())),
        StoreError::Match(MatchError::ScoreLocked { .. }) => {
            (StatusCode::CONFLICT, ApiError::new("score_locked", err.to_string()))
        }
        StoreError::InvalidBet { .. } => (StatusCode::BAD_REQUEST, ApiError::new("invalid_bet", err.to_string())),
        _ => (StatusCode::BAD_REQUEST, ApiError::bad_request(err.to_string())),
    };
    debug!(status = %status, error = %err, "Request rejected");
    (status, Json(body))
}

// === Request / response bodies ===

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status: "ok".
    pub status: &'static str,
}

/// Readiness check response.
#[derive(Debug, Serialize)]
pub struct ReadyResponse {
    /// Whether service is ready.
    pub ready: bool,
}

/// Status response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    /// Service status.
    pub status: &'static str,
    /// Stored matches.
    pub matches: usize,
    /// Stored coupons.
    pub coupons: usize,
    /// Stored bets.
    pub bets: usize,
    /// Coupons per current status.
    pub coupon_status: StatusCounts,
}

/// Acknowledgement for deletes.
#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    /// Always true.
    pub success: bool,
}

const DELETED: DeletedResponse = DeletedResponse { success: true };

/// `POST /api/v1/matches` body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMatchRequest {
    /// Home team name.
    pub home_team: String,
    /// Away team name.
    pub away_team: String,
}

/// `POST /api/v1/coupons` body.
#[derive(Debug, Deserialize)]
pub struct CreateCouponRequest {
    /// Coupon name.
    pub name: String,
}

/// `POST /api/v1/bets` body. `newMatch` wins over `matchId` when both are set.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBetRequest {
    /// Coupon to add the leg to.
    pub coupon_id: Uuid,
    /// Existing match.
    #[serde(default)]
    pub match_id: Option<Uuid>,
    /// Fixture to create with the bet.
    #[serde(default)]
    pub new_match: Option<CreateMatchRequest>,
    /// Bet-type tag.
    pub bet_type: BetTag,
    /// Selection or line.
    pub bet_value: String,
}

impl CreateBetRequest {
    fn into_new_bet(self) -> Result<NewBet, ApiError> {
        let target = match (self.new_match, self.match_id) {
            (Some(m), _) => MatchRef::New {
                home_team: m.home_team,
                away_team: m.away_team,
            },
            (None, Some(id)) => MatchRef::Existing(id),
            (None, None) => return Err(ApiError::bad_request("matchId or newMatch is required")),
        };

        Ok(NewBet {
            coupon_id: self.coupon_id,
            target,
            bet_type: self.bet_type,
            bet_value: self.bet_value,
        })
    }
}

// === Service endpoints ===

/// Health check handler - always returns 200.
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse { status: "ok" })
}

/// Readiness check handler - returns 200 if ready, 503 otherwise.
pub async fn ready(State(state): State<AppState>) -> impl IntoResponse {
    let is_ready = state.is_ready();
    let response = ReadyResponse { ready: is_ready };

    if is_ready {
        (StatusCode::OK, Json(response))
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, Json(response))
    }
}

/// Status handler - store counts and coupons per status.
pub async fn status(State(state): State<AppState>) -> impl IntoResponse {
    let status = if state.is_ready() { "running" } else { "starting" };
    let counts = {
        let _timer = timer_evaluation();
        state.store.snapshot().status_counts()
    };

    Json(StatusResponse {
        status,
        matches: state.store.match_count(),
        coupons: state.store.coupon_count(),
        bets: state.store.bet_count(),
        coupon_status: counts,
    })
}

/// Prometheus text exposition; 404 when no recorder is installed.
pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    match &state.metrics {
        Some(handle) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        )
            .into_response(),
        None => (StatusCode::NOT_FOUND, Json(ApiError::not_found("metrics are disabled"))).into_response(),
    }
}

/// Bet types with labels and selectable values.
pub async fn list_catalog() -> Json<&'static [BetTypeEntry]> {
    Json(catalog().entries())
}

// === Matches ===

/// Matches in display order.
pub async fn list_matches(State(state): State<AppState>) -> Json<Vec<Match>> {
    Json(state.store.list_matches())
}

/// Create a match.
pub async fn create_match(
    State(state): State<AppState>,
    Json(body): Json<CreateMatchRequest>,
) -> ApiResult<(StatusCode, Json<Match>)> {
    let fixture = state.store.create_match(&body.home_team, &body.away_team).map_err(reject)?;
    Ok((StatusCode::CREATED, Json(fixture)))
}

/// One match.
pub async fn get_match(State(state): State<AppState>, Path(id): Path<Uuid>) -> ApiResult<Json<Match>> {
    state.store.get_match(id).map(Json).map_err(reject)
}

/// Apply a score or phase update.
pub async fn update_match(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(update): Json<MatchUpdate>,
) -> ApiResult<Json<Match>> {
    state.store.update_match(id, &update).map(Json).map_err(reject)
}

/// Delete a match and its bets.
pub async fn delete_match(State(state): State<AppState>, Path(id): Path<Uuid>) -> ApiResult<Json<DeletedResponse>> {
    state.store.delete_match(id).map_err(reject)?;
    Ok(Json(DELETED))
}

// === Coupons ===

/// Coupons with status: won, pending, lost; most legs won first.
pub async fn list_coupons(State(state): State<AppState>) -> Json<Vec<CouponWithStatus>> {
    let ranked = {
        let _timer = timer_evaluation();
        state.store.snapshot().ranked_coupons()
    };
    for coupon in &ranked {
        record_coupon_status(coupon.status());
    }
    Json(ranked)
}

/// Create a coupon.
pub async fn create_coupon(
    State(state): State<AppState>,
    Json(body): Json<CreateCouponRequest>,
) -> ApiResult<(StatusCode, Json<Coupon>)> {
    let coupon = state.store.create_coupon(&body.name).map_err(reject)?;
    Ok((StatusCode::CREATED, Json(coupon)))
}

/// Coupon with per-leg outcome, label and match.
pub async fn get_coupon(State(state): State<AppState>, Path(id): Path<Uuid>) -> ApiResult<Json<CouponDetail>> {
    let detail = {
        let _timer = timer_evaluation();
        state.store.snapshot().detail(&id)
    };
    let detail = detail.ok_or_else(|| reject(StoreError::CouponNotFound(id)))?;

    for leg in &detail.legs {
        record_leg_outcome(leg.outcome);
    }
    record_coupon_status(detail.tally.status);
    Ok(Json(detail))
}

/// Delete a coupon and its bets.
pub async fn delete_coupon(State(state): State<AppState>, Path(id): Path<Uuid>) -> ApiResult<Json<DeletedResponse>> {
    state.store.delete_coupon(id).map_err(reject)?;
    Ok(Json(DELETED))
}

// === Bets ===

/// Add a leg; responds with the leg's current outcome and match.
pub async fn create_bet(
    State(state): State<AppState>,
    Json(body): Json<CreateBetRequest>,
) -> ApiResult<(StatusCode, Json<LegView>)> {
    let new_bet = body
        .into_new_bet()
        .map_err(|e| (StatusCode::BAD_REQUEST, Json(e)))?;
    let bet = state.store.add_bet(new_bet).map_err(reject)?;

    let fixture = state.store.get_match(bet.match_id).ok();
    let outcome = fixture.as_ref().map(|m| resolve(&bet, m)).unwrap_or_default();
    record_leg_outcome(outcome);

    Ok((
        StatusCode::CREATED,
        Json(LegView {
            label: describe_bet(&bet.bet_type, &bet.bet_value),
            outcome,
            fixture,
            bet,
        }),
    ))
}

/// Remove a leg.
pub async fn delete_bet(State(state): State<AppState>, Path(id): Path<Uuid>) -> ApiResult<Json<DeletedResponse>> {
    state.store.remove_bet(id).map_err(reject)?;
    Ok(Json(DELETED))
}
