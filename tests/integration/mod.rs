//! Integration tests for the coupon engine.
//!
//! Drive the public API end to end: store, snapshot evaluation and the HTTP
//! router, the way a client following a match day would.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use coupon_engine::api::{create_router, AppState};
use coupon_engine::catalog::BetTag;
use coupon_engine::coupon::Snapshot;
use coupon_engine::fixture::{MatchStatus, MatchUpdate, ScoreField};
use coupon_engine::resolution::Outcome;
use coupon_engine::store::{MatchRef, MemoryStore, NewBet};

fn leg(coupon_id: Uuid, match_id: Uuid, bet_type: &str, bet_value: &str) -> NewBet {
    NewBet {
        coupon_id,
        target: MatchRef::Existing(match_id),
        bet_type: BetTag::from(bet_type),
        bet_value: bet_value.to_string(),
    }
}

async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
    (status, value)
}

/// A coupon followed from kick-off to full time.
#[test]
fn coupon_follows_match_day() {
    let store = MemoryStore::new();
    let coupon = store.create_coupon("Derbi").unwrap();
    let derby = store.create_match("Galatasaray", "Fenerbahçe").unwrap();

    store.add_bet(leg(coupon.id, derby.id, "ms", "1")).unwrap();
    store.add_bet(leg(coupon.id, derby.id, "kg_var", "var")).unwrap();
    store.add_bet(leg(coupon.id, derby.id, "tg_ust", "2.5")).unwrap();

    let tally = |store: &MemoryStore| store.snapshot().ranked_coupons()[0].tally;

    assert_eq!(tally(&store).status, Outcome::Pending);
    assert_eq!(tally(&store).won_count, 0);

    // 1-1 at half time: both teams scored already.
    store.update_match(derby.id, &MatchUpdate::score(ScoreField::Home1h, 1)).unwrap();
    store.update_match(derby.id, &MatchUpdate::score(ScoreField::Away1h, 1)).unwrap();
    let paused = store.update_match(derby.id, &MatchUpdate::phases(Some(true), None)).unwrap();
    assert_eq!(paused.status, MatchStatus::HalfTime);
    assert_eq!(tally(&store).won_count, 1);

    // 2-1 in the second half: over 2.5 lands before the whistle.
    store.update_match(derby.id, &MatchUpdate::score(ScoreField::Home2h, 1)).unwrap();
    let live = tally(&store);
    assert_eq!(live.status, Outcome::Pending);
    assert_eq!(live.won_count, 2);

    store.update_match(derby.id, &MatchUpdate::phases(None, Some(true))).unwrap();
    let final_tally = tally(&store);
    assert_eq!(final_tally.status, Outcome::Won);
    assert_eq!(final_tally.won_count, 3);
    assert_eq!(final_tally.total_count, 3);
}

/// Coupons are listed won, pending, lost; ties by most legs won.
#[test]
fn coupons_rank_across_statuses() {
    let store = MemoryStore::new();
    let finished = store.create_match("A", "B").unwrap();
    store.update_match(finished.id, &MatchUpdate::score(ScoreField::Home1h, 2)).unwrap();
    store
        .update_match(finished.id, &MatchUpdate::phases(Some(true), Some(true)))
        .unwrap();
    let running = store.create_match("C", "D").unwrap();

    let lost = store.create_coupon("lost").unwrap();
    store.add_bet(leg(lost.id, finished.id, "ms", "2")).unwrap();

    let pending_one = store.create_coupon("pending-one").unwrap();
    store.add_bet(leg(pending_one.id, finished.id, "ms", "1")).unwrap();
    store.add_bet(leg(pending_one.id, running.id, "ms", "1")).unwrap();

    let pending_none = store.create_coupon("pending-none").unwrap();
    store.add_bet(leg(pending_none.id, running.id, "ms", "X")).unwrap();

    let won = store.create_coupon("won").unwrap();
    store.add_bet(leg(won.id, finished.id, "iy_kg_yok", "yok")).unwrap();

    let names: Vec<String> = store
        .snapshot()
        .ranked_coupons()
        .into_iter()
        .map(|c| c.coupon.name)
        .collect();
    assert_eq!(names, vec!["won", "pending-one", "pending-none", "lost"]);
}

/// Unknown bet types are stored and stay pending forever.
#[test]
fn unknown_bet_type_stays_pending() {
    let store = MemoryStore::new();
    let coupon = store.create_coupon("korner").unwrap();
    let fixture = store.create_match("A", "B").unwrap();
    store.add_bet(leg(coupon.id, fixture.id, "korner_ust", "9.5")).unwrap();
    store
        .update_match(fixture.id, &MatchUpdate::phases(Some(true), Some(true)))
        .unwrap();

    let detail = store.snapshot().detail(&coupon.id).unwrap();
    assert_eq!(detail.legs[0].outcome, Outcome::Pending);
    assert_eq!(detail.legs[0].label, "korner_ust: 9.5");
    assert_eq!(detail.tally.status, Outcome::Pending);
}

/// Snapshot files evaluate without a store.
#[test]
fn snapshot_file_evaluates_offline() {
    let snapshot: Snapshot = serde_json::from_value(json!({
        "matches": [{
            "id": "5b0e0c8a-4d0e-4a43-9f0b-0b7f3c1d2e11",
            "homeTeam": "Ev", "awayTeam": "Dep",
            "home1h": 2, "away1h": 0,
            "firstHalfFinished": true
        }],
        "coupons": [{
            "name": "ilk yarı",
            "bets": [
                {"betType": "iy_kg_yok", "betValue": "yok", "matchId": "5b0e0c8a-4d0e-4a43-9f0b-0b7f3c1d2e11"},
                {"betType": "iy_ms_combined", "betValue": "2/2", "matchId": "5b0e0c8a-4d0e-4a43-9f0b-0b7f3c1d2e11"}
            ]
        }]
    }))
    .unwrap();

    let ranked = snapshot.ranked_coupons();
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].tally.status, Outcome::Lost);
    assert_eq!(ranked[0].tally.won_count, 1);
    assert_eq!(ranked[0].tally.total_count, 2);
}

/// Full HTTP round trip: seed, place bets, update scores, read coupons.
#[tokio::test]
async fn http_api_round_trip() {
    let store = Arc::new(MemoryStore::new());
    let state = AppState::new(store.clone());
    state.set_ready(true);
    let app = create_router(state);

    let (status, coupon) = call(&app, Method::POST, "/api/v1/coupons", Some(json!({"name": "Cumartesi"}))).await;
    assert_eq!(status, StatusCode::CREATED);
    let coupon_id = coupon["id"].as_str().unwrap().to_string();

    let (status, fixture) = call(
        &app,
        Method::POST,
        "/api/v1/matches",
        Some(json!({"homeTeam": "Beşiktaş", "awayTeam": "Trabzonspor"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let match_id = fixture["id"].as_str().unwrap().to_string();

    for (bet_type, bet_value) in [("cs", "1X"), ("tg_alt", "3.5"), ("hms", "1:-1")] {
        let (status, _) = call(
            &app,
            Method::POST,
            "/api/v1/bets",
            Some(json!({"couponId": coupon_id, "matchId": match_id, "betType": bet_type, "betValue": bet_value})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/v1/bets",
        Some(json!({"couponId": coupon_id, "matchId": match_id, "betType": "tg_ust", "betValue": "many"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_bet");

    let uri = format!("/api/v1/matches/{match_id}");
    call(&app, Method::PATCH, &uri, Some(json!({"home1h": 1, "firstHalfFinished": true}))).await;
    let (status, updated) = call(
        &app,
        Method::PATCH,
        &uri,
        Some(json!({"home2h": 1, "secondHalfFinished": true})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "finished");

    let (_, coupons) = call(&app, Method::GET, "/api/v1/coupons", None).await;
    assert_eq!(coupons[0]["status"], "won");
    assert_eq!(coupons[0]["wonCount"], 3);

    let (_, detail) = call(&app, Method::GET, &format!("/api/v1/coupons/{coupon_id}"), None).await;
    let labels: Vec<&str> = detail["legs"]
        .as_array()
        .unwrap()
        .iter()
        .map(|leg| leg["label"].as_str().unwrap())
        .collect();
    assert_eq!(labels, vec!["Çifte Şans: 1X", "Toplam Gol Alt: 3.5", "Handikaplı MS: Ev Sahibi (-1)"]);

    let (_, status_body) = call(&app, Method::GET, "/api/v1/status", None).await;
    assert_eq!(status_body["status"], "running");
    assert_eq!(status_body["couponStatus"]["won"], 1);

    let (status, _) = call(&app, Method::DELETE, &format!("/api/v1/coupons/{coupon_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(store.bet_count(), 0);
    assert_eq!(store.match_count(), 1);
}
