use axum::{
    extract::{Query, State},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::ApiError;
use crate::models::{NewReservation, Reservation};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/reserved", get(get_reserved))
        .route("/reserve", post(create_reservation))
}

/* ---------- helpers ---------- */

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/* ---------- RESERVED ---------- */

// GET /api/reserved?date=2025-10-06&outlet=Main
#[derive(Debug, Deserialize)]
struct ReservedQuery {
    date: Option<String>,
    outlet: Option<String>,
}

#[derive(Debug, Serialize)]
struct ReservedResponse {
    reserved: Vec<String>,
}

async fn get_reserved(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ReservedQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let (date, outlet) = match (params.date.as_deref(), params.outlet.as_deref()) {
        (Some(date), Some(outlet)) if !date.is_empty() && !outlet.is_empty() => (date, outlet),
        _ => return Err(ApiError::MissingDateOutlet),
    };

    let reserved = state.store.reserved_seats(date, outlet).await;
    Ok(Json(ReservedResponse { reserved }))
}

/* ---------- RESERVE ---------- */

// POST /api/reserve  body: { name, hp, date, time, outlet, seats: ["A1","A2"] }
// Absent fields deserialize to empty and fail validation with the same 400 as
// explicitly empty ones.
#[derive(Debug, Deserialize)]
struct ReserveRequest {
    #[serde(default)]
    name: String,
    #[serde(default)]
    hp: String,
    #[serde(default)]
    date: String,
    #[serde(default)]
    time: String,
    #[serde(default)]
    outlet: String,
    #[serde(default)]
    seats: Vec<String>,
}

#[derive(Debug, Serialize)]
struct ReserveResponse {
    ok: bool,
    reservation: Reservation,
}

async fn create_reservation(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ReserveRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let required = [&req.name, &req.hp, &req.date, &req.time, &req.outlet];
    if required.iter().any(|field| is_blank(field)) || req.seats.is_empty() {
        return Err(ApiError::MissingFields);
    }

    // date/time/outlet pass through verbatim: matching is exact string
    // equality, so the stored values must be what the caller sent.
    let reservation = state
        .store
        .create(NewReservation {
            name: req.name.trim().to_string(),
            hp: req.hp.trim().to_string(),
            date: req.date,
            time: req.time,
            outlet: req.outlet,
            seats: req.seats,
        })
        .await?;

    Ok(Json(ReserveResponse {
        ok: true,
        reservation,
    }))
}
