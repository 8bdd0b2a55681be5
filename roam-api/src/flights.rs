use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use roam_core::flight::{self, Flight};

use crate::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/flights/search", get(search_flights))
        .route("/api/flights/{id}", get(get_flight))
        .route("/api/flights/{id}/seats", get(booked_seats))
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    departure: Option<String>,
    // 'arrival' and 'destination' are both accepted for backward
    // compatibility with the older search page.
    arrival: Option<String>,
    destination: Option<String>,
    date: Option<NaiveDate>,
}

async fn search_flights(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Value>, ApiError> {
    let missing = || {
        ApiError::Validation(
            "Departure and arrival/destination locations are required".to_string(),
        )
    };
    let departure = query
        .departure
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(missing)?;
    let arrival = query
        .arrival
        .or(query.destination)
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(missing)?;

    let from_city = flight::resolve_city(&departure);
    let to_city = flight::resolve_city(&arrival);
    let date = query.date.unwrap_or_else(|| Utc::now().date_naive());

    info!("Searching flights from {from_city} to {to_city} on {date}");

    let flights = state
        .flights
        .search(&from_city, &to_city, date)
        .await
        .map_err(ApiError::from_store)?;
    info!("Found {} flights", flights.len());

    let formatted: Vec<Value> = flights.iter().map(summary).collect();
    Ok(Json(json!({ "success": true, "flights": formatted })))
}

async fn get_flight(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Value>, ApiError> {
    let flight = state
        .flights
        .get(id)
        .await
        .map_err(ApiError::from_store)?
        .ok_or_else(|| ApiError::NotFound("Flight not found".to_string()))?;

    Ok(Json(json!({ "success": true, "flight": detail(&flight) })))
}

async fn booked_seats(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Value>, ApiError> {
    let seats = state
        .trips
        .booked_seats(id)
        .await
        .map_err(ApiError::from_store)?;
    Ok(Json(json!({ "success": true, "bookedSeats": seats })))
}

fn duration_of(f: &Flight) -> String {
    match (f.departure_time, f.arrival_time) {
        (Some(dep), Some(arr)) => flight::format_duration(dep, arr),
        _ => flight::DEFAULT_DURATION.to_string(),
    }
}

/// The search pages expect `from`/`to`/`id` aliases alongside the raw
/// columns, plus defaults for NULL price and duration.
fn summary(f: &Flight) -> Value {
    json!({
        "id": f.flight_id,
        "flight_id": f.flight_id,
        "airline": f.airline,
        "flight_number": f.flight_number,
        "source": f.source,
        "destination": f.destination,
        "from": f.source,
        "to": f.destination,
        "departure_time": f.departure_time,
        "arrival_time": f.arrival_time,
        "duration": duration_of(f),
        "price": f.price.unwrap_or(flight::DEFAULT_PRICE),
        "status": f.status,
    })
}

fn detail(f: &Flight) -> Value {
    json!({
        "id": f.flight_id,
        "flight_id": f.flight_id,
        "flight_number": f.flight_number.clone().unwrap_or_else(|| "N/A".to_string()),
        "airline": f.airline.clone().unwrap_or_else(|| "Airline".to_string()),
        "source": f.source,
        "destination": f.destination,
        "from": f.source,
        "to": f.destination,
        "departure_time": f.departure_time,
        "arrival_time": f.arrival_time,
        "duration": duration_of(f),
        "price": f.price.unwrap_or(flight::DEFAULT_PRICE),
        "status": f.status.clone().unwrap_or_else(|| "Scheduled".to_string()),
        "departure_date": f.departure_time.map(|t| t.date().to_string()),
        "departure_time_formatted": f.departure_time.map(|t| t.format("%H:%M").to_string()),
        "arrival_time_formatted": f.arrival_time.map(|t| t.format("%H:%M").to_string()),
    })
}
