use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use serde_json::{json, Value};

use roam_core::trip::CreateTripRequest;

use crate::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/bookings", post(create_booking))
        .route("/api/bookings/{id}", get(get_booking))
        .route("/api/bookings/{id}/cancel", put(cancel_booking))
        .route("/api/users/{id}/bookings", get(user_bookings))
}

/// Booking row and passenger rows land in one transaction.
async fn create_booking(
    State(state): State<AppState>,
    Json(req): Json<CreateTripRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let booking_id = state
        .trips
        .create(&req)
        .await
        .map_err(ApiError::from_store)?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "booking_id": booking_id,
            "message": "Booking created successfully",
        })),
    ))
}

async fn get_booking(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Value>, ApiError> {
    let booking = state
        .trips
        .get(id)
        .await
        .map_err(ApiError::from_store)?
        .ok_or_else(|| ApiError::NotFound("Booking not found".to_string()))?;
    Ok(Json(json!({ "success": true, "booking": booking })))
}

async fn user_bookings(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Value>, ApiError> {
    let bookings = state
        .trips
        .for_user(id)
        .await
        .map_err(ApiError::from_store)?;
    Ok(Json(json!({ "success": true, "bookings": bookings })))
}

/// Cancelling an already-cancelled booking is a 400, not a second write.
async fn cancel_booking(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Value>, ApiError> {
    state.trips.cancel(id).await.map_err(|err| match err {
        roam_store::StoreError::NotFound(_) => {
            ApiError::NotFound("Booking not found".to_string())
        }
        other => ApiError::from_store(other),
    })?;

    Ok(Json(json!({
        "success": true,
        "message": "Booking cancelled successfully",
    })))
}
