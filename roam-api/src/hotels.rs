use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};

use roam_core::hotel::BookHotelRequest;

use crate::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/hotels/search", get(search_hotels))
        .route("/api/hotels", get(list_hotels))
        .route("/api/hotels/book", post(book_hotel))
        .route("/api/hotels/{id}", get(get_hotel))
}

#[derive(Debug, Deserialize)]
struct HotelSearchQuery {
    city: Option<String>,
    // older pages sent 'location'
    location: Option<String>,
}

async fn search_hotels(
    State(state): State<AppState>,
    Query(query): Query<HotelSearchQuery>,
) -> Result<Json<Value>, ApiError> {
    let city = query.city.or(query.location).unwrap_or_default();
    let hotels = state
        .hotels
        .search(&city)
        .await
        .map_err(ApiError::from_store)?;
    Ok(Json(json!({ "success": true, "hotels": hotels })))
}

async fn get_hotel(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Value>, ApiError> {
    let hotel = state
        .hotels
        .get(id)
        .await
        .map_err(ApiError::from_store)?
        .ok_or_else(|| ApiError::NotFound("Hotel not found".to_string()))?;
    Ok(Json(json!({ "success": true, "hotel": hotel })))
}

async fn list_hotels(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let hotels = state.hotels.list().await.map_err(ApiError::from_store)?;
    Ok(Json(json!({ "success": true, "hotels": hotels })))
}

async fn book_hotel(
    State(state): State<AppState>,
    Json(req): Json<BookHotelRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let customer_id = state
        .hotels
        .book(&req)
        .await
        .map_err(ApiError::from_store)?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "customer_id": customer_id,
            "message": "Hotel booked successfully",
        })),
    ))
}
