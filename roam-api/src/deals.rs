use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use roam_core::deal::BookDealRequest;

use crate::error::ApiError;
use crate::receipts;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/deals", get(list_deals))
        .route("/api/deals/book", post(book_deal))
        .route("/api/deals/bookings/{id}/pdf", get(booking_pdf))
}

async fn list_deals(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let deals = state
        .deals
        .list_offers()
        .await
        .map_err(ApiError::from_store)?;
    Ok(Json(json!({ "success": true, "deals": deals })))
}

/// A reservation either references an existing offer by id or carries the
/// offer inline; the offer row is immutable either way.
async fn book_deal(
    State(state): State<AppState>,
    Json(req): Json<BookDealRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let (booking_id, deal_id) = state
        .deals
        .book(&state.profile, &req)
        .await
        .map_err(ApiError::from_store)?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "booking_id": booking_id,
            "deal_id": deal_id,
        })),
    ))
}

async fn booking_pdf(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let booking = state
        .deals
        .booking_details(id)
        .await
        .map_err(ApiError::from_store)?
        .ok_or_else(|| ApiError::NotFound("Deal booking not found".to_string()))?;

    let bytes = receipts::deal_receipt(&booking);
    Ok(receipts::attachment(
        format!("deal-booking-{}.pdf", booking.booking_id),
        bytes,
    ))
}
