use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use roam_core::ticket::BookSeatRequest;

use crate::error::ApiError;
use crate::receipts;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/book-seat", post(book_seat))
        .route("/api/ticket/{pnr}", get(get_ticket))
        .route("/api/ticket/{pnr}/pdf", get(ticket_pdf))
}

async fn book_seat(
    State(state): State<AppState>,
    Json(req): Json<BookSeatRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let ticket_id = state
        .tickets
        .book_seat(&req)
        .await
        .map_err(ApiError::from_store)?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "ticket_id": ticket_id,
            "pnr_no": req.pnr_no,
            "message": "Seat booked successfully",
        })),
    ))
}

async fn get_ticket(
    State(state): State<AppState>,
    Path(pnr): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let ticket = state
        .tickets
        .get(&pnr)
        .await
        .map_err(ApiError::from_store)?
        .ok_or_else(|| ApiError::NotFound("Ticket not found".to_string()))?;
    Ok(Json(json!({ "success": true, "ticket": ticket })))
}

async fn ticket_pdf(
    State(state): State<AppState>,
    Path(pnr): Path<String>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let ticket = state
        .tickets
        .get(&pnr)
        .await
        .map_err(ApiError::from_store)?
        .ok_or_else(|| ApiError::NotFound("Ticket not found".to_string()))?;

    let bytes = receipts::ticket_receipt(&ticket);
    Ok(receipts::attachment(
        format!("ticket-{}.pdf", ticket.pnr_no),
        bytes,
    ))
}
