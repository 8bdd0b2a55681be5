use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use roam_core::package::BookPackageRequest;
use roam_core::review::CreateReviewRequest;

use crate::error::ApiError;
use crate::receipts;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/packages", get(list_packages))
        .route("/api/packages/book", post(book_package))
        .route("/api/packages/reviews", post(create_review))
        .route("/api/packages/{id}/reviews", get(list_reviews))
        .route("/api/package-bookings/{id}", get(get_booking))
        .route("/api/package-bookings/{id}/pdf", get(booking_pdf))
}

async fn list_packages(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let packages = state.packages.list().await.map_err(ApiError::from_store)?;
    Ok(Json(json!({ "success": true, "packages": packages })))
}

/// The booking writer: upsert the customer by email, upsert the package by
/// its natural key, insert the booking, all in one transaction.
async fn book_package(
    State(state): State<AppState>,
    Json(req): Json<BookPackageRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let booked = state
        .packages
        .book(&state.profile, &req)
        .await
        .map_err(ApiError::from_store)?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "booking_id": booked.booking_id,
            "customer_id": booked.customer_id,
            "package_id": booked.package_id,
            "message": "Package booked successfully",
        })),
    ))
}

async fn create_review(
    State(state): State<AppState>,
    Json(req): Json<CreateReviewRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let created = state
        .reviews
        .create(&req)
        .await
        .map_err(ApiError::from_store)?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "review_id": created.review_id,
            "customer_id": created.customer_id,
            "package_id": created.package_id,
        })),
    ))
}

async fn list_reviews(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Value>, ApiError> {
    let reviews = state
        .reviews
        .list_for_package(id)
        .await
        .map_err(ApiError::from_store)?;
    Ok(Json(json!({ "success": true, "reviews": reviews })))
}

async fn get_booking(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Value>, ApiError> {
    let booking = state
        .packages
        .booking_details(&state.profile, id)
        .await
        .map_err(ApiError::from_store)?
        .ok_or_else(|| ApiError::NotFound("Package booking not found".to_string()))?;
    Ok(Json(json!({ "success": true, "booking": booking })))
}

async fn booking_pdf(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let booking = state
        .packages
        .booking_details(&state.profile, id)
        .await
        .map_err(ApiError::from_store)?
        .ok_or_else(|| ApiError::NotFound("Package booking not found".to_string()))?;

    let bytes = receipts::package_receipt(&booking);
    Ok(receipts::attachment(
        format!("package-booking-{}.pdf", booking.booking_id),
        bytes,
    ))
}
