use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use roam_core::deal::AddDealRequest;
use roam_core::flight::AddFlightRequest;
use roam_core::hotel::{HotelBookingUpdateRequest, HotelUpsertRequest};
use roam_core::money;
use roam_core::package::AddPackageRequest;
use roam_core::review::UpdateReviewRequest;
use roam_core::ticket::UpdateTicketRequest;

use crate::error::ApiError;
use crate::state::AppState;
use roam_store::reporting::RouteCount;

pub fn routes() -> Router<AppState> {
    Router::new()
        // listings
        .route("/api/admin/users", get(list_users).post(add_user))
        .route("/api/admin/bookings", get(list_tickets))
        .route("/api/admin/hotel-bookings", get(list_hotel_bookings))
        .route("/api/admin/hotels", get(list_hotels).post(add_hotel))
        .route("/api/admin/packages", get(list_package_bookings).post(add_package))
        .route("/api/admin/deals", get(list_deals).post(add_deal))
        .route("/api/admin/deal-bookings", get(list_deal_bookings))
        .route("/api/admin/reviews", get(list_reviews))
        // aggregates
        .route("/api/admin/stats", get(stats))
        .route("/api/admin/revenue", get(revenue))
        .route("/api/admin/analytics", get(analytics))
        // row-level maintenance
        .route("/api/admin/users/{id}", put(update_user).delete(delete_user))
        .route("/api/admin/hotels/{id}", put(update_hotel).delete(delete_hotel))
        .route(
            "/api/admin/hotel-bookings/{id}",
            put(update_hotel_booking).delete(delete_hotel_booking),
        )
        .route("/api/admin/bookings/{id}", put(update_ticket).delete(delete_ticket))
        .route("/api/admin/reviews/{id}", put(update_review).delete(delete_review))
        .route("/api/admin/packages/{id}", delete(delete_package_booking))
        .route("/api/admin/deals/{id}", delete(delete_deal))
        // flights only grow
        .route("/api/admin/flights", post(add_flight))
}

// ============================================================================
// Listings
// ============================================================================

async fn list_users(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let users = state.users.list().await.map_err(ApiError::from_store)?;
    Ok(Json(json!({ "success": true, "data": users })))
}

async fn list_tickets(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let tickets = state
        .tickets
        .admin_list()
        .await
        .map_err(ApiError::from_store)?;
    Ok(Json(json!({ "success": true, "data": tickets })))
}

async fn list_hotels(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let hotels = state.hotels.list().await.map_err(ApiError::from_store)?;
    Ok(Json(json!({ "success": true, "data": hotels })))
}

async fn list_hotel_bookings(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let bookings = state
        .hotels
        .bookings()
        .await
        .map_err(ApiError::from_store)?;
    Ok(Json(json!({ "success": true, "data": bookings })))
}

async fn list_package_bookings(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let bookings = state
        .packages
        .admin_bookings(&state.profile)
        .await
        .map_err(ApiError::from_store)?;
    Ok(Json(json!({ "success": true, "data": bookings })))
}

async fn list_deals(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let deals = state
        .deals
        .list_offers()
        .await
        .map_err(ApiError::from_store)?;
    Ok(Json(json!({ "success": true, "data": deals })))
}

async fn list_deal_bookings(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let bookings = state
        .deals
        .admin_bookings()
        .await
        .map_err(ApiError::from_store)?;
    Ok(Json(json!({ "success": true, "data": bookings })))
}

async fn list_reviews(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let reviews = state
        .reviews
        .admin_list()
        .await
        .map_err(ApiError::from_store)?;
    Ok(Json(json!({ "success": true, "data": reviews })))
}

// ============================================================================
// Aggregates
// ============================================================================

async fn stats(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let stats = state.reports.stats().await.map_err(ApiError::from_store)?;
    Ok(Json(json!({ "success": true, "stats": stats })))
}

async fn revenue(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let revenue = state
        .reports
        .revenue()
        .await
        .map_err(ApiError::from_store)?;
    Ok(Json(json!({ "success": true, "revenue": revenue })))
}

async fn analytics(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let popular = state
        .reports
        .routes_by_popularity(false, 5)
        .await
        .map_err(ApiError::from_store)?;
    let least_popular = state
        .reports
        .routes_by_popularity(true, 5)
        .await
        .map_err(ApiError::from_store)?;
    let top_packages = state
        .reports
        .top_packages(5)
        .await
        .map_err(ApiError::from_store)?;
    let top_deals = state
        .reports
        .top_deals(5)
        .await
        .map_err(ApiError::from_store)?;
    let totals = state
        .reports
        .ticket_totals()
        .await
        .map_err(ApiError::from_store)?;

    let max_tickets = popular.first().map(|r| {
        json!({
            "source": r.source,
            "destination": r.destination,
            "total_tickets": r.booking_count,
        })
    });
    let predictions = build_predictions(&popular, totals.revenue, totals.total_bookings);

    Ok(Json(json!({
        "success": true,
        "analytics": {
            "popularRoutes": popular,
            "leastPopularRoutes": least_popular,
            "maxTickets": max_tickets,
            "topPackages": top_packages,
            "topDeals": top_deals,
            "aiPredictions": predictions,
        },
    })))
}

#[derive(Debug, Serialize, PartialEq)]
pub struct Prediction {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub message: String,
    pub confidence: &'static str,
}

/// Trend notes derived from the booking aggregates. Nothing here predicts;
/// it restates the strongest signals in the data.
pub fn build_predictions(
    routes: &[RouteCount],
    total_revenue: f64,
    total_bookings: i64,
) -> Vec<Prediction> {
    let mut predictions = Vec::new();

    if let Some(top) = routes.first() {
        predictions.push(Prediction {
            kind: "trending",
            message: format!(
                "{} → {} is the most popular route with {} total bookings",
                top.source, top.destination, top.booking_count
            ),
            confidence: "High",
        });
        if let Some(second) = routes.get(1) {
            predictions.push(Prediction {
                kind: "emerging",
                message: format!(
                    "{} → {} is gaining popularity ({} bookings)",
                    second.source, second.destination, second.booking_count
                ),
                confidence: "Medium",
            });
        }
    }

    if total_revenue > 0.0 && total_bookings > 0 {
        let average = (total_revenue / total_bookings as f64).round();
        predictions.push(Prediction {
            kind: "revenue",
            message: format!(
                "Average revenue per booking: ₹{}",
                money::group_inr(average)
            ),
            confidence: "High",
        });
    }

    if total_bookings > 5 {
        predictions.push(Prediction {
            kind: "growth",
            message: format!(
                "With {total_bookings} bookings, you're on track for strong growth. Consider adding more routes!"
            ),
            confidence: "Medium",
        });
    }

    predictions
}

// ============================================================================
// Row-level maintenance
// ============================================================================

#[derive(Debug, Deserialize)]
struct UserUpsertRequest {
    name: String,
    email: String,
    number: String,
}

async fn add_user(
    State(state): State<AppState>,
    Json(req): Json<UserUpsertRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let user_id = state
        .users
        .create(&req.name, &req.email, &req.number)
        .await
        .map_err(ApiError::from_store)?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "user_id": user_id, "message": "User added successfully" })),
    ))
}

async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(req): Json<UserUpsertRequest>,
) -> Result<Json<Value>, ApiError> {
    state
        .users
        .update(id, &req.name, &req.email, &req.number)
        .await
        .map_err(ApiError::from_store)?;
    Ok(Json(json!({ "success": true, "message": "User updated successfully" })))
}

async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Value>, ApiError> {
    state.users.delete(id).await.map_err(ApiError::from_store)?;
    Ok(Json(json!({ "success": true, "message": "User deleted successfully" })))
}

async fn add_hotel(
    State(state): State<AppState>,
    Json(req): Json<HotelUpsertRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let hotel_id = state.hotels.add(&req).await.map_err(ApiError::from_store)?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "hotel_id": hotel_id, "message": "Hotel added successfully" })),
    ))
}

async fn update_hotel(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(req): Json<HotelUpsertRequest>,
) -> Result<Json<Value>, ApiError> {
    state
        .hotels
        .update(id, &req)
        .await
        .map_err(ApiError::from_store)?;
    Ok(Json(json!({ "success": true, "message": "Hotel updated successfully" })))
}

async fn delete_hotel(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Value>, ApiError> {
    state
        .hotels
        .delete(id)
        .await
        .map_err(ApiError::from_store)?;
    Ok(Json(json!({ "success": true, "message": "Hotel deleted successfully" })))
}

async fn update_hotel_booking(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(req): Json<HotelBookingUpdateRequest>,
) -> Result<Json<Value>, ApiError> {
    state
        .hotels
        .update_booking(id, &req)
        .await
        .map_err(ApiError::from_store)?;
    Ok(Json(json!({ "success": true, "message": "Hotel booking updated successfully" })))
}

async fn delete_hotel_booking(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Value>, ApiError> {
    state
        .hotels
        .delete_booking(id)
        .await
        .map_err(ApiError::from_store)?;
    Ok(Json(json!({ "success": true, "message": "Hotel booking deleted successfully" })))
}

async fn update_ticket(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(req): Json<UpdateTicketRequest>,
) -> Result<Json<Value>, ApiError> {
    state
        .tickets
        .update(id, &req)
        .await
        .map_err(ApiError::from_store)?;
    Ok(Json(json!({ "success": true, "message": "Flight booking updated successfully" })))
}

async fn delete_ticket(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Value>, ApiError> {
    state
        .tickets
        .delete(id)
        .await
        .map_err(ApiError::from_store)?;
    Ok(Json(json!({ "success": true, "message": "Flight booking deleted successfully" })))
}

async fn update_review(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(req): Json<UpdateReviewRequest>,
) -> Result<Json<Value>, ApiError> {
    state
        .reviews
        .update(id, req.rating, req.review_text.as_deref())
        .await
        .map_err(ApiError::from_store)?;
    Ok(Json(json!({ "success": true, "message": "Review updated successfully" })))
}

async fn delete_review(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Value>, ApiError> {
    state
        .reviews
        .delete(id)
        .await
        .map_err(ApiError::from_store)?;
    Ok(Json(json!({ "success": true, "message": "Review deleted successfully" })))
}

async fn delete_package_booking(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Value>, ApiError> {
    state
        .packages
        .delete_booking(id)
        .await
        .map_err(ApiError::from_store)?;
    Ok(Json(json!({ "success": true, "message": "Package booking deleted successfully" })))
}

async fn add_package(
    State(state): State<AppState>,
    Json(req): Json<AddPackageRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let package_id = state
        .packages
        .add(&req)
        .await
        .map_err(ApiError::from_store)?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "package_id": package_id, "message": "Package added successfully" })),
    ))
}

async fn add_deal(
    State(state): State<AppState>,
    Json(req): Json<AddDealRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let deal_id = state
        .deals
        .add_offer(&req)
        .await
        .map_err(ApiError::from_store)?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "deal_id": deal_id, "message": "Deal added successfully" })),
    ))
}

async fn delete_deal(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Value>, ApiError> {
    state
        .deals
        .delete_offer(id)
        .await
        .map_err(ApiError::from_store)?;
    Ok(Json(json!({ "success": true, "message": "Deal deleted successfully" })))
}

async fn add_flight(
    State(state): State<AppState>,
    Json(req): Json<AddFlightRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let (departure, arrival) = req
        .schedule()
        .map_err(|err| ApiError::Validation(err.to_string()))?;
    let flight_id = state
        .flights
        .add(&req, departure, arrival)
        .await
        .map_err(ApiError::from_store)?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "flight_id": flight_id, "message": "Flight added successfully" })),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(source: &str, destination: &str, count: i64) -> RouteCount {
        RouteCount {
            source: source.to_string(),
            destination: destination.to_string(),
            booking_count: count,
        }
    }

    #[test]
    fn predictions_lead_with_the_top_route() {
        let routes = vec![route("Delhi", "Goa", 12), route("Mumbai", "Pune", 4)];
        let predictions = build_predictions(&routes, 96000.0, 16);

        assert_eq!(predictions[0].kind, "trending");
        assert!(predictions[0].message.contains("Delhi → Goa"));
        assert_eq!(predictions[1].kind, "emerging");
        assert!(predictions[1].message.contains("Mumbai → Pune"));
    }

    #[test]
    fn revenue_average_uses_indian_grouping() {
        let routes = vec![route("Delhi", "Goa", 3)];
        let predictions = build_predictions(&routes, 370500.0, 3);
        let revenue = predictions.iter().find(|p| p.kind == "revenue").unwrap();
        assert_eq!(
            revenue.message,
            "Average revenue per booking: ₹1,23,500"
        );
    }

    #[test]
    fn growth_note_needs_more_than_five_bookings() {
        let none = build_predictions(&[], 0.0, 5);
        assert!(none.iter().all(|p| p.kind != "growth"));

        let some = build_predictions(&[], 100.0, 6);
        assert!(some.iter().any(|p| p.kind == "growth"));
    }

    #[test]
    fn empty_data_yields_no_route_predictions() {
        let predictions = build_predictions(&[], 0.0, 0);
        assert!(predictions.is_empty());
    }
}
