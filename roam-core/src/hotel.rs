use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct Hotel {
    pub hotel_id: u64,
    pub hotel_name: String,
    pub city: String,
    pub price_per_night: f64,
    pub rating: Option<f64>,
    pub image_url: Option<String>,
    pub availability: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BookHotelRequest {
    pub customer_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub hotel_id: u64,
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    pub guests: Option<u32>,
    pub rooms: Option<u32>,
}

/// A hotel reservation joined with the hotel it points at, as the admin
/// dashboard lists them.
#[derive(Debug, Clone, Serialize)]
pub struct HotelBooking {
    pub customer_id: u64,
    pub customer_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    pub guests: Option<u32>,
    pub rooms: Option<u32>,
    pub hotel_id: u64,
    pub hotel_name: String,
    pub city: String,
    pub price_per_night: f64,
    pub rating: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct HotelUpsertRequest {
    pub hotel_name: String,
    pub city: String,
    pub price_per_night: f64,
    pub rating: Option<f64>,
    pub image_url: Option<String>,
    pub availability: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct HotelBookingUpdateRequest {
    pub customer_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    pub guests: Option<u32>,
    pub rooms: Option<u32>,
}
