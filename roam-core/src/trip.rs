use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

pub const STATUS_CONFIRMED: &str = "confirmed";
pub const STATUS_CANCELLED: &str = "cancelled";

/// A legacy trip booking: a flight and/or hotel reference plus its
/// passenger rows. Append-only except the status flip on cancellation.
#[derive(Debug, Clone, Serialize)]
pub struct TripBooking {
    pub booking_id: u64,
    pub user_id: Option<u64>,
    pub flight_id: Option<u64>,
    pub hotel_id: Option<u64>,
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    pub total_amount: Option<f64>,
    pub status: String,
    pub booking_date: Option<NaiveDateTime>,
    pub flight_number: Option<String>,
    pub airline: Option<String>,
    pub source: Option<String>,
    pub destination: Option<String>,
    pub departure_time: Option<NaiveDateTime>,
    pub arrival_time: Option<NaiveDateTime>,
    pub hotel_name: Option<String>,
    pub hotel_city: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub passengers: Vec<Passenger>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Passenger {
    pub passenger_id: u64,
    pub booking_id: u64,
    pub name: String,
    pub age: Option<u32>,
    pub gender: Option<String>,
    pub seat_number: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateTripRequest {
    pub user_id: Option<u64>,
    pub flight_id: Option<u64>,
    pub hotel_id: Option<u64>,
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    pub total_amount: Option<f64>,
    #[serde(default)]
    pub passengers: Vec<PassengerInput>,
}

#[derive(Debug, Deserialize)]
pub struct PassengerInput {
    pub name: String,
    pub age: Option<u32>,
    pub gender: Option<String>,
    pub seat_number: Option<String>,
}
