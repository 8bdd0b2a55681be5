use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::serde_util::date_like;

/// A legacy PNR-keyed flight ticket, one row per seat.
#[derive(Debug, Clone, Serialize)]
pub struct Ticket {
    pub ticket_id: u64,
    pub pnr_no: String,
    pub flight_no: Option<String>,
    pub passenger_name: Option<String>,
    pub class_type: Option<String>,
    pub seat_no: Option<String>,
    pub date: Option<NaiveDate>,
    pub source: Option<String>,
    pub destination: Option<String>,
    pub departure_time: Option<String>,
    pub arrival_time: Option<String>,
    pub fare: Option<f64>,
    pub payment_mode: Option<String>,
    pub transaction_id: Option<String>,
    pub amount: Option<f64>,
    pub booking_time: Option<NaiveDateTime>,
}

#[derive(Debug, Deserialize)]
pub struct BookSeatRequest {
    pub pnr_no: String,
    pub flight_no: Option<String>,
    pub passenger_name: Option<String>,
    pub class_type: Option<String>,
    pub seat_no: Option<String>,
    #[serde(default, deserialize_with = "date_like::deserialize")]
    pub date: Option<NaiveDate>,
    pub source: Option<String>,
    pub destination: Option<String>,
    pub departure_time: Option<String>,
    pub arrival_time: Option<String>,
    pub fare: Option<f64>,
    pub payment_mode: Option<String>,
    pub transaction_id: Option<String>,
    pub amount: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTicketRequest {
    pub passenger_name: Option<String>,
    pub flight_no: Option<String>,
    pub seat_no: Option<String>,
    pub class_type: Option<String>,
    pub source: Option<String>,
    pub destination: Option<String>,
    #[serde(default, deserialize_with = "date_like::deserialize")]
    pub date: Option<NaiveDate>,
    pub departure_time: Option<String>,
    pub arrival_time: Option<String>,
    pub fare: Option<f64>,
    pub payment_mode: Option<String>,
}
