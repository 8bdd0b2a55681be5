use chrono::{NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::serde_util::date_like;

/// An immutable last-minute flight offer. Bookings live in their own table
/// and reference an offer by id; the two never share a row.
#[derive(Debug, Clone, Serialize)]
pub struct Deal {
    pub deal_id: u64,
    pub airline: String,
    pub flight_number: Option<String>,
    pub origin: String,
    pub destination: String,
    pub flight_date: Option<NaiveDate>,
    pub departure_time: Option<String>,
    pub arrival_time: Option<String>,
    pub duration: Option<String>,
    pub base_price: f64,
    pub discount_name: String,
    pub discount_percent: f64,
    /// Derived price after discount, echoed for the listing pages.
    pub total_amount: f64,
}

#[derive(Debug, Deserialize)]
pub struct BookDealRequest {
    /// When present, the reservation attaches to an existing offer;
    /// otherwise the flight fields below describe a new one.
    pub deal_id: Option<u64>,
    pub customer_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub id_type: Option<String>,
    pub government_id: Option<String>,
    pub age: Option<u32>,
    pub airline: Option<String>,
    pub flight_number: Option<String>,
    pub origin: Option<String>,
    pub destination: Option<String>,
    #[serde(default, deserialize_with = "date_like::deserialize")]
    pub flight_date: Option<NaiveDate>,
    pub departure_time: Option<String>,
    pub arrival_time: Option<String>,
    pub duration: Option<String>,
    pub base_price: Option<f64>,
    pub discount_name: Option<String>,
    pub discount_percent: Option<f64>,
    #[serde(default, deserialize_with = "date_like::deserialize")]
    pub travel_date: Option<NaiveDate>,
    pub total_amount: Option<f64>,
    pub payment_method: Option<String>,
}

impl BookDealRequest {
    pub fn travel_date_or_today(&self) -> NaiveDate {
        self.travel_date
            .or(self.flight_date)
            .unwrap_or_else(|| Utc::now().date_naive())
    }
}

#[derive(Debug, Deserialize)]
pub struct AddDealRequest {
    pub discount_name: String,
    pub origin: String,
    pub destination: String,
    pub original_price: f64,
    pub discount_percent: f64,
    pub travel_date: Option<NaiveDate>,
    pub duration: Option<String>,
}

/// Price after the percentage discount, as offers are created from the
/// admin form.
pub fn discounted_total(base_price: f64, discount_percent: f64) -> f64 {
    base_price - (base_price * discount_percent / 100.0)
}

/// A reservation joined with the offer it references, flattened the way the
/// receipt and the admin listing consume it.
#[derive(Debug, Clone, Serialize)]
pub struct DealBookingDetails {
    pub booking_id: u64,
    pub deal_id: u64,
    pub customer_name: String,
    pub email: String,
    pub phone: String,
    pub id_type: String,
    pub government_id: String,
    pub age: Option<u32>,
    pub travel_date: NaiveDate,
    pub total_amount: f64,
    pub payment_method: String,
    pub payment_status: String,
    pub booking_date: Option<NaiveDateTime>,
    pub airline: String,
    pub flight_number: Option<String>,
    pub origin: String,
    pub destination: String,
    pub flight_date: Option<NaiveDate>,
    pub departure_time: Option<String>,
    pub arrival_time: Option<String>,
    pub duration: Option<String>,
    pub base_price: f64,
    pub discount_name: String,
    pub discount_percent: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discount_math() {
        assert_eq!(discounted_total(10000.0, 25.0), 7500.0);
        assert_eq!(discounted_total(9999.0, 0.0), 9999.0);
    }
}
