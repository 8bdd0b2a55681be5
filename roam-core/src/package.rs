use chrono::{NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::serde_util::date_like;

#[derive(Debug, Clone, Serialize)]
pub struct HolidayPackage {
    pub package_id: u64,
    pub package_name: String,
    pub description: Option<String>,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub flight_number: String,
    pub airline: String,
    pub flight_date: NaiveDate,
    pub departure_time: Option<String>,
    pub arrival_time: Option<String>,
    pub duration: Option<String>,
    pub stay_details: Option<String>,
    pub price: f64,
    pub image_url: Option<String>,
}

/// Normalized upsert payload. The natural key is
/// (package_name, flight_number, airline, flight_date); missing key parts
/// collapse to empty strings and a fallback date so the unique index can do
/// its job.
#[derive(Debug, Clone)]
pub struct PackageUpsert {
    pub package_name: String,
    pub description: Option<String>,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub flight_number: String,
    pub airline: String,
    pub flight_date: NaiveDate,
    pub departure_time: Option<String>,
    pub arrival_time: Option<String>,
    pub duration: Option<String>,
    pub stay_details: Option<String>,
    pub price: f64,
    pub image_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BookPackageRequest {
    // customer
    pub name: Option<String>,
    pub email: String,
    pub phone: Option<String>,
    // package details
    pub package_name: String,
    pub description: Option<String>,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub flight_number: Option<String>,
    pub airline: Option<String>,
    #[serde(default, deserialize_with = "date_like::deserialize")]
    pub flight_date: Option<NaiveDate>,
    pub departure_time: Option<String>,
    pub arrival_time: Option<String>,
    pub duration: Option<String>,
    pub stay_details: Option<String>,
    pub price: Option<f64>,
    pub image_url: Option<String>,
    // booking / payment
    #[serde(default, deserialize_with = "date_like::deserialize")]
    pub travel_date: Option<NaiveDate>,
    pub payment_mode: Option<String>,
    pub transaction_id: Option<String>,
}

impl BookPackageRequest {
    /// The date written to the booking row: explicit travel date, else the
    /// flight date, else today.
    pub fn booking_date(&self) -> NaiveDate {
        self.travel_date
            .or(self.flight_date)
            .unwrap_or_else(|| Utc::now().date_naive())
    }

    pub fn package_upsert(&self) -> PackageUpsert {
        PackageUpsert {
            package_name: self.package_name.clone(),
            description: self.description.clone(),
            origin: self.origin.clone(),
            destination: self.destination.clone(),
            flight_number: self.flight_number.clone().unwrap_or_default(),
            airline: self.airline.clone().unwrap_or_default(),
            flight_date: self.flight_date.unwrap_or_else(|| self.booking_date()),
            departure_time: self.departure_time.clone(),
            arrival_time: self.arrival_time.clone(),
            duration: self.duration.clone(),
            stay_details: self.stay_details.clone(),
            price: self.price.unwrap_or(0.0),
            image_url: self.image_url.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AddPackageRequest {
    pub package_name: String,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub duration: Option<String>,
    pub price: f64,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub inclusions: Option<String>,
}

/// One package booking joined with its customer and package, as returned by
/// the detail endpoint and fed to the receipt renderer.
#[derive(Debug, Clone, Serialize)]
pub struct PackageBookingDetails {
    pub booking_id: u64,
    pub travel_date: NaiveDate,
    pub total_amount: f64,
    pub payment_mode: String,
    pub transaction_id: Option<String>,
    pub booking_time: Option<NaiveDateTime>,
    pub customer_id: u64,
    pub customer_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub package_id: u64,
    pub package_name: String,
    pub description: Option<String>,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub flight_number: String,
    pub airline: String,
    pub flight_date: NaiveDate,
    pub departure_time: Option<String>,
    pub arrival_time: Option<String>,
    pub duration: Option<String>,
    pub stay_details: Option<String>,
    pub price: f64,
    pub image_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(flight_date: Option<&str>, travel_date: Option<&str>) -> BookPackageRequest {
        BookPackageRequest {
            name: Some("Asha".into()),
            email: "a@x.com".into(),
            phone: None,
            package_name: "Goa Trip".into(),
            description: None,
            origin: Some("Delhi".into()),
            destination: Some("Goa".into()),
            flight_number: Some("6E1".into()),
            airline: Some("IndiGo".into()),
            flight_date: flight_date.and_then(date_like::parse),
            departure_time: None,
            arrival_time: None,
            duration: None,
            stay_details: None,
            price: Some(9999.0),
            image_url: None,
            travel_date: travel_date.and_then(date_like::parse),
            payment_mode: None,
            transaction_id: None,
        }
    }

    #[test]
    fn booking_date_prefers_travel_then_flight_date() {
        let req = request(Some("2025-01-01"), Some("2025-02-02"));
        assert_eq!(req.booking_date().to_string(), "2025-02-02");

        let req = request(Some("2025-01-01"), None);
        assert_eq!(req.booking_date().to_string(), "2025-01-01");
    }

    #[test]
    fn upsert_normalizes_missing_key_parts() {
        let mut req = request(Some("2025-01-01"), None);
        req.flight_number = None;
        req.airline = None;
        let upsert = req.package_upsert();
        assert_eq!(upsert.flight_number, "");
        assert_eq!(upsert.airline, "");
        assert_eq!(upsert.flight_date.to_string(), "2025-01-01");
    }
}
