use chrono::{NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::package::PackageUpsert;
use crate::serde_util::date_like;

pub const DEFAULT_RATING: i32 = 5;

/// Clamp a submitted rating into [1, 5]; absent or non-numeric ratings take
/// the default.
pub fn clamp_rating(rating: Option<f64>) -> i32 {
    match rating {
        Some(r) if r.is_finite() => r.clamp(1.0, 5.0).round() as i32,
        _ => DEFAULT_RATING,
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateReviewRequest {
    // customer
    pub name: Option<String>,
    pub email: String,
    pub phone: Option<String>,
    // package (same upsert surface as a booking)
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
    // review
    pub rating: Option<f64>,
    pub review_text: Option<String>,
}

impl CreateReviewRequest {
    pub fn package_upsert(&self) -> PackageUpsert {
        PackageUpsert {
            package_name: self.package_name.clone(),
            description: self.description.clone(),
            origin: self.origin.clone(),
            destination: self.destination.clone(),
            flight_number: self.flight_number.clone().unwrap_or_default(),
            airline: self.airline.clone().unwrap_or_default(),
            flight_date: self.flight_date.unwrap_or_else(|| Utc::now().date_naive()),
            departure_time: self.departure_time.clone(),
            arrival_time: self.arrival_time.clone(),
            duration: self.duration.clone(),
            stay_details: self.stay_details.clone(),
            price: self.price.unwrap_or(0.0),
            image_url: self.image_url.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Review {
    pub review_id: u64,
    pub rating: i32,
    pub review_text: String,
    pub review_date: Option<NaiveDateTime>,
    pub customer_id: u64,
    pub customer_name: String,
    pub package_id: u64,
    pub package_name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdminReview {
    pub review_id: u64,
    pub rating: i32,
    pub review_text: String,
    pub review_date: Option<NaiveDateTime>,
    pub customer_id: u64,
    pub customer_name: String,
    pub email: String,
    pub package_id: u64,
    pub package_name: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateReviewRequest {
    pub rating: Option<f64>,
    pub review_text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overshoot_clamps_to_five() {
        assert_eq!(clamp_rating(Some(10.0)), 5);
    }

    #[test]
    fn undershoot_clamps_to_one() {
        assert_eq!(clamp_rating(Some(-3.0)), 1);
        assert_eq!(clamp_rating(Some(0.0)), 1);
    }

    #[test]
    fn absent_rating_defaults_to_five() {
        assert_eq!(clamp_rating(None), 5);
        assert_eq!(clamp_rating(Some(f64::NAN)), 5);
    }

    #[test]
    fn in_range_ratings_pass_through() {
        assert_eq!(clamp_rating(Some(3.0)), 3);
        assert_eq!(clamp_rating(Some(4.6)), 5);
    }
}
