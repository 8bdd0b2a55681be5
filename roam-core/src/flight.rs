use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{CoreError, CoreResult};

pub const DEFAULT_PRICE: f64 = 5000.0;
pub const DEFAULT_DURATION: &str = "2h 30m";

#[derive(Debug, Clone, Serialize)]
pub struct Flight {
    pub flight_id: u64,
    pub airline: Option<String>,
    pub flight_number: Option<String>,
    pub source: String,
    pub destination: String,
    pub departure_time: Option<NaiveDateTime>,
    pub arrival_time: Option<NaiveDateTime>,
    pub status: Option<String>,
    pub price: Option<f64>,
}

/// The search pages still send legacy airport codes for the metro routes;
/// everything else is treated as a city name as-is.
pub fn city_for_code(code: &str) -> Option<&'static str> {
    match code.to_ascii_lowercase().as_str() {
        "del" => Some("Delhi"),
        "bom" => Some("Mumbai"),
        "maa" => Some("Chennai"),
        "blr" => Some("Bangalore"),
        "goi" => Some("Goa"),
        "ccu" => Some("Kolkata"),
        "pnq" => Some("Pune"),
        _ => None,
    }
}

pub fn resolve_city(input: &str) -> String {
    city_for_code(input)
        .map(str::to_string)
        .unwrap_or_else(|| input.to_string())
}

/// "2h 30m" from scheduled departure and arrival; non-positive spans
/// collapse to "0h 0m" instead of going negative.
pub fn format_duration(departure: NaiveDateTime, arrival: NaiveDateTime) -> String {
    let minutes = (arrival - departure).num_minutes().max(0);
    format!("{}h {}m", minutes / 60, minutes % 60)
}

/// The admin form posts a flight date plus HH:MM departure/arrival times;
/// the flights table stores full DATETIMEs.
#[derive(Debug, Deserialize)]
pub struct AddFlightRequest {
    pub flight_name: String,
    pub flight_no: String,
    pub source: String,
    pub destination: String,
    pub departure_time: String,
    pub arrival_time: String,
    pub economy_fare: f64,
    pub business_fare: Option<f64>,
    pub first_class_fare: Option<f64>,
    pub flight_date: Option<NaiveDate>,
}

impl AddFlightRequest {
    pub fn schedule(&self) -> CoreResult<(NaiveDateTime, NaiveDateTime)> {
        let date = self.flight_date.unwrap_or_else(|| Utc::now().date_naive());
        let departure = parse_clock(&self.departure_time)?;
        let arrival = parse_clock(&self.arrival_time)?;
        Ok((date.and_time(departure), date.and_time(arrival)))
    }
}

fn parse_clock(value: &str) -> CoreResult<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .map_err(|_| CoreError::ValidationError(format!("invalid time of day: {value}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn dt(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn metro_codes_resolve_case_insensitively() {
        assert_eq!(resolve_city("DEL"), "Delhi");
        assert_eq!(resolve_city("goi"), "Goa");
        assert_eq!(resolve_city("Jaipur"), "Jaipur");
    }

    #[test]
    fn duration_formats_hours_and_minutes() {
        assert_eq!(format_duration(dt(6, 0), dt(8, 30)), "2h 30m");
        assert_eq!(format_duration(dt(6, 0), dt(6, 5)), "0h 5m");
    }

    #[test]
    fn inverted_times_do_not_go_negative() {
        assert_eq!(format_duration(dt(9, 0), dt(7, 0)), "0h 0m");
    }

    #[test]
    fn admin_schedule_combines_date_and_clock() {
        let req = AddFlightRequest {
            flight_name: "IndiGo".into(),
            flight_no: "6E1".into(),
            source: "Delhi".into(),
            destination: "Goa".into(),
            departure_time: "06:15".into(),
            arrival_time: "08:45".into(),
            economy_fare: 4999.0,
            business_fare: None,
            first_class_fare: None,
            flight_date: NaiveDate::from_ymd_opt(2025, 3, 1),
        };
        let (dep, arr) = req.schedule().unwrap();
        assert_eq!(dep.to_string(), "2025-03-01 06:15:00");
        assert_eq!(arr.to_string(), "2025-03-01 08:45:00");
    }

    #[test]
    fn admin_schedule_rejects_bad_clock() {
        let req = AddFlightRequest {
            flight_name: "IndiGo".into(),
            flight_no: "6E1".into(),
            source: "Delhi".into(),
            destination: "Goa".into(),
            departure_time: "quarter past six".into(),
            arrival_time: "08:45".into(),
            economy_fare: 4999.0,
            business_fare: None,
            first_class_fare: None,
            flight_date: None,
        };
        assert!(req.schedule().is_err());
    }
}
