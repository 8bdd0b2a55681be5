use chrono::{NaiveDate, NaiveDateTime};
use sqlx::MySqlPool;
use tracing::debug;

use roam_core::flight::{AddFlightRequest, Flight};

use crate::error::StoreResult;

#[derive(Clone)]
pub struct FlightRepo {
    pool: MySqlPool,
}

#[derive(sqlx::FromRow)]
struct FlightRow {
    flight_id: u64,
    airline: Option<String>,
    flight_number: Option<String>,
    source: String,
    destination: String,
    departure_time: Option<NaiveDateTime>,
    arrival_time: Option<NaiveDateTime>,
    status: Option<String>,
    price: Option<f64>,
}

impl From<FlightRow> for Flight {
    fn from(row: FlightRow) -> Self {
        Flight {
            flight_id: row.flight_id,
            airline: row.airline,
            flight_number: row.flight_number,
            source: row.source,
            destination: row.destination,
            departure_time: row.departure_time,
            arrival_time: row.arrival_time,
            status: row.status,
            price: row.price,
        }
    }
}

const FLIGHT_COLUMNS: &str = "flight_id, airline, flight_number, source, destination, \
     departure_time, arrival_time, status, price";

impl FlightRepo {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// City match is deliberately loose (LIKE plus exact) because the data
    /// mixes "Goa" and "Goa (GOI)" spellings.
    pub async fn search(
        &self,
        from_city: &str,
        to_city: &str,
        date: NaiveDate,
    ) -> StoreResult<Vec<Flight>> {
        let rows = sqlx::query_as::<_, FlightRow>(&format!(
            "SELECT {FLIGHT_COLUMNS} FROM flights \
             WHERE (source LIKE ? OR source = ?) \
             AND (destination LIKE ? OR destination = ?) \
             AND DATE(departure_time) = ?"
        ))
        .bind(format!("%{from_city}%"))
        .bind(from_city)
        .bind(format!("%{to_city}%"))
        .bind(to_city)
        .bind(date)
        .fetch_all(&self.pool)
        .await?;

        if rows.is_empty() {
            let sample: Vec<(String, String)> =
                sqlx::query_as("SELECT source, destination FROM flights LIMIT 5")
                    .fetch_all(&self.pool)
                    .await
                    .unwrap_or_default();
            debug!(?sample, from_city, to_city, %date, "no flights matched");
        }

        Ok(rows.into_iter().map(Flight::from).collect())
    }

    pub async fn get(&self, id: u64) -> StoreResult<Option<Flight>> {
        let row = sqlx::query_as::<_, FlightRow>(&format!(
            "SELECT {FLIGHT_COLUMNS} FROM flights WHERE flight_id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Flight::from))
    }

    /// Admin insert. The form's economy fare becomes the base price and the
    /// date/time fields are combined into full DATETIMEs by the caller.
    pub async fn add(
        &self,
        req: &AddFlightRequest,
        departure: NaiveDateTime,
        arrival: NaiveDateTime,
    ) -> StoreResult<u64> {
        let result = sqlx::query(
            "INSERT INTO flights \
             (airline, flight_number, source, destination, departure_time, arrival_time, status, price) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&req.flight_name)
        .bind(&req.flight_no)
        .bind(&req.source)
        .bind(&req.destination)
        .bind(departure)
        .bind(arrival)
        .bind("Active")
        .bind(req.economy_fare)
        .execute(&self.pool)
        .await?;
        Ok(result.last_insert_id())
    }
}
