use chrono::{NaiveDate, NaiveDateTime};
use sqlx::MySqlPool;

use roam_core::trip::{CreateTripRequest, Passenger, TripBooking, STATUS_CANCELLED, STATUS_CONFIRMED};

use crate::error::{StoreError, StoreResult};

/// Legacy trip bookings live in the flight_booking schema but reference
/// flights and hotels in their own schemas, so this repo carries all three
/// pools and enriches rows explicitly instead of relying on a cross-schema
/// join.
#[derive(Clone)]
pub struct TripRepo {
    bookings: MySqlPool,
    flights: MySqlPool,
    hotels: MySqlPool,
}

#[derive(sqlx::FromRow)]
struct TripRow {
    booking_id: u64,
    user_id: Option<u64>,
    flight_id: Option<u64>,
    hotel_id: Option<u64>,
    check_in: Option<NaiveDate>,
    check_out: Option<NaiveDate>,
    total_amount: Option<f64>,
    status: String,
    booking_date: Option<NaiveDateTime>,
}

#[derive(sqlx::FromRow)]
struct PassengerRow {
    passenger_id: u64,
    booking_id: u64,
    name: String,
    age: Option<u32>,
    gender: Option<String>,
    seat_number: Option<String>,
}

#[derive(sqlx::FromRow)]
struct FlightSummaryRow {
    flight_number: Option<String>,
    airline: Option<String>,
    source: String,
    destination: String,
    departure_time: Option<NaiveDateTime>,
    arrival_time: Option<NaiveDateTime>,
}

#[derive(sqlx::FromRow)]
struct HotelSummaryRow {
    hotel_name: String,
    city: String,
}

const TRIP_COLUMNS: &str =
    "booking_id, user_id, flight_id, hotel_id, check_in, check_out, total_amount, status, booking_date";

impl TripRepo {
    pub fn new(bookings: MySqlPool, flights: MySqlPool, hotels: MySqlPool) -> Self {
        Self {
            bookings,
            flights,
            hotels,
        }
    }

    /// Booking row plus its passenger rows commit together.
    pub async fn create(&self, req: &CreateTripRequest) -> StoreResult<u64> {
        let mut tx = self.bookings.begin().await?;

        let result = sqlx::query(
            "INSERT INTO bookings (user_id, flight_id, hotel_id, check_in, check_out, total_amount, status) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(req.user_id)
        .bind(req.flight_id)
        .bind(req.hotel_id)
        .bind(req.check_in)
        .bind(req.check_out)
        .bind(req.total_amount)
        .bind(STATUS_CONFIRMED)
        .execute(&mut *tx)
        .await?;
        let booking_id = result.last_insert_id();

        if req.flight_id.is_some() {
            for passenger in &req.passengers {
                sqlx::query(
                    "INSERT INTO booking_passengers (booking_id, name, age, gender, seat_number) \
                     VALUES (?, ?, ?, ?, ?)",
                )
                .bind(booking_id)
                .bind(&passenger.name)
                .bind(passenger.age)
                .bind(&passenger.gender)
                .bind(&passenger.seat_number)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;
        Ok(booking_id)
    }

    pub async fn get(&self, id: u64) -> StoreResult<Option<TripBooking>> {
        let row = sqlx::query_as::<_, TripRow>(&format!(
            "SELECT {TRIP_COLUMNS} FROM bookings WHERE booking_id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.bookings)
        .await?;

        match row {
            Some(row) => {
                let passengers = if row.flight_id.is_some() {
                    self.passengers(row.booking_id).await?
                } else {
                    Vec::new()
                };
                Ok(Some(self.enrich(row, passengers).await?))
            }
            None => Ok(None),
        }
    }

    pub async fn for_user(&self, user_id: u64) -> StoreResult<Vec<TripBooking>> {
        let rows = sqlx::query_as::<_, TripRow>(&format!(
            "SELECT {TRIP_COLUMNS} FROM bookings WHERE user_id = ? ORDER BY booking_date DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.bookings)
        .await?;

        let mut trips = Vec::with_capacity(rows.len());
        for row in rows {
            trips.push(self.enrich(row, Vec::new()).await?);
        }
        Ok(trips)
    }

    /// Cancellation locks the row, rejects a second cancel, and flips the
    /// status.
    pub async fn cancel(&self, id: u64) -> StoreResult<()> {
        let mut tx = self.bookings.begin().await?;

        let status: Option<String> =
            sqlx::query_scalar("SELECT status FROM bookings WHERE booking_id = ? FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;

        let status = status.ok_or(StoreError::NotFound("booking"))?;
        if status == STATUS_CANCELLED {
            return Err(StoreError::Conflict(
                "Booking is already cancelled".to_string(),
            ));
        }

        sqlx::query("UPDATE bookings SET status = ? WHERE booking_id = ?")
            .bind(STATUS_CANCELLED)
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Seats already taken on a flight, across every non-cancelled booking.
    pub async fn booked_seats(&self, flight_id: u64) -> StoreResult<Vec<String>> {
        let seats: Vec<Option<String>> = sqlx::query_scalar(
            "SELECT bp.seat_number \
             FROM booking_passengers bp \
             JOIN bookings b ON bp.booking_id = b.booking_id \
             WHERE b.flight_id = ? AND b.status != ?",
        )
        .bind(flight_id)
        .bind(STATUS_CANCELLED)
        .fetch_all(&self.bookings)
        .await?;
        Ok(seats.into_iter().flatten().collect())
    }

    async fn passengers(&self, booking_id: u64) -> StoreResult<Vec<Passenger>> {
        let rows = sqlx::query_as::<_, PassengerRow>(
            "SELECT passenger_id, booking_id, name, age, gender, seat_number \
             FROM booking_passengers WHERE booking_id = ?",
        )
        .bind(booking_id)
        .fetch_all(&self.bookings)
        .await?;
        Ok(rows
            .into_iter()
            .map(|r| Passenger {
                passenger_id: r.passenger_id,
                booking_id: r.booking_id,
                name: r.name,
                age: r.age,
                gender: r.gender,
                seat_number: r.seat_number,
            })
            .collect())
    }

    async fn enrich(&self, row: TripRow, passengers: Vec<Passenger>) -> StoreResult<TripBooking> {
        let flight = match row.flight_id {
            Some(flight_id) => {
                sqlx::query_as::<_, FlightSummaryRow>(
                    "SELECT flight_number, airline, source, destination, departure_time, arrival_time \
                     FROM flights WHERE flight_id = ?",
                )
                .bind(flight_id)
                .fetch_optional(&self.flights)
                .await?
            }
            None => None,
        };
        let hotel = match row.hotel_id {
            Some(hotel_id) => {
                sqlx::query_as::<_, HotelSummaryRow>(
                    "SELECT hotel_name, city FROM hotels WHERE hotel_id = ?",
                )
                .bind(hotel_id)
                .fetch_optional(&self.hotels)
                .await?
            }
            None => None,
        };

        Ok(TripBooking {
            booking_id: row.booking_id,
            user_id: row.user_id,
            flight_id: row.flight_id,
            hotel_id: row.hotel_id,
            check_in: row.check_in,
            check_out: row.check_out,
            total_amount: row.total_amount,
            status: row.status,
            booking_date: row.booking_date,
            flight_number: flight.as_ref().and_then(|f| f.flight_number.clone()),
            airline: flight.as_ref().and_then(|f| f.airline.clone()),
            source: flight.as_ref().map(|f| f.source.clone()),
            destination: flight.as_ref().map(|f| f.destination.clone()),
            departure_time: flight.as_ref().and_then(|f| f.departure_time),
            arrival_time: flight.as_ref().and_then(|f| f.arrival_time),
            hotel_name: hotel.as_ref().map(|h| h.hotel_name.clone()),
            hotel_city: hotel.map(|h| h.city),
            passengers,
        })
    }
}
