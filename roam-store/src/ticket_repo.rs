use chrono::{NaiveDate, NaiveDateTime};
use sqlx::MySqlPool;

use roam_core::money;
use roam_core::ticket::{BookSeatRequest, Ticket, UpdateTicketRequest};

use crate::error::{StoreError, StoreResult};

#[derive(Clone)]
pub struct TicketRepo {
    pool: MySqlPool,
}

#[derive(sqlx::FromRow)]
struct TicketRow {
    ticket_id: u64,
    pnr_no: String,
    flight_no: Option<String>,
    passenger_name: Option<String>,
    class_type: Option<String>,
    seat_no: Option<String>,
    date: Option<NaiveDate>,
    source: Option<String>,
    destination: Option<String>,
    departure_time: Option<String>,
    arrival_time: Option<String>,
    fare: Option<f64>,
    payment_mode: Option<String>,
    transaction_id: Option<String>,
    amount: Option<f64>,
    booking_time: Option<NaiveDateTime>,
}

impl From<TicketRow> for Ticket {
    fn from(row: TicketRow) -> Self {
        Ticket {
            ticket_id: row.ticket_id,
            pnr_no: row.pnr_no,
            flight_no: row.flight_no,
            passenger_name: row.passenger_name,
            class_type: row.class_type,
            seat_no: row.seat_no,
            date: row.date,
            source: row.source,
            destination: row.destination,
            departure_time: row.departure_time,
            arrival_time: row.arrival_time,
            fare: row.fare,
            payment_mode: row.payment_mode,
            transaction_id: row.transaction_id,
            amount: row.amount,
            booking_time: row.booking_time,
        }
    }
}

const TICKET_COLUMNS: &str = "ticket_id, pnr_no, flight_no, passenger_name, class_type, seat_no, \
     date, source, destination, departure_time, arrival_time, fare, payment_mode, \
     transaction_id, amount, booking_time";

const DUPLICATE_PNR: &str = "PNR already exists";

impl TicketRepo {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// One seat per row, keyed by PNR. The pre-check gives the friendly
    /// message; the unique index on pnr_no catches the race.
    pub async fn book_seat(&self, req: &BookSeatRequest) -> StoreResult<u64> {
        let existing: Option<u64> =
            sqlx::query_scalar("SELECT ticket_id FROM ticket WHERE pnr_no = ?")
                .bind(&req.pnr_no)
                .fetch_optional(&self.pool)
                .await?;
        if existing.is_some() {
            return Err(StoreError::Conflict(DUPLICATE_PNR.to_string()));
        }

        let result = sqlx::query(
            "INSERT INTO ticket \
             (pnr_no, flight_no, passenger_name, class_type, seat_no, date, source, destination, \
              departure_time, arrival_time, fare, payment_mode, transaction_id, amount) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&req.pnr_no)
        .bind(&req.flight_no)
        .bind(&req.passenger_name)
        .bind(&req.class_type)
        .bind(&req.seat_no)
        .bind(req.date)
        .bind(&req.source)
        .bind(&req.destination)
        .bind(&req.departure_time)
        .bind(&req.arrival_time)
        .bind(req.fare)
        .bind(req.payment_mode.as_deref().unwrap_or("UPI"))
        .bind(
            req.transaction_id
                .clone()
                .unwrap_or_else(money::synthesize_txn_id),
        )
        .bind(req.amount.or(req.fare))
        .execute(&self.pool)
        .await
        .map_err(|err| StoreError::from_write(err, DUPLICATE_PNR))?;

        Ok(result.last_insert_id())
    }

    pub async fn get(&self, pnr: &str) -> StoreResult<Option<Ticket>> {
        let row = sqlx::query_as::<_, TicketRow>(&format!(
            "SELECT {TICKET_COLUMNS} FROM ticket WHERE pnr_no = ?"
        ))
        .bind(pnr)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Ticket::from))
    }

    pub async fn admin_list(&self) -> StoreResult<Vec<Ticket>> {
        let rows = sqlx::query_as::<_, TicketRow>(&format!(
            "SELECT {TICKET_COLUMNS} FROM ticket ORDER BY booking_time DESC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Ticket::from).collect())
    }

    pub async fn update(&self, id: u64, req: &UpdateTicketRequest) -> StoreResult<()> {
        sqlx::query(
            "UPDATE ticket SET passenger_name = ?, flight_no = ?, seat_no = ?, class_type = ?, \
             source = ?, destination = ?, date = ?, departure_time = ?, arrival_time = ?, \
             fare = ?, payment_mode = ? WHERE ticket_id = ?",
        )
        .bind(&req.passenger_name)
        .bind(&req.flight_no)
        .bind(&req.seat_no)
        .bind(&req.class_type)
        .bind(&req.source)
        .bind(&req.destination)
        .bind(req.date)
        .bind(&req.departure_time)
        .bind(&req.arrival_time)
        .bind(req.fare)
        .bind(&req.payment_mode)
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn delete(&self, id: u64) -> StoreResult<()> {
        sqlx::query("DELETE FROM ticket WHERE ticket_id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
