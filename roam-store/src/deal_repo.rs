use chrono::{NaiveDate, NaiveDateTime};
use sqlx::{MySqlConnection, MySqlPool};

use roam_core::deal::{
    discounted_total, AddDealRequest, BookDealRequest, Deal, DealBookingDetails,
};

use crate::error::{StoreError, StoreResult};
use crate::schema::SchemaProfile;

#[derive(Clone)]
pub struct DealRepo {
    pool: MySqlPool,
}

#[derive(sqlx::FromRow)]
struct DealRow {
    deal_id: u64,
    airline: String,
    flight_number: Option<String>,
    origin: String,
    destination: String,
    flight_date: Option<NaiveDate>,
    departure_time: Option<String>,
    arrival_time: Option<String>,
    duration: Option<String>,
    base_price: f64,
    discount_name: String,
    discount_percent: f64,
}

impl From<DealRow> for Deal {
    fn from(row: DealRow) -> Self {
        let total_amount = discounted_total(row.base_price, row.discount_percent);
        Deal {
            deal_id: row.deal_id,
            airline: row.airline,
            flight_number: row.flight_number,
            origin: row.origin,
            destination: row.destination,
            flight_date: row.flight_date,
            departure_time: row.departure_time,
            arrival_time: row.arrival_time,
            duration: row.duration,
            base_price: row.base_price,
            discount_name: row.discount_name,
            discount_percent: row.discount_percent,
            total_amount,
        }
    }
}

#[derive(sqlx::FromRow)]
struct DealBookingDetailRow {
    booking_id: u64,
    deal_id: u64,
    customer_name: String,
    email: String,
    phone: String,
    id_type: String,
    government_id: String,
    age: Option<u32>,
    travel_date: NaiveDate,
    total_amount: f64,
    payment_method: String,
    payment_status: String,
    booking_date: Option<NaiveDateTime>,
    airline: String,
    flight_number: Option<String>,
    origin: String,
    destination: String,
    flight_date: Option<NaiveDate>,
    departure_time: Option<String>,
    arrival_time: Option<String>,
    duration: Option<String>,
    base_price: f64,
    discount_name: String,
    discount_percent: f64,
}

const DEAL_COLUMNS: &str = "deal_id, airline, flight_number, origin, destination, flight_date, \
     departure_time, arrival_time, duration, base_price, discount_name, discount_percent";

/// The reservation INSERT, with the `age` column only where the table has
/// grown it.
pub(crate) fn deal_booking_insert_sql(profile: &SchemaProfile) -> String {
    let mut columns = vec![
        "deal_id",
        "customer_name",
        "email",
        "phone",
        "id_type",
        "government_id",
    ];
    if profile.deal_booking_age {
        columns.push("age");
    }
    columns.extend([
        "travel_date",
        "total_amount",
        "payment_method",
        "payment_status",
    ]);
    let placeholders = vec!["?"; columns.len()].join(", ");
    format!(
        "INSERT INTO deal_bookings ({}) VALUES ({})",
        columns.join(", "),
        placeholders
    )
}

fn detail_select(filter: &str) -> String {
    format!(
        "SELECT b.booking_id, b.deal_id, b.customer_name, b.email, b.phone, b.id_type, \
                b.government_id, b.age, b.travel_date, b.total_amount, b.payment_method, \
                b.payment_status, b.booking_date, \
                d.airline, d.flight_number, d.origin, d.destination, d.flight_date, \
                d.departure_time, d.arrival_time, d.duration, d.base_price, \
                d.discount_name, d.discount_percent \
         FROM deal_bookings b \
         JOIN deals d ON b.deal_id = d.deal_id \
         {filter}"
    )
}

impl DealRepo {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub async fn list_offers(&self) -> StoreResult<Vec<Deal>> {
        let rows = sqlx::query_as::<_, DealRow>(&format!(
            "SELECT {DEAL_COLUMNS} FROM deals ORDER BY deal_id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Deal::from).collect())
    }

    /// Admin insert of a new offer.
    pub async fn add_offer(&self, req: &AddDealRequest) -> StoreResult<u64> {
        let result = sqlx::query(
            "INSERT INTO deals \
             (airline, origin, destination, flight_date, duration, base_price, discount_name, discount_percent) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind("")
        .bind(&req.origin)
        .bind(&req.destination)
        .bind(req.travel_date)
        .bind(&req.duration)
        .bind(req.original_price)
        .bind(&req.discount_name)
        .bind(req.discount_percent)
        .execute(&self.pool)
        .await?;
        Ok(result.last_insert_id())
    }

    /// Book a deal: attach to the referenced offer, or create the offer the
    /// request describes inline, then write the reservation. One
    /// transaction either way.
    pub async fn book(
        &self,
        profile: &SchemaProfile,
        req: &BookDealRequest,
    ) -> StoreResult<(u64, u64)> {
        let mut tx = self.pool.begin().await?;

        let deal_id = match req.deal_id {
            Some(id) => {
                let exists: Option<u64> =
                    sqlx::query_scalar("SELECT deal_id FROM deals WHERE deal_id = ?")
                        .bind(id)
                        .fetch_optional(&mut *tx)
                        .await?;
                exists.ok_or(StoreError::NotFound("deal"))?
            }
            None => insert_offer_from_request(&mut tx, req).await?,
        };

        let base_price = req.base_price.unwrap_or(0.0);
        let discount_percent = req.discount_percent.unwrap_or(0.0);
        let total = req
            .total_amount
            .unwrap_or_else(|| discounted_total(base_price, discount_percent));

        let sql = deal_booking_insert_sql(profile);
        let mut query = sqlx::query(&sql)
            .bind(deal_id)
            .bind(req.customer_name.as_deref().unwrap_or(""))
            .bind(req.email.as_deref().unwrap_or(""))
            .bind(req.phone.as_deref().unwrap_or(""))
            .bind(req.id_type.as_deref().unwrap_or("Aadhaar"))
            .bind(req.government_id.as_deref().unwrap_or(""));
        if profile.deal_booking_age {
            query = query.bind(req.age);
        }
        let result = query
            .bind(req.travel_date_or_today())
            .bind(total)
            .bind(req.payment_method.as_deref().unwrap_or("UPI"))
            .bind("Completed")
            .execute(&mut *tx)
            .await?;
        let booking_id = result.last_insert_id();

        tx.commit().await?;

        Ok((booking_id, deal_id))
    }

    pub async fn booking_details(&self, id: u64) -> StoreResult<Option<DealBookingDetails>> {
        let sql = detail_select("WHERE b.booking_id = ?");
        let row = sqlx::query_as::<_, DealBookingDetailRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(DealBookingDetails::from))
    }

    pub async fn admin_bookings(&self) -> StoreResult<Vec<DealBookingDetails>> {
        let sql = detail_select("ORDER BY b.booking_date DESC");
        let rows = sqlx::query_as::<_, DealBookingDetailRow>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(DealBookingDetails::from).collect())
    }

    pub async fn delete_offer(&self, id: u64) -> StoreResult<()> {
        sqlx::query("DELETE FROM deals WHERE deal_id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

async fn insert_offer_from_request(
    conn: &mut MySqlConnection,
    req: &BookDealRequest,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO deals \
         (airline, flight_number, origin, destination, flight_date, departure_time, \
          arrival_time, duration, base_price, discount_name, discount_percent) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(req.airline.as_deref().unwrap_or(""))
    .bind(&req.flight_number)
    .bind(req.origin.as_deref().unwrap_or(""))
    .bind(req.destination.as_deref().unwrap_or(""))
    .bind(req.flight_date)
    .bind(&req.departure_time)
    .bind(&req.arrival_time)
    .bind(&req.duration)
    .bind(req.base_price.unwrap_or(0.0))
    .bind(req.discount_name.as_deref().unwrap_or("None"))
    .bind(req.discount_percent.unwrap_or(0.0))
    .execute(conn)
    .await?;
    Ok(result.last_insert_id())
}

impl From<DealBookingDetailRow> for DealBookingDetails {
    fn from(r: DealBookingDetailRow) -> Self {
        DealBookingDetails {
            booking_id: r.booking_id,
            deal_id: r.deal_id,
            customer_name: r.customer_name,
            email: r.email,
            phone: r.phone,
            id_type: r.id_type,
            government_id: r.government_id,
            age: r.age,
            travel_date: r.travel_date,
            total_amount: r.total_amount,
            payment_method: r.payment_method,
            payment_status: r.payment_status,
            booking_date: r.booking_date,
            airline: r.airline,
            flight_number: r.flight_number,
            origin: r.origin,
            destination: r.destination,
            flight_date: r.flight_date,
            departure_time: r.departure_time,
            arrival_time: r.arrival_time,
            duration: r.duration,
            base_price: r.base_price,
            discount_name: r.discount_name,
            discount_percent: r.discount_percent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn age_column_is_conditional() {
        let without = deal_booking_insert_sql(&SchemaProfile::default());
        assert!(!without.contains("age"));
        assert_eq!(without.matches('?').count(), 10);

        let with = deal_booking_insert_sql(&SchemaProfile {
            deal_booking_age: true,
            ..SchemaProfile::default()
        });
        assert!(with.contains(", age,"));
        assert_eq!(with.matches('?').count(), 11);
    }
}
