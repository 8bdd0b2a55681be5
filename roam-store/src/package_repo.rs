use chrono::{NaiveDate, NaiveDateTime};
use sqlx::MySqlPool;

use roam_core::customer::CustomerUpsert;
use roam_core::money;
use roam_core::package::{
    AddPackageRequest, BookPackageRequest, HolidayPackage, PackageBookingDetails,
};

use crate::error::StoreResult;
use crate::schema::SchemaProfile;
use crate::upsert;

#[derive(Clone)]
pub struct PackageRepo {
    pool: MySqlPool,
}

/// Identifiers resolved by one booking write.
#[derive(Debug, Clone, Copy)]
pub struct BookedPackage {
    pub booking_id: u64,
    pub customer_id: u64,
    pub package_id: u64,
}

#[derive(sqlx::FromRow)]
struct PackageRow {
    package_id: u64,
    package_name: String,
    description: Option<String>,
    origin: Option<String>,
    destination: Option<String>,
    flight_number: String,
    airline: String,
    flight_date: NaiveDate,
    departure_time: Option<String>,
    arrival_time: Option<String>,
    duration: Option<String>,
    stay_details: Option<String>,
    price: f64,
    image_url: Option<String>,
}

impl From<PackageRow> for HolidayPackage {
    fn from(row: PackageRow) -> Self {
        HolidayPackage {
            package_id: row.package_id,
            package_name: row.package_name,
            description: row.description,
            origin: row.origin,
            destination: row.destination,
            flight_number: row.flight_number,
            airline: row.airline,
            flight_date: row.flight_date,
            departure_time: row.departure_time,
            arrival_time: row.arrival_time,
            duration: row.duration,
            stay_details: row.stay_details,
            price: row.price,
            image_url: row.image_url,
        }
    }
}

#[derive(sqlx::FromRow)]
struct BookingDetailRow {
    booking_id: u64,
    travel_date: NaiveDate,
    total_amount: f64,
    payment_mode: String,
    transaction_id: Option<String>,
    booking_time: Option<NaiveDateTime>,
    customer_id: u64,
    customer_name: String,
    email: String,
    phone: Option<String>,
    package_id: u64,
    package_name: String,
    description: Option<String>,
    origin: Option<String>,
    destination: Option<String>,
    flight_number: String,
    airline: String,
    flight_date: NaiveDate,
    departure_time: Option<String>,
    arrival_time: Option<String>,
    duration: Option<String>,
    stay_details: Option<String>,
    price: f64,
    image_url: Option<String>,
}

const PACKAGE_COLUMNS: &str = "package_id, package_name, description, origin, destination, \
     flight_number, airline, flight_date, departure_time, arrival_time, duration, \
     stay_details, price, image_url";

/// INSERT text for the bookings table, including only the payment columns
/// this environment actually has.
pub(crate) fn booking_insert_sql(profile: &SchemaProfile) -> String {
    let mut columns = vec!["customer_id", "package_id", "travel_date", "total_amount"];
    if profile.booking_payment_mode {
        columns.push("payment_mode");
    }
    if profile.booking_transaction_id {
        columns.push("transaction_id");
    }
    let placeholders = vec!["?"; columns.len()].join(", ");
    format!(
        "INSERT INTO bookings ({}) VALUES ({})",
        columns.join(", "),
        placeholders
    )
}

/// Joined detail SELECT, aliasing the payment columns to fixed defaults
/// where the table lacks them.
pub(crate) fn booking_detail_sql(profile: &SchemaProfile) -> String {
    let payment = if profile.booking_payment_mode {
        "b.payment_mode"
    } else {
        "'UPI' AS payment_mode"
    };
    let txn = if profile.booking_transaction_id {
        "b.transaction_id"
    } else {
        "NULL AS transaction_id"
    };
    let time = if profile.booking_time {
        "b.booking_time"
    } else {
        "NULL"
    };
    format!(
        "SELECT b.booking_id, b.travel_date, b.total_amount, {payment}, {txn}, \
                COALESCE({time}, b.booking_date) AS booking_time, \
                c.customer_id, c.name AS customer_name, c.email, c.phone, \
                p.package_id, p.package_name, p.description, p.origin, p.destination, \
                p.flight_number, p.airline, p.flight_date, p.departure_time, p.arrival_time, \
                p.duration, p.stay_details, p.price, p.image_url \
         FROM bookings b \
         JOIN customers c ON b.customer_id = c.customer_id \
         JOIN packages p ON b.package_id = p.package_id \
         WHERE b.booking_id = ?"
    )
}

impl PackageRepo {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// The booking writer: customer upsert, package upsert and the booking
    /// insert commit or roll back together.
    pub async fn book(
        &self,
        profile: &SchemaProfile,
        req: &BookPackageRequest,
    ) -> StoreResult<BookedPackage> {
        let mut tx = self.pool.begin().await?;

        let customer = CustomerUpsert::new(req.name.clone(), req.email.clone(), req.phone.clone());
        let customer_id = upsert::upsert_customer(&mut tx, &customer).await?;
        let package_id = upsert::upsert_package(&mut tx, &req.package_upsert()).await?;

        let sql = booking_insert_sql(profile);
        let mut query = sqlx::query(&sql)
            .bind(customer_id)
            .bind(package_id)
            .bind(req.booking_date())
            .bind(req.price.unwrap_or(0.0));
        if profile.booking_payment_mode {
            query = query.bind(req.payment_mode.clone().unwrap_or_else(|| "UPI".to_string()));
        }
        if profile.booking_transaction_id {
            query = query.bind(
                req.transaction_id
                    .clone()
                    .unwrap_or_else(money::synthesize_txn_id),
            );
        }
        let result = query.execute(&mut *tx).await?;
        let booking_id = result.last_insert_id();

        tx.commit().await?;

        Ok(BookedPackage {
            booking_id,
            customer_id,
            package_id,
        })
    }

    pub async fn booking_details(
        &self,
        profile: &SchemaProfile,
        booking_id: u64,
    ) -> StoreResult<Option<PackageBookingDetails>> {
        let sql = booking_detail_sql(profile);
        let row = sqlx::query_as::<_, BookingDetailRow>(&sql)
            .bind(booking_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|r| PackageBookingDetails {
            booking_id: r.booking_id,
            travel_date: r.travel_date,
            total_amount: r.total_amount,
            payment_mode: r.payment_mode,
            transaction_id: r.transaction_id,
            booking_time: r.booking_time,
            customer_id: r.customer_id,
            customer_name: r.customer_name,
            email: r.email,
            phone: r.phone,
            package_id: r.package_id,
            package_name: r.package_name,
            description: r.description,
            origin: r.origin,
            destination: r.destination,
            flight_number: r.flight_number,
            airline: r.airline,
            flight_date: r.flight_date,
            departure_time: r.departure_time,
            arrival_time: r.arrival_time,
            duration: r.duration,
            stay_details: r.stay_details,
            price: r.price,
            image_url: r.image_url,
        }))
    }

    pub async fn list(&self) -> StoreResult<Vec<HolidayPackage>> {
        let rows = sqlx::query_as::<_, PackageRow>(&format!(
            "SELECT {PACKAGE_COLUMNS} FROM packages ORDER BY package_id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(HolidayPackage::from).collect())
    }

    pub async fn add(&self, req: &AddPackageRequest) -> StoreResult<u64> {
        let stay_details = req
            .inclusions
            .clone()
            .unwrap_or_else(|| "Standard package inclusions".to_string());
        let result = sqlx::query(
            "INSERT INTO packages \
             (package_name, description, origin, destination, duration, stay_details, price, image_url) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&req.package_name)
        .bind(&req.description)
        .bind(&req.origin)
        .bind(&req.destination)
        .bind(&req.duration)
        .bind(stay_details)
        .bind(req.price)
        .bind(&req.image_url)
        .execute(&self.pool)
        .await
        .map_err(|err| crate::error::StoreError::from_write(err, "Package already exists"))?;
        Ok(result.last_insert_id())
    }

    /// Admin listing: every booking joined with its customer and package.
    pub async fn admin_bookings(
        &self,
        profile: &SchemaProfile,
    ) -> StoreResult<Vec<PackageBookingDetails>> {
        let sql = booking_detail_sql(profile).replace(
            "WHERE b.booking_id = ?",
            "ORDER BY b.booking_id DESC",
        );
        let rows = sqlx::query_as::<_, BookingDetailRow>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows
            .into_iter()
            .map(|r| PackageBookingDetails {
                booking_id: r.booking_id,
                travel_date: r.travel_date,
                total_amount: r.total_amount,
                payment_mode: r.payment_mode,
                transaction_id: r.transaction_id,
                booking_time: r.booking_time,
                customer_id: r.customer_id,
                customer_name: r.customer_name,
                email: r.email,
                phone: r.phone,
                package_id: r.package_id,
                package_name: r.package_name,
                description: r.description,
                origin: r.origin,
                destination: r.destination,
                flight_number: r.flight_number,
                airline: r.airline,
                flight_date: r.flight_date,
                departure_time: r.departure_time,
                arrival_time: r.arrival_time,
                duration: r.duration,
                stay_details: r.stay_details,
                price: r.price,
                image_url: r.image_url,
            })
            .collect())
    }

    pub async fn delete_booking(&self, id: u64) -> StoreResult<()> {
        sqlx::query("DELETE FROM bookings WHERE booking_id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_includes_only_detected_payment_columns() {
        let bare = SchemaProfile::default();
        assert_eq!(
            booking_insert_sql(&bare),
            "INSERT INTO bookings (customer_id, package_id, travel_date, total_amount) \
             VALUES (?, ?, ?, ?)"
        );

        let full = SchemaProfile {
            booking_payment_mode: true,
            booking_transaction_id: true,
            booking_time: true,
            deal_booking_age: false,
        };
        let sql = booking_insert_sql(&full);
        assert!(sql.contains("payment_mode, transaction_id"));
        assert_eq!(sql.matches('?').count(), 6);
    }

    #[test]
    fn detail_select_aliases_missing_columns() {
        let bare = SchemaProfile::default();
        let sql = booking_detail_sql(&bare);
        assert!(sql.contains("'UPI' AS payment_mode"));
        assert!(sql.contains("NULL AS transaction_id"));
        assert!(sql.contains("COALESCE(NULL, b.booking_date) AS booking_time"));

        let full = SchemaProfile {
            booking_payment_mode: true,
            booking_transaction_id: true,
            booking_time: true,
            deal_booking_age: false,
        };
        let sql = booking_detail_sql(&full);
        assert!(sql.contains("b.payment_mode"));
        assert!(sql.contains("COALESCE(b.booking_time, b.booking_date)"));
    }
}
