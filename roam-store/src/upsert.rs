//! Natural-key upserts.
//!
//! Both entities carry a unique index on their natural key, so the insert
//! and the update collapse into one atomic statement. `LAST_INSERT_ID(id)`
//! makes the duplicate branch report the surviving row's id through
//! `last_insert_id()`, so callers get the resolved identifier either way
//! without a read-then-write race.

use sqlx::MySqlConnection;

use roam_core::customer::CustomerUpsert;
use roam_core::package::PackageUpsert;

pub(crate) const CUSTOMER_UPSERT_SQL: &str = "INSERT INTO customers (name, email, phone) \
     VALUES (?, ?, ?) \
     ON DUPLICATE KEY UPDATE \
     customer_id = LAST_INSERT_ID(customer_id), name = VALUES(name), phone = VALUES(phone)";

pub(crate) const PACKAGE_UPSERT_SQL: &str = "INSERT INTO packages \
     (package_name, description, origin, destination, flight_number, airline, flight_date, \
      departure_time, arrival_time, duration, stay_details, price, image_url) \
     VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) \
     ON DUPLICATE KEY UPDATE \
     package_id = LAST_INSERT_ID(package_id), description = VALUES(description), \
     origin = VALUES(origin), destination = VALUES(destination), \
     departure_time = VALUES(departure_time), arrival_time = VALUES(arrival_time), \
     duration = VALUES(duration), stay_details = VALUES(stay_details), \
     price = VALUES(price), image_url = VALUES(image_url)";

/// Resolve a customer id by email, updating name/phone on repeat visits.
pub(crate) async fn upsert_customer(
    conn: &mut MySqlConnection,
    customer: &CustomerUpsert,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(CUSTOMER_UPSERT_SQL)
        .bind(&customer.name)
        .bind(&customer.email)
        .bind(&customer.phone)
        .execute(conn)
        .await?;
    Ok(result.last_insert_id())
}

/// Resolve a package id by (name, flight_number, airline, flight_date),
/// refreshing the mutable columns.
pub(crate) async fn upsert_package(
    conn: &mut MySqlConnection,
    package: &PackageUpsert,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(PACKAGE_UPSERT_SQL)
        .bind(&package.package_name)
        .bind(&package.description)
        .bind(&package.origin)
        .bind(&package.destination)
        .bind(&package.flight_number)
        .bind(&package.airline)
        .bind(package.flight_date)
        .bind(&package.departure_time)
        .bind(&package.arrival_time)
        .bind(&package.duration)
        .bind(&package.stay_details)
        .bind(package.price)
        .bind(&package.image_url)
        .execute(conn)
        .await?;
    Ok(result.last_insert_id())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn customer_upsert_is_atomic_and_id_preserving() {
        assert!(CUSTOMER_UPSERT_SQL.contains("ON DUPLICATE KEY UPDATE"));
        assert!(CUSTOMER_UPSERT_SQL.contains("LAST_INSERT_ID(customer_id)"));
        // the natural key itself is never rewritten by the duplicate branch
        assert!(!CUSTOMER_UPSERT_SQL.contains("email = VALUES"));
    }

    #[test]
    fn package_upsert_refreshes_only_mutable_columns() {
        assert!(PACKAGE_UPSERT_SQL.contains("LAST_INSERT_ID(package_id)"));
        for key_part in ["package_name = VALUES", "flight_number = VALUES", "airline = VALUES", "flight_date = VALUES"] {
            assert!(!PACKAGE_UPSERT_SQL.contains(key_part), "{key_part} must stay immutable");
        }
        assert!(PACKAGE_UPSERT_SQL.contains("price = VALUES(price)"));
    }
}
