//! Startup schema verification.
//!
//! The schemas grew up by hand across environments, so two column sets
//! diverged historically: the payment columns on `package.bookings` and the
//! `age` column on `deals.deal_bookings`. Those are probed once here and
//! recorded in a [`SchemaProfile`]; every other column is required and a
//! mismatch aborts startup rather than failing one request at a time.

use std::collections::HashSet;

use sqlx::MySqlPool;

use crate::database::SchemaPools;
use crate::error::{StoreError, StoreResult};

/// Lower-cased column names of a table in the pool's own schema.
pub async fn table_columns(pool: &MySqlPool, table: &str) -> Result<HashSet<String>, sqlx::Error> {
    let names: Vec<String> = sqlx::query_scalar(
        "SELECT COLUMN_NAME FROM information_schema.COLUMNS \
         WHERE TABLE_SCHEMA = DATABASE() AND TABLE_NAME = ?",
    )
    .bind(table)
    .fetch_all(pool)
    .await?;
    Ok(names.into_iter().map(|c| c.to_lowercase()).collect())
}

/// Which optional columns this environment actually has.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaProfile {
    pub booking_payment_mode: bool,
    pub booking_transaction_id: bool,
    pub booking_time: bool,
    pub deal_booking_age: bool,
}

const USERS_REQUIRED: &[&str] = &["id", "name", "email", "number"];
const FLIGHTS_REQUIRED: &[&str] = &[
    "flight_id",
    "airline",
    "flight_number",
    "source",
    "destination",
    "departure_time",
    "arrival_time",
    "status",
    "price",
];
const HOTELS_REQUIRED: &[&str] = &[
    "hotel_id",
    "hotel_name",
    "city",
    "price_per_night",
    "rating",
    "image_url",
    "availability",
];
const HOTEL_CUSTOMERS_REQUIRED: &[&str] = &[
    "customer_id",
    "customer_name",
    "email",
    "phone",
    "hotel_id",
    "check_in",
    "check_out",
    "guests",
    "rooms",
];
const CUSTOMERS_REQUIRED: &[&str] = &["customer_id", "name", "email", "phone"];
const PACKAGES_REQUIRED: &[&str] = &[
    "package_id",
    "package_name",
    "flight_number",
    "airline",
    "flight_date",
    "price",
];
const BOOKINGS_REQUIRED: &[&str] = &[
    "booking_id",
    "customer_id",
    "package_id",
    "travel_date",
    "total_amount",
    "booking_date",
];
const REVIEWS_REQUIRED: &[&str] = &[
    "review_id",
    "customer_id",
    "package_id",
    "rating",
    "review_text",
    "review_date",
];
const DEALS_REQUIRED: &[&str] = &[
    "deal_id",
    "airline",
    "origin",
    "destination",
    "base_price",
    "discount_name",
    "discount_percent",
];
const DEAL_BOOKINGS_REQUIRED: &[&str] = &[
    "booking_id",
    "deal_id",
    "customer_name",
    "email",
    "phone",
    "id_type",
    "government_id",
    "travel_date",
    "total_amount",
    "payment_method",
    "payment_status",
    "booking_date",
];
const TICKET_REQUIRED: &[&str] = &[
    "ticket_id",
    "pnr_no",
    "flight_no",
    "passenger_name",
    "class_type",
    "seat_no",
    "date",
    "source",
    "destination",
    "fare",
    "amount",
    "booking_time",
];
const TRIP_BOOKINGS_REQUIRED: &[&str] = &[
    "booking_id",
    "user_id",
    "flight_id",
    "hotel_id",
    "check_in",
    "check_out",
    "total_amount",
    "status",
    "booking_date",
];
const TRIP_PASSENGERS_REQUIRED: &[&str] = &[
    "passenger_id",
    "booking_id",
    "name",
    "age",
    "gender",
    "seat_number",
];

impl SchemaProfile {
    /// Verify required columns on every table and probe the optional ones.
    pub async fn verify(pools: &SchemaPools) -> StoreResult<Self> {
        require(&pools.users, "users", USERS_REQUIRED).await?;
        require(&pools.flights, "flights", FLIGHTS_REQUIRED).await?;
        require(&pools.hotels, "hotels", HOTELS_REQUIRED).await?;
        require(&pools.hotels, "customers", HOTEL_CUSTOMERS_REQUIRED).await?;
        require(&pools.packages, "customers", CUSTOMERS_REQUIRED).await?;
        require(&pools.packages, "packages", PACKAGES_REQUIRED).await?;
        let booking_cols = require(&pools.packages, "bookings", BOOKINGS_REQUIRED).await?;
        require(&pools.packages, "reviews", REVIEWS_REQUIRED).await?;
        require(&pools.deals, "deals", DEALS_REQUIRED).await?;
        let deal_booking_cols =
            require(&pools.deals, "deal_bookings", DEAL_BOOKINGS_REQUIRED).await?;
        require(&pools.bookings, "ticket", TICKET_REQUIRED).await?;
        require(&pools.bookings, "bookings", TRIP_BOOKINGS_REQUIRED).await?;
        require(&pools.bookings, "booking_passengers", TRIP_PASSENGERS_REQUIRED).await?;

        Ok(Self {
            booking_payment_mode: booking_cols.contains("payment_mode"),
            booking_transaction_id: booking_cols.contains("transaction_id"),
            booking_time: booking_cols.contains("booking_time"),
            deal_booking_age: deal_booking_cols.contains("age"),
        })
    }
}

async fn require(
    pool: &MySqlPool,
    table: &str,
    required: &[&str],
) -> StoreResult<HashSet<String>> {
    let present = table_columns(pool, table).await?;
    let missing: Vec<String> = required
        .iter()
        .filter(|col| !present.contains(**col))
        .map(|col| col.to_string())
        .collect();
    if missing.is_empty() {
        Ok(present)
    } else {
        Err(StoreError::SchemaMismatch {
            table: table.to_string(),
            missing,
        })
    }
}
