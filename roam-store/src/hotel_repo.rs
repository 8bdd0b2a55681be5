use chrono::NaiveDate;
use sqlx::MySqlPool;

use roam_core::hotel::{
    BookHotelRequest, Hotel, HotelBooking, HotelBookingUpdateRequest, HotelUpsertRequest,
};

use crate::error::StoreResult;

#[derive(Clone)]
pub struct HotelRepo {
    pool: MySqlPool,
}

#[derive(sqlx::FromRow)]
struct HotelRow {
    hotel_id: u64,
    hotel_name: String,
    city: String,
    price_per_night: f64,
    rating: Option<f64>,
    image_url: Option<String>,
    availability: Option<String>,
}

impl From<HotelRow> for Hotel {
    fn from(row: HotelRow) -> Self {
        Hotel {
            hotel_id: row.hotel_id,
            hotel_name: row.hotel_name,
            city: row.city,
            price_per_night: row.price_per_night,
            rating: row.rating,
            image_url: row.image_url,
            availability: row.availability,
        }
    }
}

#[derive(sqlx::FromRow)]
struct HotelBookingRow {
    customer_id: u64,
    customer_name: String,
    email: String,
    phone: Option<String>,
    check_in: Option<NaiveDate>,
    check_out: Option<NaiveDate>,
    guests: Option<u32>,
    rooms: Option<u32>,
    hotel_id: u64,
    hotel_name: String,
    city: String,
    price_per_night: f64,
    rating: Option<f64>,
}

const HOTEL_COLUMNS: &str =
    "hotel_id, hotel_name, city, price_per_night, rating, image_url, availability";

impl HotelRepo {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub async fn search(&self, city: &str) -> StoreResult<Vec<Hotel>> {
        let rows = sqlx::query_as::<_, HotelRow>(&format!(
            "SELECT {HOTEL_COLUMNS} FROM hotels WHERE city LIKE ?"
        ))
        .bind(format!("%{city}%"))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Hotel::from).collect())
    }

    pub async fn get(&self, id: u64) -> StoreResult<Option<Hotel>> {
        let row = sqlx::query_as::<_, HotelRow>(&format!(
            "SELECT {HOTEL_COLUMNS} FROM hotels WHERE hotel_id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Hotel::from))
    }

    pub async fn list(&self) -> StoreResult<Vec<Hotel>> {
        let rows = sqlx::query_as::<_, HotelRow>(&format!(
            "SELECT {HOTEL_COLUMNS} FROM hotels ORDER BY hotel_id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Hotel::from).collect())
    }

    pub async fn book(&self, req: &BookHotelRequest) -> StoreResult<u64> {
        let result = sqlx::query(
            "INSERT INTO customers \
             (customer_name, email, phone, hotel_id, check_in, check_out, guests, rooms) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&req.customer_name)
        .bind(&req.email)
        .bind(&req.phone)
        .bind(req.hotel_id)
        .bind(req.check_in)
        .bind(req.check_out)
        .bind(req.guests)
        .bind(req.rooms)
        .execute(&self.pool)
        .await?;
        Ok(result.last_insert_id())
    }

    pub async fn bookings(&self) -> StoreResult<Vec<HotelBooking>> {
        let rows = sqlx::query_as::<_, HotelBookingRow>(
            "SELECT c.customer_id, c.customer_name, c.email, c.phone, \
                    c.check_in, c.check_out, c.guests, c.rooms, \
                    h.hotel_id, h.hotel_name, h.city, h.price_per_night, h.rating \
             FROM customers c \
             JOIN hotels h ON c.hotel_id = h.hotel_id \
             ORDER BY c.customer_id DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .into_iter()
            .map(|row| HotelBooking {
                customer_id: row.customer_id,
                customer_name: row.customer_name,
                email: row.email,
                phone: row.phone,
                check_in: row.check_in,
                check_out: row.check_out,
                guests: row.guests,
                rooms: row.rooms,
                hotel_id: row.hotel_id,
                hotel_name: row.hotel_name,
                city: row.city,
                price_per_night: row.price_per_night,
                rating: row.rating,
            })
            .collect())
    }

    pub async fn add(&self, req: &HotelUpsertRequest) -> StoreResult<u64> {
        let result = sqlx::query(
            "INSERT INTO hotels (hotel_name, city, price_per_night, rating, image_url, availability) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&req.hotel_name)
        .bind(&req.city)
        .bind(req.price_per_night)
        .bind(req.rating)
        .bind(&req.image_url)
        .bind(req.availability.as_deref().unwrap_or("Available"))
        .execute(&self.pool)
        .await?;
        Ok(result.last_insert_id())
    }

    pub async fn update(&self, id: u64, req: &HotelUpsertRequest) -> StoreResult<()> {
        sqlx::query(
            "UPDATE hotels SET hotel_name = ?, city = ?, price_per_night = ?, rating = ?, \
             image_url = ?, availability = ? WHERE hotel_id = ?",
        )
        .bind(&req.hotel_name)
        .bind(&req.city)
        .bind(req.price_per_night)
        .bind(req.rating)
        .bind(&req.image_url)
        .bind(&req.availability)
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn delete(&self, id: u64) -> StoreResult<()> {
        sqlx::query("DELETE FROM hotels WHERE hotel_id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn update_booking(&self, id: u64, req: &HotelBookingUpdateRequest) -> StoreResult<()> {
        sqlx::query(
            "UPDATE customers SET customer_name = ?, email = ?, phone = ?, check_in = ?, \
             check_out = ?, guests = ?, rooms = ? WHERE customer_id = ?",
        )
        .bind(&req.customer_name)
        .bind(&req.email)
        .bind(&req.phone)
        .bind(req.check_in)
        .bind(req.check_out)
        .bind(req.guests)
        .bind(req.rooms)
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn delete_booking(&self, id: u64) -> StoreResult<()> {
        sqlx::query("DELETE FROM customers WHERE customer_id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
