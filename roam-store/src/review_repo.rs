use chrono::NaiveDateTime;
use sqlx::MySqlPool;

use roam_core::customer::CustomerUpsert;
use roam_core::review::{clamp_rating, AdminReview, CreateReviewRequest, Review};

use crate::error::StoreResult;
use crate::upsert;

#[derive(Clone)]
pub struct ReviewRepo {
    pool: MySqlPool,
}

/// Identifiers resolved by one review write.
#[derive(Debug, Clone, Copy)]
pub struct CreatedReview {
    pub review_id: u64,
    pub customer_id: u64,
    pub package_id: u64,
}

#[derive(sqlx::FromRow)]
struct ReviewRow {
    review_id: u64,
    rating: i32,
    review_text: String,
    review_date: Option<NaiveDateTime>,
    customer_id: u64,
    customer_name: String,
    package_id: u64,
    package_name: String,
}

#[derive(sqlx::FromRow)]
struct AdminReviewRow {
    review_id: u64,
    rating: i32,
    review_text: String,
    review_date: Option<NaiveDateTime>,
    customer_id: u64,
    customer_name: String,
    email: String,
    package_id: u64,
    package_name: String,
}

impl ReviewRepo {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// A review submission carries the same customer/package surface as a
    /// booking, so it runs the same upserts in one transaction before the
    /// review row lands.
    pub async fn create(&self, req: &CreateReviewRequest) -> StoreResult<CreatedReview> {
        let mut tx = self.pool.begin().await?;

        let customer = CustomerUpsert::new(req.name.clone(), req.email.clone(), req.phone.clone());
        let customer_id = upsert::upsert_customer(&mut tx, &customer).await?;
        let package_id = upsert::upsert_package(&mut tx, &req.package_upsert()).await?;

        let rating = clamp_rating(req.rating);
        let result = sqlx::query(
            "INSERT INTO reviews (customer_id, package_id, rating, review_text) VALUES (?, ?, ?, ?)",
        )
        .bind(customer_id)
        .bind(package_id)
        .bind(rating)
        .bind(req.review_text.as_deref().unwrap_or(""))
        .execute(&mut *tx)
        .await?;
        let review_id = result.last_insert_id();

        tx.commit().await?;

        Ok(CreatedReview {
            review_id,
            customer_id,
            package_id,
        })
    }

    pub async fn list_for_package(&self, package_id: u64) -> StoreResult<Vec<Review>> {
        let rows = sqlx::query_as::<_, ReviewRow>(
            "SELECT r.review_id, r.rating, r.review_text, r.review_date, \
                    c.customer_id, c.name AS customer_name, \
                    p.package_id, p.package_name \
             FROM reviews r \
             JOIN customers c ON r.customer_id = c.customer_id \
             JOIN packages p ON r.package_id = p.package_id \
             WHERE p.package_id = ? \
             ORDER BY r.review_date DESC",
        )
        .bind(package_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .into_iter()
            .map(|r| Review {
                review_id: r.review_id,
                rating: r.rating,
                review_text: r.review_text,
                review_date: r.review_date,
                customer_id: r.customer_id,
                customer_name: r.customer_name,
                package_id: r.package_id,
                package_name: r.package_name,
            })
            .collect())
    }

    pub async fn admin_list(&self) -> StoreResult<Vec<AdminReview>> {
        let rows = sqlx::query_as::<_, AdminReviewRow>(
            "SELECT r.review_id, r.rating, r.review_text, r.review_date, \
                    c.customer_id, c.name AS customer_name, c.email, \
                    p.package_id, p.package_name \
             FROM reviews r \
             JOIN customers c ON r.customer_id = c.customer_id \
             JOIN packages p ON r.package_id = p.package_id \
             ORDER BY r.review_date DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .into_iter()
            .map(|r| AdminReview {
                review_id: r.review_id,
                rating: r.rating,
                review_text: r.review_text,
                review_date: r.review_date,
                customer_id: r.customer_id,
                customer_name: r.customer_name,
                email: r.email,
                package_id: r.package_id,
                package_name: r.package_name,
            })
            .collect())
    }

    pub async fn update(&self, id: u64, rating: Option<f64>, review_text: Option<&str>) -> StoreResult<()> {
        sqlx::query("UPDATE reviews SET rating = ?, review_text = ? WHERE review_id = ?")
            .bind(clamp_rating(rating))
            .bind(review_text.unwrap_or(""))
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn delete(&self, id: u64) -> StoreResult<()> {
        sqlx::query("DELETE FROM reviews WHERE review_id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
