//! Cross-schema aggregates for the admin dashboard. Each number comes from
//! the pool that owns it; nothing here writes.

use serde::Serialize;

use crate::database::SchemaPools;
use crate::error::StoreResult;

#[derive(Clone)]
pub struct ReportingRepo {
    pools: SchemaPools,
}

#[derive(Debug, Clone, Serialize)]
pub struct Stats {
    #[serde(rename = "totalTickets")]
    pub total_tickets: i64,
    #[serde(rename = "totalHotels")]
    pub total_hotels: i64,
    #[serde(rename = "totalPackages")]
    pub total_packages: i64,
    #[serde(rename = "avgRating")]
    pub avg_rating: f64,
    #[serde(rename = "totalDeals")]
    pub total_deals: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Revenue {
    pub flights: f64,
    pub hotels: f64,
    pub packages: f64,
    pub deals: f64,
    pub total: f64,
    pub costs: f64,
    pub profit: f64,
    #[serde(rename = "profitMargin")]
    pub profit_margin: f64,
}

impl Revenue {
    /// Operating costs are modelled as a flat 30% of gross.
    pub fn from_totals(flights: f64, hotels: f64, packages: f64, deals: f64) -> Self {
        let total = flights + hotels + packages + deals;
        Revenue {
            flights,
            hotels,
            packages,
            deals,
            total,
            costs: total * 0.30,
            profit: total * 0.70,
            profit_margin: 70.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct RouteCount {
    pub source: String,
    pub destination: String,
    pub booking_count: i64,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct PackageCount {
    pub package_name: String,
    pub destination: Option<String>,
    pub booking_count: i64,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct DealCount {
    pub discount_name: String,
    pub destination: String,
    pub booking_count: i64,
}

/// Total ticket revenue and count, used for the revenue-per-booking trend.
#[derive(Debug, Clone, Copy, sqlx::FromRow)]
pub struct TicketTotals {
    pub revenue: f64,
    pub total_bookings: i64,
}

impl ReportingRepo {
    pub fn new(pools: SchemaPools) -> Self {
        Self { pools }
    }

    pub async fn stats(&self) -> StoreResult<Stats> {
        let total_tickets: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM ticket")
            .fetch_one(&self.pools.bookings)
            .await?;
        let total_hotels: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customers")
            .fetch_one(&self.pools.hotels)
            .await?;
        let total_packages: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bookings")
            .fetch_one(&self.pools.packages)
            .await?;
        let avg_rating: f64 =
            sqlx::query_scalar("SELECT CAST(COALESCE(AVG(rating), 0) AS DOUBLE) FROM reviews")
                .fetch_one(&self.pools.packages)
                .await?;
        let total_deals: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM deal_bookings")
            .fetch_one(&self.pools.deals)
            .await?;

        Ok(Stats {
            total_tickets,
            total_hotels,
            total_packages,
            avg_rating: (avg_rating * 10.0).round() / 10.0,
            total_deals,
        })
    }

    pub async fn revenue(&self) -> StoreResult<Revenue> {
        let flights: f64 =
            sqlx::query_scalar("SELECT CAST(COALESCE(SUM(amount), 0) AS DOUBLE) FROM ticket")
                .fetch_one(&self.pools.bookings)
                .await?;
        let hotels: f64 = sqlx::query_scalar(
            "SELECT CAST(COALESCE(SUM(h.price_per_night * DATEDIFF(c.check_out, c.check_in) * c.rooms), 0) AS DOUBLE) \
             FROM customers c \
             JOIN hotels h ON c.hotel_id = h.hotel_id",
        )
        .fetch_one(&self.pools.hotels)
        .await?;
        let packages: f64 = sqlx::query_scalar(
            "SELECT CAST(COALESCE(SUM(p.price), 0) AS DOUBLE) \
             FROM bookings b \
             JOIN packages p ON b.package_id = p.package_id",
        )
        .fetch_one(&self.pools.packages)
        .await?;
        let deals: f64 = sqlx::query_scalar(
            "SELECT CAST(COALESCE(SUM(total_amount), 0) AS DOUBLE) FROM deal_bookings",
        )
        .fetch_one(&self.pools.deals)
        .await?;

        Ok(Revenue::from_totals(flights, hotels, packages, deals))
    }

    pub async fn routes_by_popularity(&self, ascending: bool, limit: u32) -> StoreResult<Vec<RouteCount>> {
        let order = if ascending { "ASC" } else { "DESC" };
        let rows = sqlx::query_as::<_, RouteCount>(&format!(
            "SELECT source, destination, COUNT(*) AS booking_count \
             FROM ticket \
             GROUP BY source, destination \
             ORDER BY booking_count {order} \
             LIMIT {limit}"
        ))
        .fetch_all(&self.pools.bookings)
        .await?;
        Ok(rows)
    }

    pub async fn top_packages(&self, limit: u32) -> StoreResult<Vec<PackageCount>> {
        let rows = sqlx::query_as::<_, PackageCount>(&format!(
            "SELECT p.package_name, p.destination, COUNT(b.booking_id) AS booking_count \
             FROM packages p \
             LEFT JOIN bookings b ON p.package_id = b.package_id \
             GROUP BY p.package_id, p.package_name, p.destination \
             ORDER BY booking_count DESC \
             LIMIT {limit}"
        ))
        .fetch_all(&self.pools.packages)
        .await?;
        Ok(rows)
    }

    pub async fn top_deals(&self, limit: u32) -> StoreResult<Vec<DealCount>> {
        let rows = sqlx::query_as::<_, DealCount>(&format!(
            "SELECT d.discount_name, d.destination, COUNT(b.booking_id) AS booking_count \
             FROM deals d \
             LEFT JOIN deal_bookings b ON b.deal_id = d.deal_id \
             GROUP BY d.deal_id, d.discount_name, d.destination \
             ORDER BY booking_count DESC, d.discount_name ASC \
             LIMIT {limit}"
        ))
        .fetch_all(&self.pools.deals)
        .await?;
        Ok(rows)
    }

    pub async fn ticket_totals(&self) -> StoreResult<TicketTotals> {
        let totals = sqlx::query_as::<_, TicketTotals>(
            "SELECT CAST(COALESCE(SUM(amount), 0) AS DOUBLE) AS revenue, \
                    COUNT(*) AS total_bookings \
             FROM ticket",
        )
        .fetch_one(&self.pools.bookings)
        .await?;
        Ok(totals)
    }
}

#[cfg(test)]
mod tests {
    use super::Revenue;

    #[test]
    fn revenue_split_is_seventy_thirty() {
        let revenue = Revenue::from_totals(1000.0, 500.0, 300.0, 200.0);
        assert_eq!(revenue.total, 2000.0);
        assert_eq!(revenue.costs, 600.0);
        assert_eq!(revenue.profit, 1400.0);
        assert_eq!(revenue.profit_margin, 70.0);
    }
}
