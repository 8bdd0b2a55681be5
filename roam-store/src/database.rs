use sqlx::mysql::MySqlPoolOptions;
use sqlx::MySqlPool;
use std::time::Duration;
use tracing::{info, warn};

use crate::app_config::DatabaseConfig;

const MAX_CONNECTIONS: u32 = 10;
const RETRY_DELAY: Duration = Duration::from_secs(2);

/// One pool per schema. Routing a request to a store means picking a pool,
/// never mutating session state on a shared connection.
#[derive(Clone)]
pub struct SchemaPools {
    pub users: MySqlPool,
    pub flights: MySqlPool,
    pub hotels: MySqlPool,
    pub packages: MySqlPool,
    pub deals: MySqlPool,
    pub bookings: MySqlPool,
}

impl SchemaPools {
    /// Connects every schema pool, retrying until the server is reachable.
    /// A down database at boot is transient; schema mismatches are checked
    /// separately and fail fast.
    pub async fn connect(cfg: &DatabaseConfig) -> Self {
        Self {
            users: connect_schema(&cfg.url, &cfg.schemas.users).await,
            flights: connect_schema(&cfg.url, &cfg.schemas.flights).await,
            hotels: connect_schema(&cfg.url, &cfg.schemas.hotels).await,
            packages: connect_schema(&cfg.url, &cfg.schemas.packages).await,
            deals: connect_schema(&cfg.url, &cfg.schemas.deals).await,
            bookings: connect_schema(&cfg.url, &cfg.schemas.bookings).await,
        }
    }

    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        info!("Running database migrations...");
        sqlx::migrate!("migrations/users").run(&self.users).await?;
        sqlx::migrate!("migrations/flights").run(&self.flights).await?;
        sqlx::migrate!("migrations/hotels").run(&self.hotels).await?;
        sqlx::migrate!("migrations/packages").run(&self.packages).await?;
        sqlx::migrate!("migrations/deals").run(&self.deals).await?;
        sqlx::migrate!("migrations/bookings").run(&self.bookings).await?;
        info!("Migrations completed successfully.");
        Ok(())
    }
}

pub fn schema_url(base: &str, schema: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), schema)
}

/// Connect a single schema's pool, retrying every 2 seconds.
pub async fn connect_schema(base: &str, schema: &str) -> MySqlPool {
    let url = schema_url(base, schema);
    loop {
        match MySqlPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&url)
            .await
        {
            Ok(pool) => {
                info!(schema, "database connected");
                return pool;
            }
            Err(err) => {
                warn!(schema, error = %err, "database connection failed, retrying in 2s");
                tokio::time::sleep(RETRY_DELAY).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::schema_url;

    #[test]
    fn schema_url_joins_without_double_slash() {
        assert_eq!(
            schema_url("mysql://root:pw@localhost:3306", "package"),
            "mysql://root:pw@localhost:3306/package"
        );
        assert_eq!(
            schema_url("mysql://root:pw@localhost:3306/", "deals"),
            "mysql://root:pw@localhost:3306/deals"
        );
    }
}
