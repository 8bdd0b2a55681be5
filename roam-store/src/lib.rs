pub mod app_config;
pub mod database;
pub mod deal_repo;
pub mod error;
pub mod flight_repo;
pub mod hotel_repo;
pub mod package_repo;
pub mod reporting;
pub mod review_repo;
pub mod schema;
pub mod ticket_repo;
pub mod trip_repo;
mod upsert;
pub mod user_repo;

pub use database::SchemaPools;
pub use deal_repo::DealRepo;
pub use error::{StoreError, StoreResult};
pub use flight_repo::FlightRepo;
pub use hotel_repo::HotelRepo;
pub use package_repo::{BookedPackage, PackageRepo};
pub use reporting::ReportingRepo;
pub use review_repo::{CreatedReview, ReviewRepo};
pub use schema::SchemaProfile;
pub use ticket_repo::TicketRepo;
pub use trip_repo::TripRepo;
pub use user_repo::UserRepo;
