pub mod customer;
pub mod deal;
pub mod flight;
pub mod hotel;
pub mod money;
pub mod package;
pub mod review;
pub mod serde_util;
pub mod ticket;
pub mod trip;
pub mod user;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
    #[error("Internal service error: {0}")]
    InternalError(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
