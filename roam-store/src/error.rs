#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("{0}")]
    Conflict(String),
    #[error("schema mismatch on {table}: missing columns {missing:?}")]
    SchemaMismatch { table: String, missing: Vec<String> },
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl StoreError {
    /// MySQL duplicate-key violations surface as conflicts so the route
    /// layer can answer 400 instead of 500.
    pub fn from_write(err: sqlx::Error, conflict_message: &str) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return StoreError::Conflict(conflict_message.to_string());
            }
        }
        StoreError::Database(err)
    }
}
