use thiserror::Error;

use crate::models::InvalidOutcome;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("Not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// A stored row failed validation on its way into a typed entity.
    #[error("Corrupt record: {0}")]
    Corrupt(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        match &e {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            sqlx::Error::Database(db) if db.code().as_deref() == Some("23505") => {
                StoreError::ConstraintViolation(
                    db.constraint().unwrap_or("unique").to_string(),
                )
            }
            // Referenced player or fixture is gone
            sqlx::Error::Database(db) if db.code().as_deref() == Some("23503") => {
                StoreError::NotFound
            }
            _ => StoreError::Database(e),
        }
    }
}

impl From<InvalidOutcome> for StoreError {
    fn from(e: InvalidOutcome) -> Self {
        StoreError::Corrupt(e.to_string())
    }
}

impl StoreError {
    pub fn is_constraint_violation(&self) -> bool {
        matches!(self, StoreError::ConstraintViolation(_))
    }
}
