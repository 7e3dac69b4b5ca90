use thiserror::Error;

/// Booking failures, in the order the checks run
#[derive(Debug, Error)]
pub enum BookingError {
    #[error("missing required fields: {0}")]
    MissingFields(String),
    #[error("invalid input: {0}")]
    Validation(String),
    #[error("start date must be before end date")]
    InvalidDateRange,
    #[error("car {0} not found")]
    CarNotFound(i32),
    #[error("car {0} is not available")]
    CarUnavailable(i32),
    #[error("repository error: {0}")]
    Repository(String),
}

impl BookingError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            BookingError::MissingFields(_) => 2001,
            BookingError::Validation(_) => 2002,
            BookingError::InvalidDateRange => 2003,
            BookingError::CarNotFound(_) => 2004,
            BookingError::CarUnavailable(_) => 2005,
            BookingError::Repository(_) => 2200,
        }
    }
}

impl From<models::errors::ModelError> for BookingError {
    fn from(e: models::errors::ModelError) -> Self {
        match e {
            models::errors::ModelError::Validation(msg) => BookingError::Validation(msg),
            other => BookingError::Repository(other.to_string()),
        }
    }
}

impl From<sea_orm::DbErr> for BookingError {
    fn from(e: sea_orm::DbErr) -> Self { BookingError::Repository(e.to_string()) }
}
