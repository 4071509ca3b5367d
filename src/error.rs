use argon2::password_hash::Error as PasswordHashError;
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum TripError {
    #[error("Database error: {0}")]
    Database(#[from] SqlxError),

    #[error("Password hashing error: {0}")]
    PasswordHash(#[from] PasswordHashError),

    /// Salt/hash pair missing or unreadable; a caller bug, never a failed login.
    #[error("Invalid credential state: {0}")]
    InvalidCredentialState(&'static str),

    #[error("Invalid {field}: {reason}")]
    InvalidField {
        field: &'static str,
        reason: &'static str,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] Box<figment::Error>),
}

impl TripError {
    /// True when the error comes from a database constraint (unique, foreign key, not null).
    pub fn is_constraint_violation(&self) -> bool {
        match self {
            TripError::Database(SqlxError::Database(db_err)) => matches!(
                db_err.kind(),
                sqlx::error::ErrorKind::UniqueViolation
                    | sqlx::error::ErrorKind::ForeignKeyViolation
                    | sqlx::error::ErrorKind::NotNullViolation
                    | sqlx::error::ErrorKind::CheckViolation
            ),
            _ => false,
        }
    }
}

impl From<figment::Error> for TripError {
    fn from(e: figment::Error) -> Self {
        TripError::Config(Box::new(e))
    }
}
