use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;

/// Text shown in place of any detail when the database cannot be reached at startup.
pub const GENERIC_FAILURE_MESSAGE: &str = "Connection failed. Please try again later.";

#[derive(Debug, ThisError)]
pub enum RecordsError {
    #[error("Configuration error: {0}")]
    Config(Box<figment::Error>),

    #[error("Database error: {0}")]
    DatabaseError(#[from] SqlxError),

    #[error("{0}")]
    Validation(String),
}

impl From<figment::Error> for RecordsError {
    fn from(e: figment::Error) -> Self {
        RecordsError::Config(Box::new(e))
    }
}

impl RecordsError {
    /// Message used for inline error banners.
    ///
    /// Database errors expose the driver text after the given prefix; the
    /// page is the only error channel for form submissions.
    pub fn inline_message(&self, prefix: &str) -> String {
        match self {
            RecordsError::DatabaseError(e) => format!("{prefix}{e}"),
            other => format!("{prefix}{other}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_is_verbatim() {
        let err = RecordsError::Validation("Age must be between 16 and 100".into());
        assert_eq!(
            err.inline_message("Error adding student: "),
            "Error adding student: Age must be between 16 and 100"
        );
    }

    #[test]
    fn database_message_carries_driver_text() {
        let err = RecordsError::DatabaseError(SqlxError::PoolTimedOut);
        let msg = err.inline_message("Error fetching students: ");
        assert!(msg.starts_with("Error fetching students: "));
        assert!(msg.len() > "Error fetching students: ".len());
    }
}
