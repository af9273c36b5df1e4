use thiserror::Error;

/// Top-level error type for assignment and submission operations.
#[derive(Debug, Error)]
pub enum PdAssignError {
    // --- Storage errors ---
    #[error("PostgreSQL error: {0}")]
    Postgres(String),

    // --- Caller errors ---
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// A lifecycle transition that the current status does not allow.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    // --- Operational errors ---
    #[error("{0}")]
    Internal(String),
}

impl PdAssignError {
    /// Whether the error was caused by the request rather than the system.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::NotFound(_) | Self::InvalidState(_)
        )
    }
}

/// Result type alias for assignment system operations.
pub type Result<T> = std::result::Result<T, PdAssignError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_classification() {
        assert!(PdAssignError::NotFound("Submission x".into()).is_client_error());
        assert!(PdAssignError::InvalidState("submitted".into()).is_client_error());
        assert!(PdAssignError::Validation("too many answers".into()).is_client_error());
        assert!(!PdAssignError::Postgres("down".into()).is_client_error());
        assert!(!PdAssignError::Internal("boom".into()).is_client_error());
    }
}
