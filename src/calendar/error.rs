use thiserror::Error;

/// Reasons an event draft is rejected before reaching the store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Title cannot be empty")]
    EmptyTitle,
    #[error("End date cannot be before start date")]
    EndBeforeStart,
    #[error("End time must be after start time on a same-day event")]
    EndTimeNotAfterStart,
    #[error("Invalid {0} date (expected YYYY-MM-DD)")]
    MalformedDate(&'static str),
    #[error("Invalid {0} time (expected HH:MM)")]
    MalformedTime(&'static str),
    #[error("Unknown color: {0}")]
    InvalidColor(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        assert_eq!(ValidationError::EmptyTitle.to_string(), "Title cannot be empty");
        assert_eq!(
            ValidationError::MalformedDate("start").to_string(),
            "Invalid start date (expected YYYY-MM-DD)"
        );
        assert_eq!(
            ValidationError::InvalidColor("mauve-ish".to_string()).to_string(),
            "Unknown color: mauve-ish"
        );
    }
}
