//! Error types for sentence-aware text chunking

/// Error types for chunking operations
#[derive(thiserror::Error, Debug)]
pub enum ChunkingError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Regex compilation error: {0}")]
    Regex(#[from] regex::Error),
}

/// Result type for chunking operations
pub type Result<T> = std::result::Result<T, ChunkingError>;

impl ChunkingError {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        Self::Configuration(msg.into())
    }

    /// Check if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            // a corrected config can be retried
            Self::Configuration(_) => true,
            Self::Regex(_) => false,
        }
    }

    /// Get error category for logging/monitoring
    pub fn category(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "configuration",
            Self::Regex(_) => "regex",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let error = ChunkingError::configuration("chunk_size must be greater than 0");
        assert!(matches!(error, ChunkingError::Configuration(_)));
        assert_eq!(
            error.to_string(),
            "Configuration error: chunk_size must be greater than 0"
        );
    }

    #[test]
    fn test_error_categories() {
        assert_eq!(
            ChunkingError::configuration("test").category(),
            "configuration"
        );

        #[allow(clippy::invalid_regex)]
        let regex_error: ChunkingError = regex::Regex::new("[").unwrap_err().into();
        assert_eq!(regex_error.category(), "regex");
        assert!(!regex_error.is_recoverable());
    }

    #[test]
    fn test_error_recoverability() {
        assert!(ChunkingError::configuration("test").is_recoverable());
    }
}
