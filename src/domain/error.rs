use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl DomainError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Why a generation call did not produce usable text.
///
/// The `Display` text is a short, user-facing description of the cause. Raw
/// transport details are logged by the client that produced the failure and
/// never carried here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationFailure {
    #[error("the service rejected the API key")]
    Auth,

    #[error("the service could not be reached")]
    Network,

    #[error("the service returned a response without usable text")]
    Malformed,

    #[error("the service reported an error (HTTP {status})")]
    Service { status: u16 },

    #[error("the request timed out")]
    Timeout,
}

impl GenerationFailure {
    /// Short tag naming the cause, suitable for structured log fields.
    pub fn cause(&self) -> &'static str {
        match self {
            Self::Auth => "auth",
            Self::Network => "network",
            Self::Malformed => "malformed",
            Self::Service { .. } => "service",
            Self::Timeout => "timeout",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_display_carries_no_transport_detail() {
        let text = GenerationFailure::Service { status: 503 }.to_string();
        assert_eq!(text, "the service reported an error (HTTP 503)");
    }

    #[test]
    fn failure_cause_tags() {
        assert_eq!(GenerationFailure::Auth.cause(), "auth");
        assert_eq!(GenerationFailure::Network.cause(), "network");
        assert_eq!(GenerationFailure::Malformed.cause(), "malformed");
        assert_eq!(GenerationFailure::Service { status: 500 }.cause(), "service");
        assert_eq!(GenerationFailure::Timeout.cause(), "timeout");
    }

    #[test]
    fn domain_error_helpers() {
        assert!(DomainError::invalid_input("x").is_invalid_input());
        assert!(DomainError::not_found("x").is_not_found());
        assert!(!DomainError::configuration("x").is_not_found());
        assert_eq!(
            DomainError::configuration("no TLS backend").to_string(),
            "Configuration error: no TLS backend"
        );
    }
}
