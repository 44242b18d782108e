use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::DomainError;

/// Identifies one chat session. Supplied by the front-end; each id owns an
/// isolated transcript and therapy focus.
///
/// Ids are taken verbatim: blank ids and ids with surrounding whitespace are
/// rejected rather than normalised, so `" abc"` can never alias `"abc"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id: String = id.into();
        if id.trim().is_empty() {
            return Err(DomainError::invalid_input("session id must not be empty"));
        }
        if id.trim() != id {
            return Err(DomainError::invalid_input(format!(
                "session id must not start or end with whitespace: {id:?}"
            )));
        }
        Ok(Self(id))
    }

    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_blank() {
        assert!(SessionId::new("   ").unwrap_err().is_invalid_input());
    }

    #[test]
    fn test_generated_ids_differ() {
        assert_ne!(SessionId::generate(), SessionId::generate());
    }

    #[test]
    fn test_rejects_padded() {
        for padded in [" abc", "abc ", " abc ", "\tabc", "abc\n"] {
            assert!(
                SessionId::new(padded).unwrap_err().is_invalid_input(),
                "{padded:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_keeps_inner_whitespace() {
        assert_eq!(SessionId::new("my session").unwrap().as_str(), "my session");
    }
}
