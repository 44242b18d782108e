use serde::{Deserialize, Serialize};

/// A treatment category the answers should concentrate on, e.g. `Basti`.
///
/// Always non-blank: use [`TherapyFocus::parse`] to turn free text into an
/// optional focus.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TherapyFocus(String);

impl TherapyFocus {
    /// Trim the input; blank text means "no focus".
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TherapyFocus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
