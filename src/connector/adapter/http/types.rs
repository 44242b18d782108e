use serde::{Deserialize, Serialize};

/// Body of `POST /sessions/{id}/ask`
#[derive(Debug, Deserialize)]
pub struct AskRequest {
    /// The question to ask; may be empty
    #[serde(default)]
    pub question: String,

    /// Therapy type to focus on; replaces the session focus when non-blank
    pub focus: Option<String>,
}

/// Body of `PUT /sessions/{id}/focus`
#[derive(Debug, Deserialize)]
pub struct FocusRequest {
    /// New focus; empty clears it
    #[serde(default)]
    pub focus: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct TranscriptResponse {
    pub session_id: String,

    /// Whole conversation rendered as display text
    pub transcript: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct SessionCreated {
    pub session_id: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
}
