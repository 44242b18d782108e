use serde::{Deserialize, Serialize};

use super::ChatMessage;

/// How a transcript is turned into display text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranscriptFormat {
    /// `You: question`
    #[default]
    Text,
    /// `**You:** question`
    Markdown,
}

impl TranscriptFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            TranscriptFormat::Text => "text",
            TranscriptFormat::Markdown => "markdown",
        }
    }
}

impl std::fmt::Display for TranscriptFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TranscriptFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "plain" => Ok(TranscriptFormat::Text),
            "markdown" | "md" => Ok(TranscriptFormat::Markdown),
            other => Err(format!(
                "unknown transcript format '{other}' (expected text or markdown)"
            )),
        }
    }
}

/// Chronological log of every chat entry in one session.
///
/// Entries are only ever appended or cleared as a whole. Alternation between
/// user and assistant is conventional, not enforced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    /// Render every entry, oldest first, separated by blank lines.
    pub fn render(&self, format: TranscriptFormat) -> String {
        self.messages
            .iter()
            .map(|m| match format {
                TranscriptFormat::Text => m.display_line(),
                TranscriptFormat::Markdown => {
                    format!("**{}:** {}", m.role().label(), m.content())
                }
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
