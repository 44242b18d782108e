pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

pub use application::{
    PromptBuilder, ResponseOrchestrator, SessionRegistry, TextGenerator,
    DEFAULT_SYSTEM_INSTRUCTION,
};

pub use cli::Commands;

pub use connector::{GeminiClient, MockTextGenerator};

pub use domain::{
    ChatMessage, DomainError, GenerationFailure, PromptRequest, Role, SessionId, TherapyFocus,
    Transcript, TranscriptFormat,
};
