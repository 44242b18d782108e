use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::application::{PromptBuilder, TextGenerator};
use crate::domain::{
    ChatMessage, GenerationFailure, TherapyFocus, Transcript, TranscriptFormat,
};

/// Runs one chat session: builds prompts, calls the generator, records every
/// exchange and renders the conversation for the front-end.
///
/// `ask` is total. Generation failures become an assistant message that names
/// the cause, so each question always gets exactly one reply in the
/// transcript.
pub struct ResponseOrchestrator {
    generator: Arc<dyn TextGenerator>,
    prompt_builder: PromptBuilder,
    transcript: Transcript,
    focus: Option<TherapyFocus>,
    format: TranscriptFormat,
}

impl ResponseOrchestrator {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            generator,
            prompt_builder: PromptBuilder::new(),
            transcript: Transcript::new(),
            focus: None,
            format: TranscriptFormat::default(),
        }
    }

    pub fn with_prompt_builder(mut self, prompt_builder: PromptBuilder) -> Self {
        self.prompt_builder = prompt_builder;
        self
    }

    pub fn with_format(mut self, format: TranscriptFormat) -> Self {
        self.format = format;
        self
    }

    /// Ask a question and return the whole conversation so far.
    ///
    /// A non-blank `focus` replaces the session focus before the prompt is
    /// built; `None` or blank text keeps the current one.
    pub async fn ask(&mut self, question: &str, focus: Option<&str>) -> String {
        if let Some(f) = focus.and_then(TherapyFocus::parse) {
            self.focus = Some(f);
        }

        let prompt = self.prompt_builder.build(question, self.focus.as_ref());
        debug!(
            "Prompt built ({} chars, focus={})",
            prompt.len(),
            self.focus.as_ref().map(TherapyFocus::as_str).unwrap_or("none")
        );

        let start_time = Instant::now();
        let reply = match self.generator.generate(&prompt).await {
            Ok(text) => match text.trim() {
                "" => Self::failure_message(&GenerationFailure::Malformed),
                trimmed => trimmed.to_string(),
            },
            Err(failure) => {
                warn!(
                    "Generation with {} failed (cause={}): {}",
                    self.generator.model_name(),
                    failure.cause(),
                    failure
                );
                Self::failure_message(&failure)
            }
        };
        info!(
            "Answered in {:.2}s with {}",
            start_time.elapsed().as_secs_f64(),
            self.generator.model_name()
        );

        self.transcript.push(ChatMessage::user(question));
        self.transcript.push(ChatMessage::assistant(reply));

        self.render()
    }

    /// Replace the session focus. Blank text clears it. Only later prompts
    /// are affected.
    pub fn set_therapy_focus(&mut self, value: &str) {
        self.focus = TherapyFocus::parse(value);
        debug!(
            "Therapy focus set to {}",
            self.focus.as_ref().map(TherapyFocus::as_str).unwrap_or("none")
        );
    }

    pub fn clear_history(&mut self) {
        debug!("Clearing {} transcript entries", self.transcript.len());
        self.transcript.clear();
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn therapy_focus(&self) -> Option<&TherapyFocus> {
        self.focus.as_ref()
    }

    pub fn format(&self) -> TranscriptFormat {
        self.format
    }

    pub fn render(&self) -> String {
        self.transcript.render(self.format)
    }

    pub fn failure_message(failure: &GenerationFailure) -> String {
        format!(
            "Error generating response: {failure}. Check your Gemini API key and internet connection."
        )
    }
}
