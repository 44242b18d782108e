use std::sync::Mutex;

use async_trait::async_trait;

use crate::application::TextGenerator;
use crate::domain::GenerationFailure;

const DEFAULT_REPLY: &str = "Panchakarma is a five-fold Ayurvedic cleansing programme. \
This is general guidance based on traditional Ayurveda—consult your qualified practitioner \
for personalized advice.";

/// Offline [`TextGenerator`] returning a canned reply or a canned failure.
///
/// Every prompt it receives is recorded so callers can check what would have
/// been sent to the real service.
pub struct MockTextGenerator {
    outcome: Result<String, GenerationFailure>,
    prompts: Mutex<Vec<String>>,
}

impl MockTextGenerator {
    pub fn new() -> Self {
        Self::replying(DEFAULT_REPLY)
    }

    pub fn replying(reply: impl Into<String>) -> Self {
        Self {
            outcome: Ok(reply.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(failure: GenerationFailure) -> Self {
        Self {
            outcome: Err(failure),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .map(|p| p.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts().pop()
    }

    pub fn call_count(&self) -> usize {
        self.prompts().len()
    }
}

impl Default for MockTextGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextGenerator for MockTextGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationFailure> {
        match self.prompts.lock() {
            Ok(mut prompts) => prompts.push(prompt.to_string()),
            Err(poisoned) => poisoned.into_inner().push(prompt.to_string()),
        }
        self.outcome.clone()
    }

    fn model_name(&self) -> &str {
        "mock-generator"
    }
}
