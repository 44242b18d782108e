use crate::domain::{PromptRequest, TherapyFocus};

/// Persona and answer-style instructions placed before every question.
pub const DEFAULT_SYSTEM_INSTRUCTION: &str = "\
You are an empathetic Ayurvedic assistant specializing in Panchakarma.
Answer the user's questions fully, clearly, and accurately.
- Use bullet points where appropriate.
- Focus on the therapy type if provided.
- End with: \"This is general guidance based on traditional Ayurveda—consult your qualified practitioner for personalized advice.\"";

const FOCUS_PREFIX: &str = "Focus on therapy type: ";
const QUESTION_PREFIX: &str = "User question: ";

/// Builds the exact text sent to the generation service.
///
/// Pure string assembly: the same question and focus always produce the same
/// prompt, and nothing here can fail.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    system_instruction: String,
}

impl PromptBuilder {
    pub fn new() -> Self {
        Self {
            system_instruction: DEFAULT_SYSTEM_INSTRUCTION.to_string(),
        }
    }

    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = instruction.into();
        self
    }

    pub fn system_instruction(&self) -> &str {
        &self.system_instruction
    }

    pub fn request<'a>(
        &'a self,
        question: &'a str,
        focus: Option<&'a TherapyFocus>,
    ) -> PromptRequest<'a> {
        PromptRequest::new(&self.system_instruction, question).with_focus(focus)
    }

    pub fn build(&self, question: &str, focus: Option<&TherapyFocus>) -> String {
        Self::render(&self.request(question, focus))
    }

    /// The question is inserted verbatim, without trimming.
    pub fn render(request: &PromptRequest<'_>) -> String {
        let mut prompt = request.system_instruction().to_string();

        if let Some(focus) = request.focus() {
            prompt.push_str("\n\n");
            prompt.push_str(FOCUS_PREFIX);
            prompt.push_str(focus.as_str());
        }

        prompt.push_str("\n\n");
        prompt.push_str(QUESTION_PREFIX);
        prompt.push_str(request.question());
        prompt
    }
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new()
    }
}
