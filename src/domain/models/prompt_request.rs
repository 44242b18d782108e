use super::TherapyFocus;

/// Everything that goes into one prompt. Built per call and dropped after the
/// prompt text has been produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptRequest<'a> {
    system_instruction: &'a str,
    focus: Option<&'a TherapyFocus>,
    question: &'a str,
}

impl<'a> PromptRequest<'a> {
    pub fn new(system_instruction: &'a str, question: &'a str) -> Self {
        Self {
            system_instruction,
            focus: None,
            question,
        }
    }

    pub fn with_focus(mut self, focus: Option<&'a TherapyFocus>) -> Self {
        self.focus = focus;
        self
    }

    pub fn system_instruction(&self) -> &'a str {
        self.system_instruction
    }

    pub fn focus(&self) -> Option<&'a TherapyFocus> {
        self.focus
    }

    pub fn question(&self) -> &'a str {
        self.question
    }
}
