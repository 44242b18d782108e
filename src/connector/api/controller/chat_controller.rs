use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

use super::super::Container;

const HELP: &str = "Commands:\n  /focus <therapy>  set the therapy focus (empty clears it)\n  /clear            forget the conversation\n  /history          show the conversation\n  /help             show this help\n  /quit             leave the chat";

/// One line of REPL input.
///
/// Whitespace only matters for recognising commands and blank lines; a
/// question is passed on exactly as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Ask(String),
    Focus(String),
    Clear,
    History,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

impl ReplCommand {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Self::Empty;
        }

        let Some(rest) = trimmed.strip_prefix('/') else {
            return Self::Ask(line.to_string());
        };

        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest, ""),
        };

        match name.to_lowercase().as_str() {
            "focus" => Self::Focus(arg.to_string()),
            "clear" => Self::Clear,
            "history" => Self::History,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            other => Self::Unknown(other.to_string()),
        }
    }
}

/// Terminal front-end: reads questions line by line and prints the whole
/// transcript after every answer.
pub struct ChatController<'a> {
    container: &'a Container,
}

impl<'a> ChatController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn run<R, W>(&self, reader: R, mut writer: W, focus: Option<String>) -> Result<String>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut chat = self.container.orchestrator();
        if let Some(f) = focus.as_deref() {
            chat.set_therapy_focus(f);
        }

        writer
            .write_all(
                format!(
                    "Panchakarma chat ({}). Type /help for commands.\n",
                    self.container.model_name()
                )
                .as_bytes(),
            )
            .await?;

        let mut lines = reader.lines();
        let mut questions = 0usize;

        loop {
            writer.write_all(b"> ").await?;
            writer.flush().await?;

            let Some(line) = lines.next_line().await? else {
                break;
            };

            let output = match ReplCommand::parse(&line) {
                ReplCommand::Empty => continue,
                ReplCommand::Quit => break,
                ReplCommand::Help => HELP.to_string(),
                ReplCommand::Clear => {
                    chat.clear_history();
                    "History cleared.".to_string()
                }
                ReplCommand::History => {
                    let rendered = chat.render();
                    if rendered.is_empty() {
                        "No messages yet.".to_string()
                    } else {
                        rendered
                    }
                }
                ReplCommand::Focus(value) => {
                    chat.set_therapy_focus(&value);
                    match chat.therapy_focus() {
                        Some(f) => format!("Therapy focus set to {f}."),
                        None => "Therapy focus cleared.".to_string(),
                    }
                }
                ReplCommand::Unknown(name) => {
                    format!("Unknown command /{name}. Type /help for commands.")
                }
                ReplCommand::Ask(question) => {
                    writer.write_all(b"Thinking...\n").await?;
                    writer.flush().await?;
                    questions += 1;
                    chat.ask(&question, None).await
                }
            };

            writer.write_all(output.as_bytes()).await?;
            writer.write_all(b"\n\n").await?;
        }

        writer.flush().await?;
        debug!("Chat ended after {} questions", questions);

        Ok(format!("Goodbye. {questions} question(s) answered."))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::connector::api::ContainerConfig;
    use crate::connector::MockTextGenerator;

    #[test]
    fn test_parse_commands() {
        assert_eq!(ReplCommand::parse("  "), ReplCommand::Empty);
        assert_eq!(
            ReplCommand::parse("What is Nasya?"),
            ReplCommand::Ask("What is Nasya?".to_string())
        );
        assert_eq!(
            ReplCommand::parse("/focus  Basti "),
            ReplCommand::Focus("Basti".to_string())
        );
        assert_eq!(ReplCommand::parse("/focus"), ReplCommand::Focus(String::new()));
        assert_eq!(ReplCommand::parse("/CLEAR"), ReplCommand::Clear);
        assert_eq!(ReplCommand::parse("  /help  "), ReplCommand::Help);
        assert_eq!(ReplCommand::parse("/exit"), ReplCommand::Quit);
        assert_eq!(
            ReplCommand::parse("/bogus x"),
            ReplCommand::Unknown("bogus".to_string())
        );
    }

    #[tokio::test]
    async fn test_repl_session() {
        let mock = Arc::new(MockTextGenerator::replying("Drink warm water."));
        let container = Container::with_generator(mock.clone(), ContainerConfig::default());

        let input: &[u8] = b"/focus Basti\nHow long does it take?\n/history\n/clear\n/history\n/quit\nignored\n";
        let mut output = Vec::new();

        let summary = ChatController::new(&container)
            .run(input, &mut output, None)
            .await
            .unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("Therapy focus set to Basti."));
        assert!(text.contains("Thinking..."));
        assert!(text.contains("You: How long does it take?\n\nBot: Drink warm water."));
        assert!(text.contains("History cleared."));
        assert!(text.contains("No messages yet."));
        assert_eq!(mock.call_count(), 1);
        assert!(mock.last_prompt().unwrap().contains("Basti"));
        assert_eq!(summary, "Goodbye. 1 question(s) answered.");
    }

    #[test]
    fn test_parse_keeps_question_whitespace() {
        assert_eq!(
            ReplCommand::parse("   indented question  "),
            ReplCommand::Ask("   indented question  ".to_string())
        );
        assert_eq!(
            ReplCommand::parse("\tWhat is Basti?"),
            ReplCommand::Ask("\tWhat is Basti?".to_string())
        );
    }

    #[tokio::test]
    async fn test_repl_sends_question_verbatim() {
        let mock = Arc::new(MockTextGenerator::replying("ok"));
        let container = Container::with_generator(mock.clone(), ContainerConfig::default());
        let input: &[u8] = b"   indented question  \n";
        let mut output = Vec::new();

        ChatController::new(&container)
            .run(input, &mut output, None)
            .await
            .unwrap();

        let prompt = mock.last_prompt().unwrap();
        assert!(prompt.ends_with("User question:    indented question  "));
        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("You:    indented question  \n\nBot: ok"));
    }

    #[tokio::test]
    async fn test_repl_stops_at_eof() {
        let container = Container::with_generator(
            Arc::new(MockTextGenerator::new()),
            ContainerConfig::default(),
        );
        let input: &[u8] = b"";
        let mut output = Vec::new();

        let summary = ChatController::new(&container)
            .run(input, &mut output, Some("Vamana".to_string()))
            .await
            .unwrap();

        assert_eq!(summary, "Goodbye. 0 question(s) answered.");
    }
}
