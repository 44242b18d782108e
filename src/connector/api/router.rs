use anyhow::Result;
use tokio::io::BufReader;

use crate::Commands;

use super::container::Container;
use super::controller::{AskController, ChatController};

pub struct Router<'a> {
    ask_controller: AskController<'a>,
    chat_controller: ChatController<'a>,
}

impl<'a> Router<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self {
            ask_controller: AskController::new(container),
            chat_controller: ChatController::new(container),
        }
    }

    pub async fn route(&self, command: Commands) -> Result<String> {
        match command {
            Commands::Ask { question, focus } => self.ask_controller.ask(question, focus).await,
            Commands::Chat { focus } => {
                let stdin = BufReader::new(tokio::io::stdin());
                self.chat_controller
                    .run(stdin, tokio::io::stdout(), focus)
                    .await
            }
            Commands::Serve { .. } => unreachable!("Serve command is handled separately in main"),
        }
    }
}
