use anyhow::Result;

use super::super::Container;

pub struct AskController<'a> {
    container: &'a Container,
}

impl<'a> AskController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn ask(&self, question: String, focus: Option<String>) -> Result<String> {
        let mut chat = self.container.orchestrator();
        Ok(chat.ask(&question, focus.as_deref()).await)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::connector::api::ContainerConfig;
    use crate::connector::MockTextGenerator;

    #[tokio::test]
    async fn test_ask_prints_single_exchange() {
        let container = Container::with_generator(
            Arc::new(MockTextGenerator::replying("Rest.")),
            ContainerConfig::default(),
        );

        let output = AskController::new(&container)
            .ask("What now?".to_string(), Some("Basti".to_string()))
            .await
            .unwrap();

        assert_eq!(output, "You: What now?\n\nBot: Rest.");
    }
}
