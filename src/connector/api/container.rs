use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::debug;

use crate::application::{ResponseOrchestrator, SessionRegistry, TextGenerator};
use crate::connector::adapter::{GeminiClient, MockTextGenerator};
use crate::domain::TranscriptFormat;

pub struct ContainerConfig {
    /// Answer with the offline mock generator instead of calling Gemini.
    pub mock: bool,
    /// Overrides `GEMINI_MODEL` when set.
    pub model: Option<String>,
    pub timeout_secs: u64,
    pub format: TranscriptFormat,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            mock: false,
            model: None,
            timeout_secs: 30,
            format: TranscriptFormat::default(),
        }
    }
}

pub struct Container {
    generator: Arc<dyn TextGenerator>,
    config: ContainerConfig,
}

impl Container {
    pub fn new(config: ContainerConfig) -> Result<Self> {
        let generator: Arc<dyn TextGenerator> = if config.mock {
            debug!("Using mock text generator");
            Arc::new(MockTextGenerator::new())
        } else {
            let mut client = GeminiClient::from_env()?
                .with_timeout(Duration::from_secs(config.timeout_secs.max(1)))?;
            if let Some(model) = config.model.as_deref() {
                client = client.with_model(model);
            }
            debug!("Using Gemini model {}", client.model_name());
            Arc::new(client)
        };

        Ok(Self { generator, config })
    }

    /// Build a container around an already constructed generator.
    pub fn with_generator(generator: Arc<dyn TextGenerator>, config: ContainerConfig) -> Self {
        Self { generator, config }
    }

    pub fn orchestrator(&self) -> ResponseOrchestrator {
        ResponseOrchestrator::new(self.generator.clone()).with_format(self.config.format)
    }

    pub fn session_registry(&self) -> SessionRegistry {
        SessionRegistry::new(self.generator.clone()).with_format(self.config.format)
    }

    pub fn model_name(&self) -> &str {
        self.generator.model_name()
    }

    pub fn format(&self) -> TranscriptFormat {
        self.config.format
    }
}
