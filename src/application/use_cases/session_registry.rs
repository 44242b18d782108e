use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};

use crate::application::{PromptBuilder, ResponseOrchestrator, TextGenerator};
use crate::domain::{SessionId, TherapyFocus, TranscriptFormat};

pub const DEFAULT_MAX_SESSIONS: usize = 1024;

type SessionHandle = Arc<Mutex<ResponseOrchestrator>>;

struct SessionEntry {
    handle: SessionHandle,
    /// Registry tick of the most recent access; lowest is evicted first.
    last_used: AtomicU64,
}

/// Keeps one [`ResponseOrchestrator`] per session so concurrent users never
/// see each other's transcript or focus.
///
/// Sessions are created by `ask` and by setting a non-blank focus. Reads and
/// `clear_history` never create one. At most `max_sessions` are held; adding
/// one more drops the least recently used session.
///
/// Calls on the same session run one at a time; different sessions do not
/// block each other during generation.
pub struct SessionRegistry {
    generator: Arc<dyn TextGenerator>,
    prompt_builder: PromptBuilder,
    format: TranscriptFormat,
    max_sessions: usize,
    clock: AtomicU64,
    sessions: RwLock<HashMap<SessionId, SessionEntry>>,
}

impl SessionRegistry {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            generator,
            prompt_builder: PromptBuilder::new(),
            format: TranscriptFormat::default(),
            max_sessions: DEFAULT_MAX_SESSIONS,
            clock: AtomicU64::new(0),
            sessions: RwLock::new(HashMap::new()),
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

    /// Cap on live sessions. Values below 1 are raised to 1.
    pub fn with_max_sessions(mut self, max_sessions: usize) -> Self {
        self.max_sessions = max_sessions.max(1);
        self
    }

    fn tick(&self) -> u64 {
        self.clock.fetch_add(1, Ordering::Relaxed)
    }

    /// Existing session only; marks it as used.
    async fn existing(&self, id: &SessionId) -> Option<SessionHandle> {
        let sessions = self.sessions.read().await;
        let entry = sessions.get(id)?;
        entry.last_used.store(self.tick(), Ordering::Relaxed);
        Some(entry.handle.clone())
    }

    async fn session(&self, id: &SessionId) -> SessionHandle {
        if let Some(handle) = self.existing(id).await {
            return handle;
        }

        let mut sessions = self.sessions.write().await;
        if let Some(entry) = sessions.get(id) {
            entry.last_used.store(self.tick(), Ordering::Relaxed);
            return entry.handle.clone();
        }

        while sessions.len() >= self.max_sessions {
            let Some(oldest) = sessions
                .iter()
                .min_by_key(|(_, entry)| entry.last_used.load(Ordering::Relaxed))
                .map(|(key, _)| key.clone())
            else {
                break;
            };
            sessions.remove(&oldest);
            info!("Evicted least recently used session {}", oldest);
        }

        info!("Starting session {}", id);
        let handle: SessionHandle = Arc::new(Mutex::new(
            ResponseOrchestrator::new(self.generator.clone())
                .with_prompt_builder(self.prompt_builder.clone())
                .with_format(self.format),
        ));
        sessions.insert(
            id.clone(),
            SessionEntry {
                handle: handle.clone(),
                last_used: AtomicU64::new(self.tick()),
            },
        );
        handle
    }

    pub async fn ask(&self, id: &SessionId, question: &str, focus: Option<&str>) -> String {
        let handle = self.session(id).await;
        let mut chat = handle.lock().await;
        chat.ask(question, focus).await
    }

    /// Set or clear the focus. Clearing the focus of an unknown session is a
    /// no-op.
    pub async fn set_therapy_focus(&self, id: &SessionId, value: &str) {
        let handle = if TherapyFocus::parse(value).is_some() {
            Some(self.session(id).await)
        } else {
            self.existing(id).await
        };
        if let Some(handle) = handle {
            handle.lock().await.set_therapy_focus(value);
        }
    }

    /// Empty the transcript. Unknown sessions are left alone.
    pub async fn clear_history(&self, id: &SessionId) {
        if let Some(handle) = self.existing(id).await {
            handle.lock().await.clear_history();
        }
    }

    /// Rendered transcript; empty for a session that has not been used yet.
    pub async fn transcript(&self, id: &SessionId) -> String {
        match self.existing(id).await {
            Some(handle) => handle.lock().await.render(),
            None => String::new(),
        }
    }

    /// Drop a session and everything it holds. Returns whether it existed.
    pub async fn end_session(&self, id: &SessionId) -> bool {
        let removed = self.sessions.write().await.remove(id).is_some();
        if removed {
            debug!("Ended session {}", id);
        }
        removed
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub fn model_name(&self) -> &str {
        self.generator.model_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connector::MockTextGenerator;

    fn id(s: &str) -> SessionId {
        SessionId::new(s).unwrap()
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let registry = SessionRegistry::new(Arc::new(MockTextGenerator::replying("ok")));

        registry.ask(&id("a"), "question from a", None).await;
        let b = registry.ask(&id("b"), "question from b", None).await;

        assert!(!b.contains("question from a"));
        assert_eq!(registry.session_count().await, 2);
    }

    #[tokio::test]
    async fn test_focus_is_per_session() {
        let mock = Arc::new(MockTextGenerator::replying("ok"));
        let registry = SessionRegistry::new(mock.clone());

        registry.set_therapy_focus(&id("a"), "Basti").await;
        registry.ask(&id("b"), "Q", None).await;

        assert!(!mock.last_prompt().unwrap().contains("Basti"));
    }

    #[tokio::test]
    async fn test_unknown_session_transcript_is_empty() {
        let registry = SessionRegistry::new(Arc::new(MockTextGenerator::new()));
        assert_eq!(registry.transcript(&id("nobody")).await, "");
        assert_eq!(registry.session_count().await, 0);
    }

    #[tokio::test]
    async fn test_end_session() {
        let registry = SessionRegistry::new(Arc::new(MockTextGenerator::new()));
        registry.ask(&id("a"), "hi", None).await;

        assert!(registry.end_session(&id("a")).await);
        assert!(!registry.end_session(&id("a")).await);
        assert_eq!(registry.transcript(&id("a")).await, "");
    }

    #[tokio::test]
    async fn test_clear_history_only_affects_one_session() {
        let registry = SessionRegistry::new(Arc::new(MockTextGenerator::replying("ok")));
        registry.ask(&id("a"), "kept", None).await;
        registry.ask(&id("b"), "dropped", None).await;

        registry.clear_history(&id("b")).await;

        assert!(registry.transcript(&id("a")).await.contains("kept"));
        assert_eq!(registry.transcript(&id("b")).await, "");
    }

    #[tokio::test]
    async fn test_clear_history_on_unknown_ids_creates_nothing() {
        let registry = SessionRegistry::new(Arc::new(MockTextGenerator::new()));

        for n in 0..1000 {
            registry.clear_history(&id(&format!("stranger-{n}"))).await;
        }

        assert_eq!(registry.session_count().await, 0);
    }

    #[tokio::test]
    async fn test_blank_focus_on_unknown_id_creates_nothing() {
        let registry = SessionRegistry::new(Arc::new(MockTextGenerator::new()));

        registry.set_therapy_focus(&id("a"), "   ").await;
        assert_eq!(registry.session_count().await, 0);

        registry.set_therapy_focus(&id("a"), "Vamana").await;
        assert_eq!(registry.session_count().await, 1);
    }

    #[tokio::test]
    async fn test_least_recently_used_session_is_evicted() {
        let registry =
            SessionRegistry::new(Arc::new(MockTextGenerator::replying("ok"))).with_max_sessions(2);

        registry.ask(&id("a"), "first", None).await;
        registry.ask(&id("b"), "second", None).await;
        // Touch "a" so "b" becomes the oldest.
        registry.ask(&id("a"), "again", None).await;
        registry.ask(&id("c"), "third", None).await;

        assert_eq!(registry.session_count().await, 2);
        assert!(registry.transcript(&id("a")).await.contains("again"));
        assert_eq!(registry.transcript(&id("b")).await, "");
        assert!(registry.transcript(&id("c")).await.contains("third"));
    }

    #[tokio::test]
    async fn test_focus_only_sessions_are_bounded() {
        let registry =
            SessionRegistry::new(Arc::new(MockTextGenerator::new())).with_max_sessions(8);

        for n in 0..100 {
            registry.set_therapy_focus(&id(&format!("s{n}")), "Basti").await;
        }

        assert_eq!(registry.session_count().await, 8);
    }
}
