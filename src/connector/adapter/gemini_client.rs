use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::application::TextGenerator;
use crate::domain::{DomainError, GenerationFailure};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Serialize)]
struct ApiRequest<'a> {
    contents: Vec<ApiContent<'a>>,
}

#[derive(Serialize)]
struct ApiContent<'a> {
    role: &'a str,
    parts: Vec<ApiPart<'a>>,
}

#[derive(Serialize)]
struct ApiPart<'a> {
    text: &'a str,
}

/// Subset of the `generateContent` response we read.
#[derive(Deserialize)]
struct ApiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

/// HTTP client for the Google Gemini `generateContent` API.
///
/// Implements [`TextGenerator`]: the prompt is sent as a single user turn and
/// the text parts of the first candidate are returned. Every failure is
/// classified into a [`GenerationFailure`]; transport details only go to the
/// log.
///
/// Configuration is read from the environment once, at construction:
///
/// ```text
/// GEMINI_API_KEY=...              (required for real calls)
/// GEMINI_MODEL=gemini-1.5-flash
/// GEMINI_BASE_URL=https://generativelanguage.googleapis.com
/// ```
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
    /// Full endpoint URL (base + model path).
    url: String,
}

impl GeminiClient {
    pub fn new(
        api_key: Option<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let model: String = model.into();
        let base: String = base_url.into();
        let base_url = base.trim_end_matches('/').to_string();
        let url = Self::endpoint_url(&base_url, &model);
        Ok(Self {
            client: Self::http_client(DEFAULT_TIMEOUT)?,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            model,
            base_url,
            url,
        })
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self.url = Self::endpoint_url(&self.base_url, &self.model);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, DomainError> {
        self.client = Self::http_client(timeout)?;
        Ok(self)
    }

    /// Construct from environment variables:
    ///
    /// | Variable          | Default                                     |
    /// |-------------------|---------------------------------------------|
    /// | `GEMINI_API_KEY`  | none; every call fails with `Auth`          |
    /// | `GEMINI_MODEL`    | `gemini-1.5-flash`                          |
    /// | `GEMINI_BASE_URL` | `https://generativelanguage.googleapis.com` |
    pub fn from_env() -> Result<Self, DomainError> {
        let key = std::env::var("GEMINI_API_KEY").ok();
        let model =
            std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let base =
            std::env::var("GEMINI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        if key.is_none() {
            warn!("GEMINI_API_KEY is not set; generation calls will fail");
        }
        Self::new(key, model, base)
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn endpoint(&self) -> &str {
        &self.url
    }

    fn endpoint_url(base_url: &str, model: &str) -> String {
        format!("{base_url}/v1beta/models/{model}:generateContent")
    }

    fn http_client(timeout: Duration) -> Result<reqwest::Client, DomainError> {
        reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                DomainError::configuration(format!("GeminiClient: failed to build HTTP client: {e}"))
            })
    }

    fn classify_transport(error: &reqwest::Error) -> GenerationFailure {
        if error.is_timeout() {
            GenerationFailure::Timeout
        } else if error.is_decode() {
            GenerationFailure::Malformed
        } else {
            GenerationFailure::Network
        }
    }

    /// Map a non-success HTTP status to a failure cause. Gemini answers a bad
    /// key with 400 `API_KEY_INVALID`, so the body is inspected as well.
    fn classify_status(status: u16, body: &str) -> GenerationFailure {
        match status {
            401 | 403 => GenerationFailure::Auth,
            400 if body.contains("API_KEY_INVALID") || body.contains("API key not valid") => {
                GenerationFailure::Auth
            }
            408 | 504 => GenerationFailure::Timeout,
            status => GenerationFailure::Service { status },
        }
    }

    /// Concatenate the text parts of the first candidate. `None` when there
    /// is no non-blank text.
    fn extract_text(response: ApiResponse) -> Option<String> {
        let text: String = response
            .candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .filter_map(|p| p.text)
            .collect();

        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationFailure> {
        let Some(api_key) = self.api_key.as_deref() else {
            warn!("GeminiClient: no API key configured");
            return Err(GenerationFailure::Auth);
        };

        let request = ApiRequest {
            contents: vec![ApiContent {
                role: "user",
                parts: vec![ApiPart { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(&self.url)
            .header(API_KEY_HEADER, api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!("GeminiClient: request failed: {e}");
                Self::classify_transport(&e)
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("GeminiClient: API returned {status}: {body}");
            return Err(Self::classify_status(status.as_u16(), &body));
        }

        let api_response: ApiResponse = response.json().await.map_err(|e| {
            warn!("GeminiClient: failed to parse response: {e}");
            GenerationFailure::Malformed
        })?;

        let text = Self::extract_text(api_response).ok_or_else(|| {
            warn!("GeminiClient: response contained no candidate text");
            GenerationFailure::Malformed
        })?;
        debug!("GeminiClient: received {} chars", text.len());

        Ok(text)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
