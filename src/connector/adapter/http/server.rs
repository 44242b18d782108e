use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post, put};
use axum::Json;
use tracing::{info, warn};

use crate::application::SessionRegistry;
use crate::domain::{DomainError, SessionId};

use super::types::{
    AskRequest, ErrorBody, FocusRequest, SessionCreated, TranscriptResponse,
};

/// Maps [`DomainError`] onto an HTTP status with a JSON body.
#[derive(Debug)]
pub struct ApiError(DomainError);

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        Self(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            DomainError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            DomainError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (
            status,
            Json(ErrorBody {
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}

type SharedRegistry = State<Arc<SessionRegistry>>;

/// Build the axum router for the HTTP chat front-end.
///
/// | Method   | Path                         | Effect                         |
/// |----------|------------------------------|--------------------------------|
/// | `GET`    | `/health`                    | liveness check                 |
/// | `POST`   | `/sessions`                  | allocate a new session id      |
/// | `POST`   | `/sessions/{id}/ask`         | ask, returns full transcript   |
/// | `PUT`    | `/sessions/{id}/focus`       | set the therapy focus          |
/// | `DELETE` | `/sessions/{id}/history`     | clear the transcript           |
/// | `GET`    | `/sessions/{id}/transcript`  | read the transcript            |
/// | `DELETE` | `/sessions/{id}`             | drop the session               |
pub fn build_router(registry: Arc<SessionRegistry>) -> axum::Router {
    axum::Router::new()
        .route("/health", get(health))
        .route("/sessions", post(create_session))
        .route("/sessions/{id}", delete(end_session))
        .route("/sessions/{id}/ask", post(ask))
        .route("/sessions/{id}/focus", put(set_focus))
        .route("/sessions/{id}/history", delete(clear_history))
        .route("/sessions/{id}/transcript", get(transcript))
        .with_state(registry)
}

/// Bind `addr` and serve until Ctrl-C.
pub async fn serve(registry: Arc<SessionRegistry>, addr: SocketAddr) -> Result<(), DomainError> {
    let model = registry.model_name().to_string();
    let app = build_router(registry);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Chat HTTP server listening on http://{} (model {})", listener.local_addr()?, model);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("Failed to listen for shutdown signal: {e}");
            }
        })
        .await?;

    info!("Chat HTTP server stopped");
    Ok(())
}

pub async fn health() -> &'static str {
    "ok"
}

pub async fn create_session() -> (StatusCode, Json<SessionCreated>) {
    let id = SessionId::generate();
    (
        StatusCode::CREATED,
        Json(SessionCreated {
            session_id: id.to_string(),
        }),
    )
}

pub async fn ask(
    State(registry): SharedRegistry,
    Path(id): Path<String>,
    Json(body): Json<AskRequest>,
) -> Result<Json<TranscriptResponse>, ApiError> {
    let id = SessionId::new(id)?;
    let transcript = registry
        .ask(&id, &body.question, body.focus.as_deref())
        .await;
    Ok(Json(TranscriptResponse {
        session_id: id.to_string(),
        transcript,
    }))
}

pub async fn set_focus(
    State(registry): SharedRegistry,
    Path(id): Path<String>,
    Json(body): Json<FocusRequest>,
) -> Result<StatusCode, ApiError> {
    let id = SessionId::new(id)?;
    registry.set_therapy_focus(&id, &body.focus).await;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn clear_history(
    State(registry): SharedRegistry,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = SessionId::new(id)?;
    registry.clear_history(&id).await;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn transcript(
    State(registry): SharedRegistry,
    Path(id): Path<String>,
) -> Result<Json<TranscriptResponse>, ApiError> {
    let id = SessionId::new(id)?;
    let transcript = registry.transcript(&id).await;
    Ok(Json(TranscriptResponse {
        session_id: id.to_string(),
        transcript,
    }))
}

pub async fn end_session(
    State(registry): SharedRegistry,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = SessionId::new(id)?;
    if registry.end_session(&id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(DomainError::not_found(format!("Session not found: {id}")).into())
    }
}
