//! # Connector Layer
//!
//! External integrations and front-ends around the application layer:
//! - Text generation (Google Gemini, plus an offline mock)
//! - Terminal front-end (clap commands routed to controllers)
//! - HTTP front-end (axum, one transcript per session id)

pub mod adapter;
pub mod api;

pub use adapter::*;
