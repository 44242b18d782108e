//! # Domain Layer
//!
//! Chat messages, transcripts, therapy focus and the error types shared by
//! every other layer. Independent of HTTP clients and front-ends.

pub mod error;
pub mod models;

pub use error::*;
pub use models::*;
