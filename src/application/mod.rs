//! # Application Layer
//!
//! Prompt assembly, response orchestration and per-session bookkeeping,
//! coordinating the domain layer with a [`TextGenerator`] connector.

pub mod interfaces;
pub mod use_cases;

pub use interfaces::*;
pub use use_cases::*;
