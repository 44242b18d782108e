mod gemini_client;
pub mod http;
mod mock_text_generator;

pub use gemini_client::*;
pub use mock_text_generator::*;
