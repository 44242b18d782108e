mod prompt_builder;
mod response_orchestrator;
mod session_registry;

pub use prompt_builder::*;
pub use response_orchestrator::*;
pub use session_registry::*;
