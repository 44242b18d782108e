mod chat_message;
mod prompt_request;
mod session_id;
mod therapy_focus;
mod transcript;

pub use chat_message::*;
pub use prompt_request::*;
pub use session_id::*;
pub use therapy_focus::*;
pub use transcript::*;
