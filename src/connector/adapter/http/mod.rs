mod server;
mod types;

pub use server::{build_router, serve, ApiError};
pub use types::*;
