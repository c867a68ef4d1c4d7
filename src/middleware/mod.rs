mod auth;
mod error_handler;

pub use auth::{auth_middleware, session_id_from};
pub use error_handler::log_errors;
