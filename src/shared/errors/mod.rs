// Shared errors
pub mod auth_error;
pub mod error_code;

pub use auth_error::*;
pub use error_code::*;
