// Shared middleware / extractors
pub mod auth;
pub mod json;

pub use auth::*;
pub use json::*;
