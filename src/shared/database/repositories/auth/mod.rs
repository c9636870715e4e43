// Auth repositories
pub mod user_store;
pub mod user_repository;
pub mod memory_user_repository;

pub use user_store::*;
pub use user_repository::*;
pub use memory_user_repository::*;
