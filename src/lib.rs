//! Authentication server: signup, login, logout and JWT access/refresh tokens.

pub mod domains;
pub mod routes;
pub mod shared;
