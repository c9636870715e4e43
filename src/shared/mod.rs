// Shared module
// 하위 모듈 경로로 접근 (database와 middleware 모두 `auth` 모듈을 가짐)
pub mod config;
pub mod database;
pub mod errors;
pub mod middleware;
pub mod services;
