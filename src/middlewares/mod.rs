//! # Middleware Module
//!
//! HTTP 요청 파이프라인의 인증 미들웨어를 제공합니다.
//!
//! - [`auth_middleware`] - Transform 구현 (미들웨어 팩토리)
//! - [`auth_inner`] - 실제 인증 로직을 수행하는 Service 구현

pub mod auth_inner;
pub mod auth_middleware;

pub use auth_middleware::AuthMiddleware;
