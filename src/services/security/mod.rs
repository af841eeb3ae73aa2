//! 보안 부가 기능 모듈
//!
//! 브루트포스 잠금 가드와 보안 감사 싱크를 제공합니다.

pub mod audit;
pub mod lockout_guard;

pub use audit::{AuditSink, LogAuditSink};
pub use lockout_guard::{FailureOutcome, LockoutGuard};
