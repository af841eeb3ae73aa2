//! # Repository Module
//!
//! 세션과 잠금 상태의 저장소 계층입니다. 저장 기술은 trait 뒤로
//! 추상화되며, 기본 구현은 뮤텍스로 보호되는 인메모리 맵입니다.
//! 임계 구역에 await 지점이 없으므로 모든 저장소 연산은 선형화
//! 가능합니다.

pub mod lockouts;
pub mod sessions;

pub use lockouts::{InMemoryLockoutStore, LockoutStore};
pub use sessions::{InMemorySessionStore, SessionStore};
