//! 세션 관리 모듈

pub mod session_registry;

pub use session_registry::{RotatedSession, SessionRegistry};
