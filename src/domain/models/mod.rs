//! 핵심 도메인 모델
//!
//! 토큰 클레임, 세션, 계정 잠금, 감사 이벤트 등 보안 로직이 다루는
//! 데이터 구조를 정의합니다.

pub mod audit;
pub mod auth;
pub mod lockout;
pub mod role;
pub mod session;
pub mod token;

pub use audit::{AuditEventType, SecurityAuditEvent};
pub use auth::{AuthMode, AuthenticatedUser};
pub use lockout::AccountLockout;
pub use role::Role;
pub use session::{Session, SessionView};
pub use token::{AccessTokenClaims, IssuedAccessToken, TokenPair};
