//! HTTP 요청/응답 DTO
//!
//! 입력 DTO는 validator 파생으로 형식 검증을 수행하고, 출력 DTO는
//! `ApiResponse` 래퍼로 일관된 응답 형식을 유지합니다.

pub mod requests;
pub mod responses;

pub use requests::{LoginRequest, LogoutRequest, RefreshRequest};
pub use responses::{ApiResponse, RevokedResponse, TokenResponse};
