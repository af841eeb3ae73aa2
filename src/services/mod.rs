//! # Services Module
//!
//! 보안 도메인의 비즈니스 로직 계층입니다.
//!
//! ## 모듈 구성
//!
//! - [`auth`] - 액세스 토큰 발급/검증과 인증 오케스트레이션
//! - [`sessions`] - 리프레시 토큰 세션 레지스트리 (순환/무효화/목록)
//! - [`security`] - 계정 잠금 가드와 보안 감사 싱크

pub mod auth;
pub mod security;
pub mod sessions;
