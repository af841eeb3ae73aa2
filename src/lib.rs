//! 핏코치 인증 백엔드
//!
//! 피트니스 코칭 플랫폼의 토큰/세션 수명주기 서비스입니다.
//! 단명 JWT 액세스 토큰, 순환되는 불투명 리프레시 토큰, 즉시
//! 무효화 캐시, 브루트포스 계정 잠금을 제공합니다.
//!
//! # Features
//!
//! - **JWT 인증**: HS256 서명, 15분 수명의 액세스 토큰 (jti 포함)
//! - **세션 순환**: 256비트 불투명 리프레시 토큰, 1회용, 해시 저장
//! - **즉시 무효화**: 로그아웃된 토큰의 jti 블랙리스트 (Redis 지원)
//! - **계정 잠금**: 5회 실패 시 15분 잠금, 지연 해제
//! - **보안 감사**: 모든 보안 분기에서 log-and-continue 이벤트 발행
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← REST API 엔드포인트
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청/응답 처리
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← 토큰 발급, 세션 순환, 잠금 가드
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ Stores (traits) │ ← 세션/잠금/무효화 저장소
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ Memory / Redis  │ ← 저장소 구현
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use fitcoach_auth_backend::config::AuthConfig;
//! use fitcoach_auth_backend::services::auth::{AuthService, LoginAttempt};
//!
//! let config = AuthConfig::from_env();
//! let service: AuthService = build_auth_service(&config);
//!
//! let pair = service.login(LoginAttempt {
//!     email: "coach@fitcoach.app".into(),
//!     password: "...".into(),
//!     ..Default::default()
//! }).await?;
//! ```

pub mod caching;
pub mod config;
pub mod core;
pub mod domain;
pub mod handlers;
pub mod middlewares;
pub mod repositories;
pub mod routes;
pub mod services;
