//! 인증 서비스 모듈
//!
//! 액세스 토큰 발급/검증([`TokenIssuer`])과 로그인/갱신/로그아웃
//! 오케스트레이션([`AuthService`])을 제공합니다.

pub mod auth_service;
pub mod token_issuer;

pub use auth_service::{
    AuthService, BcryptPasswordVerifier, InMemoryUserDirectory, LoginAttempt, PasswordVerifier,
    UserDirectory, UserRecord,
};
pub use token_issuer::TokenIssuer;
