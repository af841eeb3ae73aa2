//! # Configuration Module
//!
//! 환경 변수 기반 설정을 관리하는 모듈입니다.
//! 모든 환경 변수는 프로세스 시작 시 한 번 읽혀 [`AuthConfig`] 객체로
//! 집약되고, 이후 생성자 주입으로만 전달됩니다. 전역 정적 접근자나
//! 싱글톤은 사용하지 않습니다.

pub mod auth_config;

pub use auth_config::AuthConfig;
