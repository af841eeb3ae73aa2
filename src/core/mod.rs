//! # Core Module
//!
//! 토큰/세션 수명주기 서비스의 핵심 기반 기능을 제공하는 모듈입니다.
//! 에러 처리 체계, 시간 소스 추상화, 애플리케이션 상태 컨테이너를 포함합니다.
//!
//! ## 모듈 구성
//!
//! ### [`errors`] - 통합 에러 처리
//! - **AuthError**: 보안 도메인의 타입화된 에러 분류 체계
//! - **AppError**: HTTP 경계 전용 에러 타입 (Actix-Web ResponseError 구현)
//! - **자동 변환**: thiserror 기반 에러 체인 관리
//!
//! ### [`clock`] - 시간 소스 추상화
//! - **Clock**: 현재 시각 제공 trait (테스트에서 결정적으로 교체 가능)
//! - **SystemClock**: 운영 환경용 실제 시계
//! - **ManualClock**: 테스트용 수동 제어 시계
//!
//! ### [`state`] - 애플리케이션 상태
//! - **AppState**: 핸들러와 미들웨어가 공유하는 명시적 의존성 컨테이너
//!
//! ## 핵심 설계 원칙
//!
//! ### 1. 명시적 의존성 주입
//! - 전역 싱글톤 대신 생성자 주입으로 모든 의존성 전달
//! - 설정은 [`crate::config::AuthConfig`] 객체 하나로 집약
//!
//! ### 2. Fail-Fast Philosophy
//! - 컴파일 타임 에러 검출 우선
//! - 명시적 에러 처리로 런타임 안정성 보장
//! - 예외 기반 제어 흐름 금지: 모든 실패는 `Result` 값으로 전파

pub mod clock;
pub mod errors;
pub mod state;

pub use clock::{Clock, ManualClock, SystemClock};
pub use errors::{AppError, AuthError, StoreError};
pub use state::AppState;
