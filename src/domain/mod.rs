//! # Domain Module
//!
//! 서비스의 도메인 모델과 데이터 전송 객체를 정의하는 모듈입니다.
//!
//! ## 모듈 구성
//!
//! - [`models`] - 핵심 도메인 모델 (역할, 토큰 클레임, 세션, 잠금 상태, 감사 이벤트)
//! - [`dto`] - HTTP 요청/응답 DTO (validator 기반 입력 검증 포함)

pub mod dto;
pub mod models;
