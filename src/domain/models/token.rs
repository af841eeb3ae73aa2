//! # Token Model
//!
//! 액세스 토큰 클레임과 토큰 쌍을 정의하는 모듈입니다.
//! 클레임의 모든 시각 필드는 에포크 초 단위 정수입니다.

use serde::{Deserialize, Serialize};

use super::role::Role;

/// JWT 액세스 토큰 클레임
///
/// HS256으로 서명되는 액세스 토큰의 페이로드입니다.
///
/// ## 클레임 구성
///
/// | 클레임 | 의미 |
/// |--------|------|
/// | `sub` | 사용자 ID |
/// | `email` | 사용자 이메일 |
/// | `role` | 역할 (소문자 직렬화) |
/// | `jti` | 토큰 고유 ID (무효화 캐시의 키) |
/// | `iat` | 발급 시각 (에포크 초) |
/// | `exp` | 만료 시각 (에포크 초) |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    /// 사용자 ID
    pub sub: String,
    /// 사용자 이메일
    pub email: String,
    /// 사용자 역할
    pub role: Role,
    /// 토큰 고유 식별자 (UUIDv4)
    pub jti: String,
    /// 발급 시각 (에포크 초)
    pub iat: i64,
    /// 만료 시각 (에포크 초)
    pub exp: i64,
}

/// 발급된 액세스 토큰
///
/// 서명된 토큰 문자열과 그 클레임을 함께 담습니다. 발급 직후
/// 세션 생성이나 감사 기록에 클레임 정보가 필요하므로 재파싱 없이
/// 함께 반환합니다.
#[derive(Debug, Clone)]
pub struct IssuedAccessToken {
    /// 서명된 JWT 문자열
    pub token: String,
    /// 토큰에 담긴 클레임
    pub claims: AccessTokenClaims,
}

/// 로그인/갱신 응답용 토큰 쌍
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    /// 액세스 토큰 (JWT)
    pub access_token: String,
    /// 리프레시 토큰 (불투명 랜덤 문자열, 1회용)
    pub refresh_token: String,
    /// 액세스 토큰 수명 (초)
    pub expires_in: i64,
}
