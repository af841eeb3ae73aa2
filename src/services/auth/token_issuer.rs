//! JWT 액세스 토큰 발급/검증 서비스 구현
//!
//! HMAC-SHA256 서명 기반의 단명 액세스 토큰을 생성하고 검증합니다.
//! 만료 판정은 라이브러리의 시스템 시계 대신 주입된 [`Clock`]으로
//! 수행하므로 테스트에서 결정적으로 재현할 수 있습니다.
//!
//! 이 서비스는 무효화 캐시를 조회하지 않습니다. 서명/만료 검증과
//! 무효화 판정은 별개 관심사이며, 캐시 조회는 호출자
//! ([`crate::services::auth::AuthService::authenticate`])의 몫입니다.

use std::collections::HashSet;
use std::sync::Arc;

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::core::clock::Clock;
use crate::core::errors::AuthError;
use crate::domain::models::{AccessTokenClaims, IssuedAccessToken, Role};

/// JWT 액세스 토큰 발급기
///
/// HS256 서명을 사용하며, 모든 토큰은 고유한 `jti`(UUIDv4)를 가집니다.
/// `jti`는 로그아웃 시 무효화 캐시의 등재 키가 됩니다.
pub struct TokenIssuer {
    secret: String,
    access_ttl_secs: i64,
    clock: Arc<dyn Clock>,
}

impl TokenIssuer {
    pub fn new(secret: &str, access_ttl_secs: i64, clock: Arc<dyn Clock>) -> Self {
        Self {
            secret: secret.to_string(),
            access_ttl_secs,
            clock,
        }
    }

    /// 설정된 액세스 토큰 수명 (초)
    pub fn access_ttl_secs(&self) -> i64 {
        self.access_ttl_secs
    }

    /// 사용자를 위한 JWT 액세스 토큰 생성
    ///
    /// # Arguments
    ///
    /// * `user_id` - 토큰 주체 사용자 ID
    /// * `email` - 사용자 이메일
    /// * `role` - 사용자 역할
    ///
    /// # Returns
    ///
    /// * `Ok(IssuedAccessToken)` - 서명된 토큰과 클레임
    ///
    /// # Errors
    ///
    /// * `AuthError::Store` - 서명 실패 (키 구성 오류 등)
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let issued = issuer.issue_access("user-1", "coach@fitcoach.app", Role::Trainer)?;
    /// println!("jti: {}", issued.claims.jti);
    /// ```
    pub fn issue_access(
        &self,
        user_id: &str,
        email: &str,
        role: Role,
    ) -> Result<IssuedAccessToken, AuthError> {
        let now = self.clock.now();

        let claims = AccessTokenClaims {
            sub: user_id.to_string(),
            email: email.to_string(),
            role,
            jti: Uuid::new_v4().to_string(),
            iat: now.timestamp(),
            exp: now.timestamp() + self.access_ttl_secs,
        };

        let header = Header::default();
        let encoding_key = EncodingKey::from_secret(self.secret.as_ref());

        let token = encode(&header, &claims, &encoding_key)
            .map_err(|e| AuthError::Store(format!("JWT 토큰 생성 실패: {}", e)))?;

        Ok(IssuedAccessToken { token, claims })
    }

    /// JWT 토큰 검증 및 클레임 추출
    ///
    /// 서명과 형식을 먼저 검증한 뒤 주입된 시계로 만료를 판정합니다.
    /// 라이브러리의 `exp` 검증은 시스템 시계를 사용하므로 비활성화하고
    /// 직접 비교합니다.
    ///
    /// # Arguments
    ///
    /// * `token` - 검증할 JWT 토큰 문자열 (Bearer 접두사 제외)
    ///
    /// # Returns
    ///
    /// * `Ok(AccessTokenClaims)` - 검증된 토큰의 클레임 정보
    ///
    /// # Errors
    ///
    /// * `AuthError::Invalid` - 잘못된 형식, 서명 불일치
    /// * `AuthError::Expired` - 서명은 유효하나 만료 시각 경과
    pub fn verify_access(&self, token: &str) -> Result<AccessTokenClaims, AuthError> {
        let decoding_key = DecodingKey::from_secret(self.secret.as_ref());

        // 만료 판정은 주입된 시계로 직접 수행
        let mut validation = Validation::default();
        validation.validate_exp = false;
        validation.required_spec_claims = HashSet::new();

        let claims = decode::<AccessTokenClaims>(token, &decoding_key, &validation)
            .map(|token_data| token_data.claims)
            .map_err(|_| AuthError::Invalid)?;

        if claims.exp <= self.clock.now().timestamp() {
            return Err(AuthError::Expired);
        }

        Ok(claims)
    }

    /// Bearer 토큰에서 실제 토큰 부분 추출
    ///
    /// HTTP Authorization 헤더의 "Bearer {token}" 형식에서 토큰
    /// 부분만을 추출합니다.
    ///
    /// # Errors
    ///
    /// * `AuthError::Invalid` - 잘못된 헤더 형식
    pub fn extract_bearer_token<'a>(&self, auth_header: &'a str) -> Result<&'a str, AuthError> {
        auth_header
            .strip_prefix("Bearer ")
            .ok_or(AuthError::Invalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::ManualClock;
    use chrono::{Duration, Utc};

    fn issuer_with_clock(secret: &str) -> (TokenIssuer, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let issuer = TokenIssuer::new(secret, 900, clock.clone());
        (issuer, clock)
    }

    #[test]
    fn test_issue_and_verify_roundtrip() {
        let (issuer, _clock) = issuer_with_clock("test-secret");

        let issued = issuer
            .issue_access("user-1", "coach@fitcoach.app", Role::Trainer)
            .unwrap();
        let claims = issuer.verify_access(&issued.token).unwrap();

        assert_eq!(claims, issued.claims);
        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.role, Role::Trainer);
        assert_eq!(claims.exp - claims.iat, 900);
    }

    #[test]
    fn test_each_token_gets_fresh_jti() {
        let (issuer, _clock) = issuer_with_clock("test-secret");

        let a = issuer
            .issue_access("user-1", "coach@fitcoach.app", Role::Trainer)
            .unwrap();
        let b = issuer
            .issue_access("user-1", "coach@fitcoach.app", Role::Trainer)
            .unwrap();

        assert_ne!(a.claims.jti, b.claims.jti);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let (issuer, clock) = issuer_with_clock("test-secret");

        let issued = issuer
            .issue_access("user-1", "coach@fitcoach.app", Role::Client)
            .unwrap();

        clock.advance(Duration::minutes(16));

        assert_eq!(issuer.verify_access(&issued.token), Err(AuthError::Expired));
    }

    #[test]
    fn test_token_valid_until_exact_expiry() {
        let (issuer, clock) = issuer_with_clock("test-secret");

        let issued = issuer
            .issue_access("user-1", "coach@fitcoach.app", Role::Client)
            .unwrap();

        clock.advance(Duration::seconds(899));
        assert!(issuer.verify_access(&issued.token).is_ok());

        clock.advance(Duration::seconds(1));
        assert_eq!(issuer.verify_access(&issued.token), Err(AuthError::Expired));
    }

    #[test]
    fn test_wrong_secret_is_invalid() {
        let (issuer, _clock) = issuer_with_clock("test-secret");
        let (other, _clock2) = issuer_with_clock("other-secret");

        let issued = issuer
            .issue_access("user-1", "coach@fitcoach.app", Role::Admin)
            .unwrap();

        assert_eq!(other.verify_access(&issued.token), Err(AuthError::Invalid));
    }

    #[test]
    fn test_tampered_token_is_invalid() {
        let (issuer, _clock) = issuer_with_clock("test-secret");

        let issued = issuer
            .issue_access("user-1", "coach@fitcoach.app", Role::Client)
            .unwrap();

        let mut tampered = issued.token.clone();
        tampered.push('x');

        assert_eq!(issuer.verify_access(&tampered), Err(AuthError::Invalid));
        assert_eq!(issuer.verify_access("not-a-jwt"), Err(AuthError::Invalid));
    }

    #[test]
    fn test_extract_bearer_token() {
        let (issuer, _clock) = issuer_with_clock("test-secret");

        assert_eq!(issuer.extract_bearer_token("Bearer abc").unwrap(), "abc");
        assert_eq!(
            issuer.extract_bearer_token("Basic abc"),
            Err(AuthError::Invalid)
        );
    }
}
