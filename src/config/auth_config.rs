//! # Authentication Configuration Module
//!
//! JWT 토큰, 세션 수명, 계정 잠금 정책 등 인증 관련 설정을 관리하는
//! 모듈입니다. 환경 변수는 `from_env()` 호출 시 한 번만 읽히며,
//! 이후 모든 구성 요소는 이 구조체의 복사본을 생성자로 받습니다.
//!
//! ## 필수 환경 변수 설정
//!
//! ```bash
//! export ACCESS_TOKEN_SECRET="your-super-secret-256-bit-key"
//! export ACCESS_TOKEN_TTL="15m"
//! export REFRESH_TOKEN_TTL="7d"
//! export MAX_LOGIN_ATTEMPTS="5"
//! export LOCKOUT_DURATION_MS="900000"
//! ```
//!
//! ## TTL 형식
//!
//! `90s`, `15m`, `2h`, `7d` 형식을 지원합니다. 접미사 없는 숫자는
//! 초 단위로 해석됩니다.
//!
//! ## 보안 고려사항
//!
//! - `ACCESS_TOKEN_SECRET`은 최소 256비트 랜덤 키를 사용하세요
//! - `PROFILE=prod`에서 개발용 기본 시크릿이 감지되면 기동이 거부됩니다
//!
//! ```bash
//! # 안전한 시크릿 생성
//! openssl rand -base64 32
//! ```

use std::env;

use log::{error, warn};

/// 개발 환경용 기본 시크릿 (운영 프로파일에서는 거부됨)
const DEV_SECRET: &str = "dev-access-secret";

/// 인증 설정 객체
///
/// 토큰 발급기, 세션 레지스트리, 무효화 캐시, 잠금 가드가 공유하는
/// 모든 정책 값을 담습니다. 각 구성 요소는 필요한 필드만 복사해
/// 보관하므로 이 구조체 자체는 기동 시에만 사용됩니다.
///
/// # 환경 변수 매핑
///
/// | 필드 | 환경 변수 | 기본값 |
/// |------|-----------|--------|
/// | `access_token_secret` | `ACCESS_TOKEN_SECRET` | `dev-access-secret` |
/// | `access_token_ttl_secs` | `ACCESS_TOKEN_TTL` | `15m` (900초) |
/// | `refresh_token_ttl_secs` | `REFRESH_TOKEN_TTL` | `7d` (604800초) |
/// | `max_login_attempts` | `MAX_LOGIN_ATTEMPTS` | `5` |
/// | `lockout_duration_ms` | `LOCKOUT_DURATION_MS` | `900000` (15분) |
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HS256 서명 시크릿
    pub access_token_secret: String,
    /// 액세스 토큰 수명 (초)
    pub access_token_ttl_secs: i64,
    /// 리프레시 토큰(세션) 최대 수명 (초)
    pub refresh_token_ttl_secs: i64,
    /// 계정 잠금 임계 실패 횟수
    pub max_login_attempts: u32,
    /// 계정 잠금 지속 시간 (밀리초)
    pub lockout_duration_ms: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            access_token_secret: DEV_SECRET.to_string(),
            access_token_ttl_secs: 900,
            refresh_token_ttl_secs: 604_800,
            max_login_attempts: 5,
            lockout_duration_ms: 900_000,
        }
    }
}

impl AuthConfig {
    /// 환경 변수에서 설정을 로드합니다.
    ///
    /// 누락되거나 파싱할 수 없는 값은 경고 로그와 함께 기본값으로
    /// 대체됩니다. `PROFILE=prod`에서 시크릿이 개발용 기본값이면
    /// 패닉으로 기동을 중단합니다.
    ///
    /// # Panics
    ///
    /// * `PROFILE=prod`이면서 `ACCESS_TOKEN_SECRET`이 미설정 또는
    ///   개발용 기본값인 경우
    pub fn from_env() -> Self {
        let access_token_secret = env::var("ACCESS_TOKEN_SECRET").unwrap_or_else(|_| {
            warn!("ACCESS_TOKEN_SECRET 미설정, 개발용 기본값 사용 (운영 환경에서는 안전하지 않음!)");
            DEV_SECRET.to_string()
        });

        let profile = env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());
        if profile == "prod" && access_token_secret == DEV_SECRET {
            panic!("ACCESS_TOKEN_SECRET must be set to a strong value when PROFILE=prod");
        }

        let access_token_ttl_secs = load_ttl("ACCESS_TOKEN_TTL", 900);
        let refresh_token_ttl_secs = load_ttl("REFRESH_TOKEN_TTL", 604_800);

        let max_login_attempts = env::var("MAX_LOGIN_ATTEMPTS")
            .unwrap_or_else(|_| "5".to_string())
            .parse::<u32>()
            .unwrap_or_else(|e| {
                error!("MAX_LOGIN_ATTEMPTS 파싱 실패: {}. 기본값 5 사용", e);
                5
            });

        let lockout_duration_ms = env::var("LOCKOUT_DURATION_MS")
            .unwrap_or_else(|_| "900000".to_string())
            .parse::<i64>()
            .unwrap_or_else(|e| {
                error!("LOCKOUT_DURATION_MS 파싱 실패: {}. 기본값 900000 사용", e);
                900_000
            });

        Self {
            access_token_secret,
            access_token_ttl_secs,
            refresh_token_ttl_secs,
            max_login_attempts,
            lockout_duration_ms,
        }
    }
}

/// TTL 환경 변수를 초 단위로 로드합니다.
fn load_ttl(var: &str, default_secs: i64) -> i64 {
    match env::var(var) {
        Ok(raw) => parse_ttl(&raw).unwrap_or_else(|| {
            error!("{} 파싱 실패: '{}'. 기본값 {}초 사용", var, raw, default_secs);
            default_secs
        }),
        Err(_) => default_secs,
    }
}

/// TTL 문자열을 초 단위로 파싱합니다.
///
/// `90s`, `15m`, `2h`, `7d` 형식과 접미사 없는 초 단위 숫자를
/// 지원합니다. 인식할 수 없는 형식은 `None`을 반환합니다.
///
/// # Examples
///
/// ```rust,ignore
/// assert_eq!(parse_ttl("15m"), Some(900));
/// assert_eq!(parse_ttl("7d"), Some(604800));
/// assert_eq!(parse_ttl("banana"), None);
/// ```
pub fn parse_ttl(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let (digits, multiplier) = match raw.as_bytes()[raw.len() - 1] {
        b's' => (&raw[..raw.len() - 1], 1),
        b'm' => (&raw[..raw.len() - 1], 60),
        b'h' => (&raw[..raw.len() - 1], 3_600),
        b'd' => (&raw[..raw.len() - 1], 86_400),
        _ => (raw, 1),
    };

    let value = digits.parse::<i64>().ok()?;
    if value <= 0 {
        return None;
    }

    Some(value * multiplier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ttl_seconds() {
        assert_eq!(parse_ttl("90s"), Some(90));
        assert_eq!(parse_ttl("45"), Some(45));
    }

    #[test]
    fn test_parse_ttl_minutes() {
        assert_eq!(parse_ttl("15m"), Some(900));
    }

    #[test]
    fn test_parse_ttl_hours() {
        assert_eq!(parse_ttl("2h"), Some(7200));
    }

    #[test]
    fn test_parse_ttl_days() {
        assert_eq!(parse_ttl("7d"), Some(604_800));
    }

    #[test]
    fn test_parse_ttl_rejects_garbage() {
        assert_eq!(parse_ttl(""), None);
        assert_eq!(parse_ttl("banana"), None);
        assert_eq!(parse_ttl("-5m"), None);
        assert_eq!(parse_ttl("0s"), None);
    }

    #[test]
    fn test_default_config_matches_policy() {
        let config = AuthConfig::default();

        assert_eq!(config.access_token_ttl_secs, 900);
        assert_eq!(config.refresh_token_ttl_secs, 604_800);
        assert_eq!(config.max_login_attempts, 5);
        assert_eq!(config.lockout_duration_ms, 900_000);
    }
}
