//! # Application Error Handling System
//!
//! 토큰/세션 수명주기 서비스를 위한 통합 에러 처리 시스템입니다.
//! 예외 기반 제어 흐름 대신 Rust의 타입 시스템으로 모든 실패를
//! 값으로 표현하여 안전하고 일관된 에러 처리를 제공합니다.
//!
//! ## 설계 철학
//!
//! ### 1. 계층화된 에러 분류
//! - **도메인 에러(`AuthError`)**: 보안 로직이 반환하는 의미론적 실패 분류
//! - **HTTP 에러(`AppError`)**: 프레젠테이션 계층 전용, 상태 코드와 직접 매핑
//! - **저장소 에러(`StoreError`)**: 스토어 구현체의 일시적 장애 표현
//!
//! ### 2. 자동 HTTP 응답 변환
//! - **ResponseError 구현**: Actix-Web과 완전 통합
//! - **일관된 응답 형식**: 모든 에러에 대한 표준화된 JSON 응답
//! - **적절한 상태 코드**: 에러 타입에 따른 자동 HTTP 상태 코드 매핑
//!
//! ### 3. 정보 노출 최소화
//! - 자격 증명 실패와 계정 비활성은 동일한 메시지로 수렴
//! - 리프레시 토큰의 재사용/만료/위조는 `InvalidOrReused` 하나로 수렴
//!
//! ## HTTP 응답 매핑
//!
//! | AppError | HTTP Status | 사용 시나리오 |
//! |----------|-------------|---------------|
//! | `ValidationError` | 400 Bad Request | 입력값 검증 실패 |
//! | `AuthenticationError` | 401 Unauthorized | 토큰/자격 증명 실패 |
//! | `AuthorizationError` | 403 Forbidden | 권한 부족 |
//! | `NotFound` | 404 Not Found | 리소스 없음 |
//! | `AccountLocked` | 423 Locked | 로그인 시도 초과로 계정 잠김 |
//! | `StoreError` | 500 Internal Server Error | 스토어 일시 장애 |
//! | `InternalError` | 500 Internal Server Error | 예상치 못한 오류 |

use thiserror::Error;

/// 스토어 구현체의 일시적 장애
///
/// Redis 통신 실패, 뮤텍스 오염 등 저장소 계층에서 발생하는
/// 일시적 오류를 나타냅니다. 보안 판정과 혼동되지 않도록
/// 별도 타입으로 분리되어 있으며, 재시도 없이 즉시 전파됩니다.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Store error: {0}")]
pub struct StoreError(pub String);

impl From<redis::RedisError> for StoreError {
    fn from(e: redis::RedisError) -> Self {
        StoreError(e.to_string())
    }
}

/// 보안 도메인 에러 타입
///
/// 토큰 발급/검증, 세션 순환, 계정 잠금 등 보안 로직이 반환할 수 있는
/// 모든 실패를 포괄하는 열거형입니다. 각 변형의 메시지는 클라이언트에
/// 그대로 노출되어도 안전하도록 설계되어 있습니다.
///
/// ## 에러 카테고리
///
/// ### 1. 액세스 토큰 에러
/// - `Expired`: 서명은 유효하나 만료 시각이 지남
/// - `Invalid`: 서명 불일치, 형식 오류 등 그 외 모든 검증 실패
/// - `Revoked`: 검증은 통과했으나 무효화 캐시에 등재됨
///
/// ### 2. 리프레시 토큰 에러
/// - `InvalidOrReused`: 미발급/만료/재사용 여부를 구분하지 않는 단일 실패
///   (구분 노출 시 공격자에게 토큰 유효성 정보를 제공하게 됨)
///
/// ### 3. 계정 상태 에러
/// - `AccountLocked`: 로그인 시도 초과, 남은 잠금 시간(분)을 포함
/// - `InvalidCredentials`: 잘못된 이메일/비밀번호 (계정 존재 여부 비노출)
///
/// ### 4. 일반 에러
/// - `NotFound`: 요청된 세션 등 리소스가 호출자 소유가 아니거나 없음
/// - `Store`: 저장소 일시 장애
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AuthError {
    /// 액세스 토큰 만료
    #[error("Token has expired")]
    Expired,

    /// 액세스 토큰 서명/형식 오류
    #[error("Invalid token")]
    Invalid,

    /// 무효화 캐시에 등재된 토큰
    #[error("Token has been revoked")]
    Revoked,

    /// 리프레시 토큰 실패 (미발급/만료/재사용을 구분하지 않음)
    #[error("Invalid or expired refresh token")]
    InvalidOrReused,

    /// 로그인 시도 초과로 계정 잠김
    ///
    /// `remaining_minutes`는 남은 잠금 시간을 분 단위 올림으로 계산한
    /// 값이며 항상 1 이상입니다.
    #[error("Account is locked. Try again in {remaining_minutes} minutes.")]
    AccountLocked { remaining_minutes: i64 },

    /// 잘못된 자격 증명 (계정 존재/활성 여부를 노출하지 않음)
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// 리소스 없음 또는 소유권 불일치
    #[error("Not found: {0}")]
    NotFound(String),

    /// 저장소 일시 장애
    #[error("Store error: {0}")]
    Store(String),
}

impl From<StoreError> for AuthError {
    fn from(e: StoreError) -> Self {
        AuthError::Store(e.0)
    }
}

/// 애플리케이션 전역 HTTP 에러 타입
///
/// HTTP 경계에서 사용되는 에러 열거형입니다. `thiserror`로 `Error` trait을
/// 자동 구현하고, `actix_web::ResponseError`를 구현하여 핸들러의 `Err`가
/// 적절한 상태 코드의 JSON 응답으로 자동 변환됩니다.
///
/// 도메인 계층의 [`AuthError`]는 `From` 구현을 통해 이 타입으로 승격되므로
/// 핸들러에서는 `?` 연산자만으로 변환이 완료됩니다.
#[derive(Error, Debug)]
pub enum AppError {
    /// 입력값 검증 실패 (400)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 인증 실패 (401) - 토큰 만료/위조, 자격 증명 오류
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// 권한 부족 (403)
    #[error("Authorization error: {0}")]
    AuthorizationError(String),

    /// 리소스 없음 (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// 계정 잠김 (423)
    #[error("{0}")]
    AccountLocked(String),

    /// 저장소 오류 (500)
    #[error("Store error: {0}")]
    StoreError(String),

    /// 내부 서버 에러 (500)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl From<AuthError> for AppError {
    /// 도메인 에러를 HTTP 에러로 승격합니다.
    ///
    /// 모든 토큰/자격 증명 실패는 401, 계정 잠김은 423, 소유권 불일치는
    /// 404, 저장소 장애는 500으로 매핑됩니다. 메시지는 도메인 에러의
    /// `Display` 출력을 그대로 사용합니다 (노출 안전성은 도메인 계층에서
    /// 이미 보장됨).
    fn from(e: AuthError) -> Self {
        match &e {
            AuthError::Expired
            | AuthError::Invalid
            | AuthError::Revoked
            | AuthError::InvalidOrReused
            | AuthError::InvalidCredentials => AppError::AuthenticationError(e.to_string()),
            AuthError::AccountLocked { .. } => AppError::AccountLocked(e.to_string()),
            AuthError::NotFound(msg) => AppError::NotFound(msg.clone()),
            AuthError::Store(msg) => AppError::StoreError(msg.clone()),
        }
    }
}

impl actix_web::ResponseError for AppError {
    /// HTTP 에러 응답을 생성합니다.
    ///
    /// 각 `AppError` 변형을 적절한 HTTP 상태 코드와 JSON 응답으로 변환합니다.
    ///
    /// # 응답 형식
    ///
    /// ```json
    /// {
    ///   "error": "Human readable error message"
    /// }
    /// ```
    fn error_response(&self) -> actix_web::HttpResponse {
        use actix_web::http::StatusCode;

        let status = match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            AppError::AuthorizationError(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::AccountLocked(_) => StatusCode::LOCKED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        actix_web::HttpResponse::build(status)
            .json(serde_json::json!({
                "error": self.to_string()
            }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::ResponseError;

    #[test]
    fn test_validation_error_response() {
        let error = AppError::ValidationError("Email is required".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_authentication_error_response() {
        let error = AppError::from(AuthError::Expired);
        let response = error.error_response();

        assert_eq!(response.status(), actix_web::http::StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_account_locked_maps_to_423() {
        let error = AppError::from(AuthError::AccountLocked { remaining_minutes: 15 });
        let response = error.error_response();

        assert_eq!(response.status(), actix_web::http::StatusCode::LOCKED);
    }

    #[test]
    fn test_account_locked_message_contains_minutes() {
        let error = AuthError::AccountLocked { remaining_minutes: 15 };

        assert_eq!(
            error.to_string(),
            "Account is locked. Try again in 15 minutes."
        );
    }

    #[test]
    fn test_not_found_error_response() {
        let error = AppError::from(AuthError::NotFound("Session not found".to_string()));
        let response = error.error_response();

        assert_eq!(response.status(), actix_web::http::StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_store_error_maps_to_500() {
        let error = AppError::from(AuthError::Store("connection refused".to_string()));
        let response = error.error_response();

        assert_eq!(
            response.status(),
            actix_web::http::StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_refresh_failures_collapse_to_one_message() {
        // 재사용/만료/위조가 같은 메시지로 수렴하는지 확인
        assert_eq!(
            AuthError::InvalidOrReused.to_string(),
            "Invalid or expired refresh token"
        );
    }

    #[test]
    fn test_store_error_conversion() {
        let store_err = StoreError("poisoned lock".to_string());
        let auth_err: AuthError = store_err.into();

        assert_eq!(auth_err, AuthError::Store("poisoned lock".to_string()));
    }
}
