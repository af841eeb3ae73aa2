//! 인증 요청관련 DTO
//!
//! 인증을 요청하는 클라이언트의 요청 정보를 매핑합니다.
use serde::Deserialize;
use validator::Validate;

/// 로그인 요청 구조체
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    #[validate(length(min = 1, message = "비밀번호를 입력해주세요"))]
    pub password: String,

    /// 디바이스 정보 (세션 목록 표시용, 선택)
    pub device_info: Option<String>,
}

/// 토큰 갱신 요청 구조체
#[derive(Debug, Deserialize, Validate)]
pub struct RefreshRequest {
    #[validate(length(min = 1, message = "리프레시 토큰이 필요합니다"))]
    pub refresh_token: String,

    pub device_info: Option<String>,
}

/// 로그아웃 요청 구조체
///
/// `refresh_token`이 있으면 해당 세션을 함께 무효화합니다.
/// `logout_from_all`이 true면 사용자의 모든 세션을 무효화합니다.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct LogoutRequest {
    pub refresh_token: Option<String>,

    #[serde(default)]
    pub logout_from_all: bool,
}
