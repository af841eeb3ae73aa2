//! 인증 응답관련 DTO

use serde::{Deserialize, Serialize};

use crate::domain::models::TokenPair;

/// 표준 API 응답 래퍼
///
/// 모든 성공 응답은 `{ success, data, message }` 형식을 따릅니다.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    /// 데이터를 담은 성공 응답을 생성합니다.
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    /// 메시지만 담은 성공 응답을 생성합니다.
    pub fn message(message: &str) -> Self {
        Self {
            success: true,
            data: None,
            message: Some(message.to_string()),
        }
    }
}

/// 토큰 발급 응답 구조체
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// 액세스 토큰 수명 (초)
    pub expires_in: i64,
    pub token_type: String,
}

impl From<TokenPair> for TokenResponse {
    fn from(pair: TokenPair) -> Self {
        Self {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            expires_in: pair.expires_in,
            token_type: "Bearer".to_string(),
        }
    }
}

/// 세션 무효화 결과 응답 구조체
#[derive(Debug, Serialize, Deserialize)]
pub struct RevokedResponse {
    /// 무효화된 세션 수
    pub revoked_sessions: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_response_bearer_type() {
        let pair = TokenPair {
            access_token: "jwt".to_string(),
            refresh_token: "opaque".to_string(),
            expires_in: 900,
        };
        let response = TokenResponse::from(pair);

        assert_eq!(response.token_type, "Bearer");
        assert_eq!(response.expires_in, 900);
    }

    #[test]
    fn test_api_response_omits_empty_fields() {
        let response: ApiResponse<()> = ApiResponse::message("로그아웃 되었습니다");
        let json = serde_json::to_string(&response).unwrap();

        assert!(!json.contains("data"));
        assert!(json.contains("success"));
    }
}
