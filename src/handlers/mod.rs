//! # Handler Module
//!
//! HTTP 요청 핸들러를 제공하는 모듈입니다. 핸들러는 얇은 접착
//! 계층으로, 입력 검증과 클라이언트 정보 추출 후 [`AppState`]의
//! 서비스에 위임합니다.
//!
//! [`AppState`]: crate::core::state::AppState

use actix_web::HttpRequest;

pub mod auth;
pub mod sessions;

/// HTTP 요청에서 클라이언트 IP 주소 추출
///
/// 프록시나 로드 밸런서를 고려하여 다양한 헤더에서 실제 클라이언트 IP를 추출합니다.
///
/// # 우선순위
/// 1. `X-Forwarded-For` (첫 번째 IP)
/// 2. `X-Real-IP`
/// 3. `X-Client-IP`
/// 4. `CF-Connecting-IP` (Cloudflare)
/// 5. 연결 정보에서 peer 주소
pub(crate) fn extract_client_ip(req: &HttpRequest) -> Option<String> {
    // X-Forwarded-For 헤더 확인 (프록시 환경에서 가장 일반적)
    if let Some(forwarded_for) = req.headers().get("X-Forwarded-For") {
        if let Ok(forwarded_str) = forwarded_for.to_str() {
            // 첫 번째 IP만 사용 (체인의 첫 번째가 원본 클라이언트)
            if let Some(first_ip) = forwarded_str.split(',').next() {
                let trimmed_ip = first_ip.trim();
                if !trimmed_ip.is_empty() {
                    return Some(trimmed_ip.to_string());
                }
            }
        }
    }

    // X-Real-IP 헤더 확인
    if let Some(real_ip) = req.headers().get("X-Real-IP") {
        if let Ok(ip_str) = real_ip.to_str() {
            return Some(ip_str.to_string());
        }
    }

    // X-Client-IP 헤더 확인
    if let Some(client_ip) = req.headers().get("X-Client-IP") {
        if let Ok(ip_str) = client_ip.to_str() {
            return Some(ip_str.to_string());
        }
    }

    // CF-Connecting-IP 헤더 확인 (Cloudflare)
    if let Some(cf_ip) = req.headers().get("CF-Connecting-IP") {
        if let Ok(ip_str) = cf_ip.to_str() {
            return Some(ip_str.to_string());
        }
    }

    // 마지막으로 연결 정보에서 peer 주소 사용
    req.peer_addr().map(|addr| addr.ip().to_string())
}

/// HTTP 요청에서 User-Agent 추출
pub(crate) fn extract_user_agent(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get("User-Agent")
        .and_then(|h| h.to_str().ok())
        .map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_forwarded_for_takes_first_ip() {
        let req = TestRequest::default()
            .insert_header(("X-Forwarded-For", "203.0.113.7, 10.0.0.1"))
            .insert_header(("X-Real-IP", "10.0.0.2"))
            .to_http_request();

        assert_eq!(extract_client_ip(&req).as_deref(), Some("203.0.113.7"));
    }

    #[test]
    fn test_real_ip_fallback() {
        let req = TestRequest::default()
            .insert_header(("X-Real-IP", "198.51.100.4"))
            .to_http_request();

        assert_eq!(extract_client_ip(&req).as_deref(), Some("198.51.100.4"));
    }

    #[test]
    fn test_user_agent_extraction() {
        let req = TestRequest::default()
            .insert_header(("User-Agent", "FitCoach/1.0"))
            .to_http_request();

        assert_eq!(extract_user_agent(&req).as_deref(), Some("FitCoach/1.0"));
    }
}
