//! # Session Model
//!
//! 리프레시 토큰으로 대표되는 디바이스 세션 모델입니다.
//! 원본 리프레시 토큰은 어디에도 저장되지 않으며, SHA-256 해시만
//! 저장소 키로 사용됩니다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 디바이스 세션
///
/// 한 디바이스의 로그인 상태를 나타냅니다. `refresh_token_hash`는
/// 발급된 리프레시 토큰의 SHA-256 해시이며, 저장소의 조회 키입니다.
/// 토큰 순환 시 이 행은 원자적으로 삭제되고 새 행으로 교체됩니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// 세션 고유 ID (UUIDv4)
    pub id: String,
    /// 소유 사용자 ID
    pub user_id: String,
    /// 리프레시 토큰의 SHA-256 해시 (base64url)
    pub refresh_token_hash: String,
    /// 디바이스 정보 (User-Agent 등)
    pub device_info: Option<String>,
    /// 접속 IP 주소
    pub ip_address: Option<String>,
    /// 세션 생성 시각
    pub created_at: DateTime<Utc>,
    /// 마지막 활동 시각 (순환 시 갱신)
    pub last_activity_at: DateTime<Utc>,
    /// 세션 만료 시각
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// 주어진 시각 기준으로 세션이 만료되었는지 검사합니다.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }

    /// 토큰 해시를 제거한 조회용 뷰를 생성합니다.
    pub fn to_view(&self) -> SessionView {
        SessionView {
            id: self.id.clone(),
            device_info: self.device_info.clone(),
            ip_address: self.ip_address.clone(),
            created_at: self.created_at,
            last_activity_at: self.last_activity_at,
            expires_at: self.expires_at,
        }
    }
}

/// 세션 목록 조회용 뷰
///
/// 클라이언트에 노출되는 세션 표현입니다. 토큰 해시는 포함되지
/// 않습니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionView {
    /// 세션 고유 ID
    pub id: String,
    /// 디바이스 정보
    pub device_info: Option<String>,
    /// 접속 IP 주소
    pub ip_address: Option<String>,
    /// 세션 생성 시각
    pub created_at: DateTime<Utc>,
    /// 마지막 활동 시각
    pub last_activity_at: DateTime<Utc>,
    /// 세션 만료 시각
    pub expires_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample_session(now: DateTime<Utc>) -> Session {
        Session {
            id: "session-1".to_string(),
            user_id: "user-1".to_string(),
            refresh_token_hash: "hash".to_string(),
            device_info: Some("iPhone".to_string()),
            ip_address: Some("10.0.0.1".to_string()),
            created_at: now,
            last_activity_at: now,
            expires_at: now + Duration::days(7),
        }
    }

    #[test]
    fn test_session_expiry_boundary() {
        let now = Utc::now();
        let session = sample_session(now);

        assert!(!session.is_expired(now));
        assert!(!session.is_expired(now + Duration::days(7) - Duration::seconds(1)));
        // 경계 시각은 만료로 취급
        assert!(session.is_expired(now + Duration::days(7)));
    }

    #[test]
    fn test_view_omits_token_hash() {
        let now = Utc::now();
        let session = sample_session(now);
        let view = session.to_view();

        let json = serde_json::to_string(&view).unwrap();
        assert!(!json.contains("hash"));
        assert!(json.contains("session-1"));
    }
}
