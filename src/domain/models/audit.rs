//! # Security Audit Model
//!
//! 보안 관련 이벤트의 감사 기록 모델입니다.
//! 감사 기록은 진단용 부수 출력이며, 기록 실패가 본 연산의 결과를
//! 바꾸지 않습니다 (log-and-continue).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 감사 이벤트 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditEventType {
    /// 로그인 성공
    Login,
    /// 로그인 실패
    LoginFailed,
    /// 로그아웃
    Logout,
    /// 토큰 갱신
    TokenRefresh,
    /// 계정 잠금 발동
    AccountLocked,
    /// 리프레시 토큰 재사용 의심
    RefreshReuseSuspected,
    /// 전체 세션 무효화
    SessionsRevoked,
    /// 단일 세션 무효화
    SessionRevoked,
}

impl AuditEventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditEventType::Login => "login",
            AuditEventType::LoginFailed => "login_failed",
            AuditEventType::Logout => "logout",
            AuditEventType::TokenRefresh => "token_refresh",
            AuditEventType::AccountLocked => "account_locked",
            AuditEventType::RefreshReuseSuspected => "refresh_reuse_suspected",
            AuditEventType::SessionsRevoked => "sessions_revoked",
            AuditEventType::SessionRevoked => "session_revoked",
        }
    }
}

/// 보안 감사 이벤트
///
/// 로그인/로그아웃/갱신/잠금 등 보안 관련 연산의 기록 단위입니다.
/// `user_id`는 사용자를 특정할 수 없는 실패(미등록 이메일 등)에서는
/// 비어 있을 수 있습니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityAuditEvent {
    /// 이벤트 종류
    pub event_type: AuditEventType,
    /// 대상 사용자 ID (특정 불가 시 None)
    pub user_id: Option<String>,
    /// 연산 성공 여부
    pub success: bool,
    /// 실패 사유 (성공 시 None)
    pub reason: Option<String>,
    /// 클라이언트 IP
    pub ip_address: Option<String>,
    /// User-Agent
    pub user_agent: Option<String>,
    /// 이벤트 발생 시각
    pub occurred_at: DateTime<Utc>,
}

impl SecurityAuditEvent {
    /// 성공 이벤트를 생성합니다.
    pub fn success(
        event_type: AuditEventType,
        user_id: &str,
        occurred_at: DateTime<Utc>,
    ) -> Self {
        Self {
            event_type,
            user_id: Some(user_id.to_string()),
            success: true,
            reason: None,
            ip_address: None,
            user_agent: None,
            occurred_at,
        }
    }

    /// 실패 이벤트를 생성합니다.
    pub fn failure(
        event_type: AuditEventType,
        user_id: Option<&str>,
        reason: &str,
        occurred_at: DateTime<Utc>,
    ) -> Self {
        Self {
            event_type,
            user_id: user_id.map(|s| s.to_string()),
            success: false,
            reason: Some(reason.to_string()),
            ip_address: None,
            user_agent: None,
            occurred_at,
        }
    }

    /// 클라이언트 정보를 부착합니다.
    pub fn with_client(
        mut self,
        ip_address: Option<String>,
        user_agent: Option<String>,
    ) -> Self {
        self.ip_address = ip_address;
        self.user_agent = user_agent;
        self
    }
}
