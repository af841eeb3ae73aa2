//! 보안 감사 싱크 구현
//!
//! 감사 기록은 진단용 부수 출력입니다. 싱크 실패는 호출 측에서
//! 경고 로그만 남기고 계속 진행합니다 (log-and-continue). 기록
//! 실패가 로그인이나 갱신의 결과를 바꾸는 일은 없습니다.

use async_trait::async_trait;

use crate::core::errors::StoreError;
use crate::domain::models::SecurityAuditEvent;

/// 감사 이벤트 수신 trait
///
/// 운영 환경에서는 로그 파사드 구현([`LogAuditSink`])을 사용하고,
/// 테스트에서는 이벤트를 수집하는 구현으로 교체할 수 있습니다.
#[async_trait]
pub trait AuditSink: Send + Sync {
    /// 이벤트를 기록합니다.
    async fn emit(&self, event: &SecurityAuditEvent) -> Result<(), StoreError>;
}

/// `log` 파사드 기반 감사 싱크
///
/// 성공 이벤트는 info, 실패 이벤트는 warn 레벨로 기록합니다.
#[derive(Default)]
pub struct LogAuditSink;

impl LogAuditSink {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AuditSink for LogAuditSink {
    async fn emit(&self, event: &SecurityAuditEvent) -> Result<(), StoreError> {
        let user = event.user_id.as_deref().unwrap_or("-");
        let ip = event.ip_address.as_deref().unwrap_or("-");

        if event.success {
            log::info!(
                "감사 이벤트: {} 사용자={} ip={}",
                event.event_type.as_str(),
                user,
                ip
            );
        } else {
            log::warn!(
                "감사 이벤트: {} 사용자={} ip={} 사유={}",
                event.event_type.as_str(),
                user,
                ip,
                event.reason.as_deref().unwrap_or("-")
            );
        }

        Ok(())
    }
}
