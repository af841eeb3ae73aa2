//! # Account Lockout Model
//!
//! 브루트포스 방어용 계정 잠금 상태 모델입니다.
//! 잠금은 사용자 ID 단위로만 추적됩니다. 분산 공격에서 IP 기준
//! 잠금은 우회가 쉽고, 보호 대상은 계정이기 때문입니다. IP는 감사
//! 기록에만 남습니다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 사용자별 로그인 실패 추적 상태
///
/// ## 상태 전이
///
/// - **Clear** (`failed_attempts == 0`): 정상 상태
/// - **Warned** (`0 < failed_attempts < max`): 실패 누적 중
/// - **Locked** (`locked_until`이 미래): 로그인 시도 자체가 거부됨
///
/// 잠금 해제는 지연 평가됩니다. `locked_until`이 지난 뒤의 다음
/// 시도에서 상태가 초기화되며, 백그라운드 해제 작업은 없습니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountLockout {
    /// 사용자 ID
    pub user_id: String,
    /// 누적 실패 횟수
    pub failed_attempts: u32,
    /// 마지막 실패 시각
    pub last_attempt_at: Option<DateTime<Utc>>,
    /// 잠금 만료 시각 (None이면 잠기지 않음)
    pub locked_until: Option<DateTime<Utc>>,
    /// 마지막 해제 시각 (성공 로그인 또는 잠금 만료 후 초기화)
    pub unlocked_at: Option<DateTime<Utc>>,
}

impl AccountLockout {
    /// 초기 Clear 상태를 생성합니다.
    pub fn clear(user_id: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            failed_attempts: 0,
            last_attempt_at: None,
            locked_until: None,
            unlocked_at: None,
        }
    }

    /// 주어진 시각 기준으로 잠금이 유효한지 검사합니다.
    pub fn is_locked(&self, now: DateTime<Utc>) -> bool {
        match self.locked_until {
            Some(until) => until > now,
            None => false,
        }
    }
}
