//! 브루트포스 방어 잠금 가드 구현
//!
//! 사용자별 로그인 실패를 추적하고, 임계치 도달 시 일정 시간 동안
//! 로그인 시도 자체를 거부합니다. 잠금 검사는 비밀번호 검증보다
//! 먼저 수행되므로, 잠긴 계정에는 올바른 비밀번호로도 로그인할 수
//! 없습니다.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use crate::core::clock::Clock;
use crate::core::errors::AuthError;
use crate::repositories::lockouts::LockoutStore;

/// 실패 기록 결과
#[derive(Debug, Clone, PartialEq)]
pub struct FailureOutcome {
    /// 갱신된 누적 실패 횟수
    pub failed_attempts: u32,
    /// 잠금 만료 시각 (이번 실패로 잠겼거나 이미 잠긴 경우)
    pub locked_until: Option<DateTime<Utc>>,
    /// 이번 실패로 잠금이 새로 발동했는지 여부
    pub newly_locked: bool,
}

/// 계정 잠금 가드
pub struct LockoutGuard {
    store: Arc<dyn LockoutStore>,
    clock: Arc<dyn Clock>,
    max_attempts: u32,
    lockout_duration_ms: i64,
}

impl LockoutGuard {
    pub fn new(
        store: Arc<dyn LockoutStore>,
        clock: Arc<dyn Clock>,
        max_attempts: u32,
        lockout_duration_ms: i64,
    ) -> Self {
        Self {
            store,
            clock,
            max_attempts,
            lockout_duration_ms,
        }
    }

    fn lock_duration(&self) -> Duration {
        Duration::milliseconds(self.lockout_duration_ms)
    }

    /// 계정이 잠겨 있지 않음을 보장합니다.
    ///
    /// 로그인 플로우의 첫 검사로, 비밀번호 검증 전에 호출됩니다.
    ///
    /// # Errors
    ///
    /// * `AuthError::AccountLocked` - 잠금이 유효한 경우. 남은 시간은
    ///   분 단위 올림이며 항상 1 이상입니다.
    pub async fn ensure_not_locked(&self, user_id: &str) -> Result<(), AuthError> {
        let now = self.clock.now();
        let state = self.store.fetch(user_id).await?;

        if let Some(until) = state.locked_until {
            if until > now {
                let remaining_ms = (until - now).num_milliseconds();
                // 분 단위 올림, 최소 1분
                let remaining_minutes = ((remaining_ms + 59_999) / 60_000).max(1);
                return Err(AuthError::AccountLocked { remaining_minutes });
            }
        }

        Ok(())
    }

    /// 로그인 실패를 기록합니다.
    ///
    /// 임계치 도달 시 잠금이 발동하며, `newly_locked`로 발동 여부를
    /// 알 수 있습니다 (감사 이벤트 `account_locked`의 트리거).
    pub async fn record_failure(&self, user_id: &str) -> Result<FailureOutcome, AuthError> {
        let now = self.clock.now();
        let before = self.store.fetch(user_id).await?;
        let was_locked = before.is_locked(now);

        let state = self
            .store
            .apply_failure(user_id, now, self.max_attempts, self.lock_duration())
            .await?;

        Ok(FailureOutcome {
            failed_attempts: state.failed_attempts,
            locked_until: state.locked_until,
            newly_locked: !was_locked && state.locked_until.is_some(),
        })
    }

    /// 성공 로그인 후 실패 기록을 초기화합니다.
    pub async fn reset(&self, user_id: &str) -> Result<(), AuthError> {
        Ok(self.store.clear(user_id, self.clock.now()).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::ManualClock;
    use crate::repositories::lockouts::InMemoryLockoutStore;

    fn guard_with_clock() -> (LockoutGuard, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let guard = LockoutGuard::new(
            Arc::new(InMemoryLockoutStore::new()),
            clock.clone(),
            5,
            900_000,
        );
        (guard, clock)
    }

    #[actix_web::test]
    async fn test_lock_engages_on_fifth_failure() {
        let (guard, _clock) = guard_with_clock();

        for i in 1..5 {
            let outcome = guard.record_failure("u1").await.unwrap();
            assert_eq!(outcome.failed_attempts, i);
            assert!(!outcome.newly_locked);
            guard.ensure_not_locked("u1").await.unwrap();
        }

        let outcome = guard.record_failure("u1").await.unwrap();
        assert_eq!(outcome.failed_attempts, 5);
        assert!(outcome.newly_locked);

        let err = guard.ensure_not_locked("u1").await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Account is locked. Try again in 15 minutes."
        );
    }

    #[actix_web::test]
    async fn test_remaining_minutes_rounds_up() {
        let (guard, clock) = guard_with_clock();

        for _ in 0..5 {
            guard.record_failure("u1").await.unwrap();
        }

        // 14분 1초 경과: 남은 59초는 1분으로 올림
        clock.advance(Duration::seconds(14 * 60 + 1));
        let err = guard.ensure_not_locked("u1").await.unwrap_err();
        assert_eq!(err, AuthError::AccountLocked { remaining_minutes: 1 });
    }

    #[actix_web::test]
    async fn test_lock_releases_lazily_after_duration() {
        let (guard, clock) = guard_with_clock();

        for _ in 0..5 {
            guard.record_failure("u1").await.unwrap();
        }
        assert!(guard.ensure_not_locked("u1").await.is_err());

        clock.advance(Duration::minutes(15));
        guard.ensure_not_locked("u1").await.unwrap();
    }

    #[actix_web::test]
    async fn test_failure_after_expired_lock_starts_fresh() {
        let (guard, clock) = guard_with_clock();

        for _ in 0..5 {
            guard.record_failure("u1").await.unwrap();
        }

        clock.advance(Duration::minutes(16));
        let outcome = guard.record_failure("u1").await.unwrap();

        assert_eq!(outcome.failed_attempts, 1);
        assert!(!outcome.newly_locked);
        guard.ensure_not_locked("u1").await.unwrap();
    }

    #[actix_web::test]
    async fn test_reset_clears_counter() {
        let (guard, _clock) = guard_with_clock();

        for _ in 0..4 {
            guard.record_failure("u1").await.unwrap();
        }
        guard.reset("u1").await.unwrap();

        // 초기화 후 다시 5회가 필요
        let outcome = guard.record_failure("u1").await.unwrap();
        assert_eq!(outcome.failed_attempts, 1);
    }

    #[actix_web::test]
    async fn test_users_are_tracked_independently() {
        let (guard, _clock) = guard_with_clock();

        for _ in 0..5 {
            guard.record_failure("u1").await.unwrap();
        }

        assert!(guard.ensure_not_locked("u1").await.is_err());
        guard.ensure_not_locked("u2").await.unwrap();
    }
}
