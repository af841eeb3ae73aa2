//! # Lockout Store
//!
//! 사용자별 로그인 실패 상태 저장소입니다.
//! `apply_failure`는 읽기-수정-쓰기를 하나의 저장소 연산으로
//! 수행하므로 동시 실패 기록에서 증가분이 유실되지 않습니다.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use crate::core::errors::StoreError;
use crate::domain::models::AccountLockout;

/// 잠금 상태 저장소 trait
#[async_trait]
pub trait LockoutStore: Send + Sync {
    /// 사용자의 현재 잠금 상태를 조회합니다. 기록이 없으면 Clear 상태를
    /// 반환합니다.
    async fn fetch(&self, user_id: &str) -> Result<AccountLockout, StoreError>;

    /// 실패를 기록하고 갱신된 상태를 반환합니다.
    ///
    /// 만료된 잠금이 남아 있으면 먼저 Clear로 초기화한 뒤 기록합니다.
    /// 누적 실패가 `max_attempts` 이상이 되는 순간 `locked_until`이
    /// 설정됩니다. 전체 읽기-수정-쓰기가 단일 연산입니다.
    async fn apply_failure(
        &self,
        user_id: &str,
        now: DateTime<Utc>,
        max_attempts: u32,
        lock_for: Duration,
    ) -> Result<AccountLockout, StoreError>;

    /// 상태를 Clear로 초기화하고 `unlocked_at`을 기록합니다.
    async fn clear(&self, user_id: &str, now: DateTime<Utc>) -> Result<(), StoreError>;
}

/// 인메모리 잠금 상태 저장소
#[derive(Default)]
pub struct InMemoryLockoutStore {
    lockouts: Mutex<HashMap<String, AccountLockout>>,
}

impl InMemoryLockoutStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<String, AccountLockout>>, StoreError> {
        self.lockouts
            .lock()
            .map_err(|e| StoreError(format!("lockout store lock poisoned: {}", e)))
    }
}

#[async_trait]
impl LockoutStore for InMemoryLockoutStore {
    async fn fetch(&self, user_id: &str) -> Result<AccountLockout, StoreError> {
        let lockouts = self.lock()?;
        Ok(lockouts
            .get(user_id)
            .cloned()
            .unwrap_or_else(|| AccountLockout::clear(user_id)))
    }

    async fn apply_failure(
        &self,
        user_id: &str,
        now: DateTime<Utc>,
        max_attempts: u32,
        lock_for: Duration,
    ) -> Result<AccountLockout, StoreError> {
        let mut lockouts = self.lock()?;
        let entry = lockouts
            .entry(user_id.to_string())
            .or_insert_with(|| AccountLockout::clear(user_id));

        // 만료된 잠금은 새 실패 기록 전에 초기화 (지연 해제)
        if let Some(until) = entry.locked_until {
            if until <= now {
                entry.failed_attempts = 0;
                entry.locked_until = None;
                entry.unlocked_at = Some(now);
            }
        }

        entry.failed_attempts += 1;
        entry.last_attempt_at = Some(now);

        if entry.failed_attempts >= max_attempts && entry.locked_until.is_none() {
            entry.locked_until = Some(now + lock_for);
        }

        Ok(entry.clone())
    }

    async fn clear(&self, user_id: &str, now: DateTime<Utc>) -> Result<(), StoreError> {
        let mut lockouts = self.lock()?;
        if let Some(entry) = lockouts.get_mut(user_id) {
            entry.failed_attempts = 0;
            entry.locked_until = None;
            entry.unlocked_at = Some(now);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn test_fetch_unknown_user_is_clear() {
        let store = InMemoryLockoutStore::new();
        let state = store.fetch("u1").await.unwrap();

        assert_eq!(state.failed_attempts, 0);
        assert!(state.locked_until.is_none());
    }

    #[actix_web::test]
    async fn test_lock_engages_at_threshold() {
        let store = InMemoryLockoutStore::new();
        let now = Utc::now();

        for i in 1..5 {
            let state = store
                .apply_failure("u1", now, 5, Duration::minutes(15))
                .await
                .unwrap();
            assert_eq!(state.failed_attempts, i);
            assert!(state.locked_until.is_none());
        }

        let state = store
            .apply_failure("u1", now, 5, Duration::minutes(15))
            .await
            .unwrap();
        assert_eq!(state.failed_attempts, 5);
        assert_eq!(state.locked_until, Some(now + Duration::minutes(15)));
    }

    #[actix_web::test]
    async fn test_expired_lock_resets_before_new_failure() {
        let store = InMemoryLockoutStore::new();
        let now = Utc::now();

        for _ in 0..5 {
            store
                .apply_failure("u1", now, 5, Duration::minutes(15))
                .await
                .unwrap();
        }

        // 잠금 만료 후의 실패는 1회차부터 다시 시작
        let later = now + Duration::minutes(16);
        let state = store
            .apply_failure("u1", later, 5, Duration::minutes(15))
            .await
            .unwrap();

        assert_eq!(state.failed_attempts, 1);
        assert!(state.locked_until.is_none());
        assert_eq!(state.unlocked_at, Some(later));
    }

    #[actix_web::test]
    async fn test_clear_resets_counter() {
        let store = InMemoryLockoutStore::new();
        let now = Utc::now();

        store
            .apply_failure("u1", now, 5, Duration::minutes(15))
            .await
            .unwrap();
        store.clear("u1", now).await.unwrap();

        let state = store.fetch("u1").await.unwrap();
        assert_eq!(state.failed_attempts, 0);
        assert_eq!(state.unlocked_at, Some(now));
    }
}
