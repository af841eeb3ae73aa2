//! # Session Store
//!
//! 리프레시 토큰 해시를 키로 하는 세션 저장소입니다.
//! 핵심 연산은 `take_by_hash`로, 조회와 삭제를 단일 원자 연산으로
//! 수행합니다. 토큰 순환의 단일 사용 보장이 이 연산 하나에
//! 걸려 있습니다. 같은 해시로 두 순환이 경합하면 정확히 한 쪽만
//! 세션을 가져갑니다.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::core::errors::StoreError;
use crate::domain::models::Session;

/// 세션 저장소 trait
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// 세션을 저장합니다. 동일 해시가 이미 존재하면 에러입니다.
    async fn insert(&self, session: Session) -> Result<(), StoreError>;

    /// 해시로 세션을 조회하면서 동시에 삭제합니다 (compare-and-delete).
    ///
    /// 반환된 세션은 저장소에서 이미 제거된 상태이며, 동일 해시에 대한
    /// 동시 호출 중 정확히 하나만 `Some`을 받습니다.
    async fn take_by_hash(&self, token_hash: &str) -> Result<Option<Session>, StoreError>;

    /// 사용자 소유의 특정 세션을 삭제합니다.
    ///
    /// 세션이 존재하더라도 `user_id`가 일치하지 않으면 삭제하지 않고
    /// `false`를 반환합니다.
    async fn remove_one(&self, session_id: &str, user_id: &str) -> Result<bool, StoreError>;

    /// 사용자의 모든 세션을 삭제하고 삭제된 수를 반환합니다.
    async fn remove_all_for_user(&self, user_id: &str) -> Result<u64, StoreError>;

    /// 사용자의 모든 세션을 조회합니다 (만료 여부 무관).
    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Session>, StoreError>;
}

/// 인메모리 세션 저장소
///
/// 토큰 해시를 키로 하는 `HashMap`을 뮤텍스로 보호합니다.
/// `take_by_hash`는 `HashMap::remove` 한 번이므로 뮤텍스가
/// 선형화 지점을 제공합니다.
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: Mutex<HashMap<String, Session>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, Session>>, StoreError> {
        self.sessions
            .lock()
            .map_err(|e| StoreError(format!("session store lock poisoned: {}", e)))
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn insert(&self, session: Session) -> Result<(), StoreError> {
        let mut sessions = self.lock()?;
        if sessions.contains_key(&session.refresh_token_hash) {
            return Err(StoreError("duplicate refresh token hash".to_string()));
        }
        sessions.insert(session.refresh_token_hash.clone(), session);
        Ok(())
    }

    async fn take_by_hash(&self, token_hash: &str) -> Result<Option<Session>, StoreError> {
        let mut sessions = self.lock()?;
        Ok(sessions.remove(token_hash))
    }

    async fn remove_one(&self, session_id: &str, user_id: &str) -> Result<bool, StoreError> {
        let mut sessions = self.lock()?;
        let key = sessions
            .iter()
            .find(|(_, s)| s.id == session_id && s.user_id == user_id)
            .map(|(k, _)| k.clone());

        match key {
            Some(key) => {
                sessions.remove(&key);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn remove_all_for_user(&self, user_id: &str) -> Result<u64, StoreError> {
        let mut sessions = self.lock()?;
        let before = sessions.len();
        sessions.retain(|_, s| s.user_id != user_id);
        Ok((before - sessions.len()) as u64)
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Session>, StoreError> {
        let sessions = self.lock()?;
        Ok(sessions
            .values()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn session(id: &str, user_id: &str, hash: &str) -> Session {
        let now = Utc::now();
        Session {
            id: id.to_string(),
            user_id: user_id.to_string(),
            refresh_token_hash: hash.to_string(),
            device_info: None,
            ip_address: None,
            created_at: now,
            last_activity_at: now,
            expires_at: now + Duration::days(7),
        }
    }

    #[actix_web::test]
    async fn test_take_by_hash_removes_session() {
        let store = InMemorySessionStore::new();
        store.insert(session("s1", "u1", "hash-1")).await.unwrap();

        let taken = store.take_by_hash("hash-1").await.unwrap();
        assert_eq!(taken.unwrap().id, "s1");

        // 두 번째 호출은 비어 있어야 함 (단일 사용 보장)
        let again = store.take_by_hash("hash-1").await.unwrap();
        assert!(again.is_none());
    }

    #[actix_web::test]
    async fn test_insert_rejects_duplicate_hash() {
        let store = InMemorySessionStore::new();
        store.insert(session("s1", "u1", "hash-1")).await.unwrap();

        let result = store.insert(session("s2", "u2", "hash-1")).await;
        assert!(result.is_err());
    }

    #[actix_web::test]
    async fn test_remove_one_checks_ownership() {
        let store = InMemorySessionStore::new();
        store.insert(session("s1", "u1", "hash-1")).await.unwrap();

        // 다른 사용자는 삭제할 수 없음
        assert!(!store.remove_one("s1", "u2").await.unwrap());
        // 소유자는 삭제 가능
        assert!(store.remove_one("s1", "u1").await.unwrap());
        assert!(!store.remove_one("s1", "u1").await.unwrap());
    }

    #[actix_web::test]
    async fn test_remove_all_counts_only_target_user() {
        let store = InMemorySessionStore::new();
        store.insert(session("s1", "u1", "hash-1")).await.unwrap();
        store.insert(session("s2", "u1", "hash-2")).await.unwrap();
        store.insert(session("s3", "u2", "hash-3")).await.unwrap();

        assert_eq!(store.remove_all_for_user("u1").await.unwrap(), 2);
        assert_eq!(store.list_for_user("u1").await.unwrap().len(), 0);
        assert_eq!(store.list_for_user("u2").await.unwrap().len(), 1);
    }
}
