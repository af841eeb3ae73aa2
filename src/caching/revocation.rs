//! # Revocation Cache
//!
//! 로그아웃된 액세스 토큰을 남은 수명 동안 무력화하는 jti
//! 블랙리스트입니다. 토큰 검증 자체는 서명만으로 이루어지므로,
//! 로그아웃 즉시 효력을 끊으려면 이 캐시의 조회가 필요합니다.
//!
//! 등재 TTL은 설정된 액세스 토큰 수명으로 상한이 걸립니다. 토큰의
//! 실제 남은 수명보다 길게 남아 있어도 안전한 초과 근사이며, 상한을
//! 넘는 TTL 요청은 상한으로 잘립니다.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use crate::caching::redis::RedisClient;
use crate::core::clock::Clock;
use crate::core::errors::StoreError;

/// 무효화 항목 저장소 trait
#[async_trait]
pub trait RevocationStore: Send + Sync {
    /// jti를 지정된 만료 시각까지 등재합니다.
    ///
    /// 동일 jti에 대한 동시 등재는 같거나 더 늦은 만료 시각으로
    /// 수렴해야 합니다.
    async fn put(
        &self,
        token_id: &str,
        expires_at: DateTime<Utc>,
        ttl_secs: u64,
    ) -> Result<(), StoreError>;

    /// jti가 등재되어 있는지 확인합니다. 만료된 항목은 없는 것으로
    /// 취급됩니다.
    async fn contains(&self, token_id: &str, now: DateTime<Utc>) -> Result<bool, StoreError>;
}

/// 인메모리 무효화 저장소
///
/// jti → 만료 시각 맵입니다. 동시 등재 시 더 늦은 만료 시각을
/// 유지하며, 만료된 항목은 조회 시점에 제거됩니다.
#[derive(Default)]
pub struct InMemoryRevocationStore {
    entries: Mutex<HashMap<String, DateTime<Utc>>>,
}

impl InMemoryRevocationStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<String, DateTime<Utc>>>, StoreError> {
        self.entries
            .lock()
            .map_err(|e| StoreError(format!("revocation store lock poisoned: {}", e)))
    }
}

#[async_trait]
impl RevocationStore for InMemoryRevocationStore {
    async fn put(
        &self,
        token_id: &str,
        expires_at: DateTime<Utc>,
        _ttl_secs: u64,
    ) -> Result<(), StoreError> {
        let mut entries = self.lock()?;
        entries
            .entry(token_id.to_string())
            .and_modify(|existing| {
                if expires_at > *existing {
                    *existing = expires_at;
                }
            })
            .or_insert(expires_at);
        Ok(())
    }

    async fn contains(&self, token_id: &str, now: DateTime<Utc>) -> Result<bool, StoreError> {
        let mut entries = self.lock()?;
        match entries.get(token_id) {
            Some(expires_at) if *expires_at > now => Ok(true),
            Some(_) => {
                // 만료된 항목은 조회 시점에 제거
                entries.remove(token_id);
                Ok(false)
            }
            None => Ok(false),
        }
    }
}

/// Redis 기반 무효화 저장소
///
/// `blacklist_token:{jti}` 키에 SETEX로 등재합니다. 만료는 Redis의
/// 키 TTL에 위임되며, 동시 등재의 덮어쓰기는 동일한 상한 TTL로
/// 다시 설정되므로 수렴 요건을 만족합니다.
pub struct RedisRevocationStore {
    redis: RedisClient,
}

impl RedisRevocationStore {
    pub fn new(redis: RedisClient) -> Self {
        Self { redis }
    }

    fn key(token_id: &str) -> String {
        format!("blacklist_token:{}", token_id)
    }
}

#[async_trait]
impl RevocationStore for RedisRevocationStore {
    async fn put(
        &self,
        token_id: &str,
        _expires_at: DateTime<Utc>,
        ttl_secs: u64,
    ) -> Result<(), StoreError> {
        self.redis
            .set_with_expiry(&Self::key(token_id), "true", ttl_secs)
            .await
            .map_err(StoreError::from)
    }

    async fn contains(&self, token_id: &str, _now: DateTime<Utc>) -> Result<bool, StoreError> {
        self.redis
            .exists(&Self::key(token_id))
            .await
            .map_err(StoreError::from)
    }
}

/// 토큰 무효화 캐시
///
/// 로그아웃/전체 무효화 시 액세스 토큰의 jti를 등재하고, 인증
/// 미들웨어가 검증 통과 후 등재 여부를 조회합니다.
pub struct RevocationCache {
    store: Arc<dyn RevocationStore>,
    clock: Arc<dyn Clock>,
    /// 등재 TTL 상한 (초) - 설정된 액세스 토큰 수명
    max_ttl_secs: i64,
}

impl RevocationCache {
    pub fn new(store: Arc<dyn RevocationStore>, clock: Arc<dyn Clock>, max_ttl_secs: i64) -> Self {
        Self {
            store,
            clock,
            max_ttl_secs,
        }
    }

    /// jti를 블랙리스트에 등재합니다.
    ///
    /// 요청 TTL이 상한을 넘으면 상한으로 잘립니다. 0 이하의 TTL은
    /// 이미 만료된 토큰이므로 아무 것도 등재하지 않습니다.
    pub async fn blacklist(&self, token_id: &str, ttl_secs: i64) -> Result<(), StoreError> {
        let ttl = ttl_secs.min(self.max_ttl_secs);
        if ttl <= 0 {
            return Ok(());
        }

        let expires_at = self.clock.now() + Duration::seconds(ttl);
        self.store.put(token_id, expires_at, ttl as u64).await
    }

    /// jti가 블랙리스트에 등재되어 있는지 확인합니다.
    pub async fn is_blacklisted(&self, token_id: &str) -> Result<bool, StoreError> {
        self.store.contains(token_id, self.clock.now()).await
    }
}
