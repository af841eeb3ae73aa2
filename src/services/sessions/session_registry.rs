//! 리프레시 토큰 세션 레지스트리 구현
//!
//! 불투명 리프레시 토큰의 발급, 순환, 무효화, 목록 조회를 담당합니다.
//!
//! ## 토큰 형식
//!
//! 리프레시 토큰은 JWT가 아닙니다. OsRng에서 뽑은 32바이트(256비트)를
//! base64url로 인코딩한 불투명 문자열이며, 서버 저장소의 항목이 유일한
//! 진실 공급원입니다. 저장소에는 토큰의 SHA-256 해시만 저장되므로
//! 저장소가 유출되어도 원본 토큰을 복원할 수 없습니다.
//!
//! ## 순환의 단일 사용 보장
//!
//! `rotate`는 제시된 토큰의 해시로 저장소에서 원자적 조회-삭제를
//! 수행합니다. 같은 토큰으로 두 요청이 경합하면 정확히 하나만 세션을
//! 가져가고, 나머지는 [`AuthError::InvalidOrReused`]를 받습니다.
//! 미발급/만료/재사용은 의도적으로 구분되지 않습니다.

use std::sync::Arc;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chrono::Duration;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::core::clock::Clock;
use crate::core::errors::AuthError;
use crate::domain::models::{Session, SessionView};
use crate::repositories::sessions::SessionStore;

/// 순환 결과
///
/// 새 리프레시 토큰 원본과 교체된 세션 행을 담습니다.
#[derive(Debug)]
pub struct RotatedSession {
    /// 새로 발급된 리프레시 토큰 (클라이언트에 반환)
    pub raw_token: String,
    /// 교체 삽입된 세션
    pub session: Session,
}

/// 세션 레지스트리
pub struct SessionRegistry {
    store: Arc<dyn SessionStore>,
    clock: Arc<dyn Clock>,
    refresh_ttl_secs: i64,
}

impl SessionRegistry {
    pub fn new(store: Arc<dyn SessionStore>, clock: Arc<dyn Clock>, refresh_ttl_secs: i64) -> Self {
        Self {
            store,
            clock,
            refresh_ttl_secs,
        }
    }

    /// 새 리프레시 토큰 원본을 생성합니다 (256비트 엔트로피).
    fn generate_raw_token() -> String {
        let mut bytes = [0u8; 32];
        OsRng.fill_bytes(&mut bytes);
        URL_SAFE_NO_PAD.encode(bytes)
    }

    /// 토큰 원본의 저장용 해시를 계산합니다.
    fn hash_token(raw: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(raw.as_bytes());
        URL_SAFE_NO_PAD.encode(hasher.finalize())
    }

    /// 새 세션을 생성하고 리프레시 토큰 원본을 반환합니다.
    ///
    /// 반환된 원본은 이 시점 이후 서버 어디에도 존재하지 않습니다.
    ///
    /// # Errors
    ///
    /// * `AuthError::Store` - 저장소 장애
    pub async fn create(
        &self,
        user_id: &str,
        device_info: Option<String>,
        ip_address: Option<String>,
    ) -> Result<String, AuthError> {
        let raw = Self::generate_raw_token();
        let now = self.clock.now();

        let session = Session {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            refresh_token_hash: Self::hash_token(&raw),
            device_info,
            ip_address,
            created_at: now,
            last_activity_at: now,
            expires_at: now + Duration::seconds(self.refresh_ttl_secs),
        };

        self.store.insert(session).await?;
        Ok(raw)
    }

    /// 리프레시 토큰을 순환합니다.
    ///
    /// 제시된 토큰의 세션을 원자적으로 제거하고, 같은 사용자의 새
    /// 세션을 삽입합니다. 옛 토큰은 이 호출이 반환되기 전에 이미
    /// 무효입니다.
    ///
    /// # Errors
    ///
    /// * `AuthError::InvalidOrReused` - 미발급/만료/재사용 토큰
    /// * `AuthError::Store` - 저장소 장애
    pub async fn rotate(
        &self,
        presented_raw: &str,
        device_info: Option<String>,
        ip_address: Option<String>,
    ) -> Result<RotatedSession, AuthError> {
        let hash = Self::hash_token(presented_raw);

        // 조회-삭제가 하나의 저장소 연산: 경합의 승자는 하나뿐
        let old = self
            .store
            .take_by_hash(&hash)
            .await?
            .ok_or(AuthError::InvalidOrReused)?;

        let now = self.clock.now();
        if old.is_expired(now) {
            // 이미 제거되었으므로 별도 정리 불필요
            return Err(AuthError::InvalidOrReused);
        }

        let raw = Self::generate_raw_token();
        let session = Session {
            id: Uuid::new_v4().to_string(),
            user_id: old.user_id.clone(),
            refresh_token_hash: Self::hash_token(&raw),
            device_info: device_info.or(old.device_info),
            ip_address: ip_address.or(old.ip_address),
            created_at: old.created_at,
            last_activity_at: now,
            expires_at: now + Duration::seconds(self.refresh_ttl_secs),
        };

        self.store.insert(session.clone()).await?;

        Ok(RotatedSession {
            raw_token: raw,
            session,
        })
    }

    /// 제시된 토큰의 세션을 무효화합니다 (단일 디바이스 로그아웃).
    ///
    /// 미등록 토큰은 성공으로 취급되며 `false`만 반환됩니다. 로그아웃은
    /// 멱등해야 하기 때문입니다.
    pub async fn revoke_by_token(&self, presented_raw: &str) -> Result<bool, AuthError> {
        let hash = Self::hash_token(presented_raw);
        let removed = self.store.take_by_hash(&hash).await?;
        Ok(removed.is_some())
    }

    /// 사용자 소유의 특정 세션을 무효화합니다.
    ///
    /// # Errors
    ///
    /// * `AuthError::NotFound` - 세션이 없거나 호출자 소유가 아님
    ///   (두 경우는 구분되지 않음)
    pub async fn revoke_one(&self, session_id: &str, user_id: &str) -> Result<(), AuthError> {
        let removed = self.store.remove_one(session_id, user_id).await?;
        if !removed {
            return Err(AuthError::NotFound("Session not found".to_string()));
        }
        Ok(())
    }

    /// 사용자의 모든 세션을 무효화하고 수를 반환합니다.
    pub async fn revoke_all(&self, user_id: &str) -> Result<u64, AuthError> {
        Ok(self.store.remove_all_for_user(user_id).await?)
    }

    /// 사용자의 활성 세션 목록을 조회합니다.
    ///
    /// 만료된 세션은 제외되며, 마지막 활동 시각 내림차순으로
    /// 정렬됩니다. 토큰 해시는 포함되지 않습니다.
    pub async fn list(&self, user_id: &str) -> Result<Vec<SessionView>, AuthError> {
        let now = self.clock.now();
        let mut sessions: Vec<Session> = self
            .store
            .list_for_user(user_id)
            .await?
            .into_iter()
            .filter(|s| !s.is_expired(now))
            .collect();

        sessions.sort_by(|a, b| b.last_activity_at.cmp(&a.last_activity_at));

        Ok(sessions.iter().map(Session::to_view).collect())
    }
}
