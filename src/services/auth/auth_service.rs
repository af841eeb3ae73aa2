//! 인증 오케스트레이션 서비스 구현
//!
//! 로그인, 토큰 갱신, 로그아웃, 세션 관리의 전체 플로우를 조립합니다.
//! 토큰 발급기, 세션 레지스트리, 무효화 캐시, 잠금 가드, 감사 싱크가
//! 모두 이 서비스의 생성자로 주입됩니다.
//!
//! ## 로그인 플로우 순서
//!
//! 1. 이메일로 사용자 조회 (없으면 자격 증명 오류로 수렴)
//! 2. 잠금 검사 - 비밀번호 검증보다 먼저. 잠긴 계정은 올바른
//!    비밀번호로도 로그인할 수 없습니다
//! 3. 계정 활성 검사
//! 4. 비밀번호 검증, 실패 시 잠금 가드에 기록
//! 5. 성공 시 실패 기록 초기화, 토큰 쌍 발급, 세션 생성
//!
//! 모든 보안 관련 분기에서 감사 이벤트가 발행되며, 싱크 실패는
//! 경고 로그만 남기고 본 연산을 계속합니다.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::caching::revocation::RevocationCache;
use crate::core::clock::Clock;
use crate::core::errors::{AuthError, StoreError};
use crate::domain::models::{
    AuditEventType, AuthenticatedUser, Role, SecurityAuditEvent, SessionView, TokenPair,
};
use crate::services::security::{AuditSink, LockoutGuard};
use crate::services::sessions::SessionRegistry;

use super::token_issuer::TokenIssuer;

/// 자격 증명 디렉토리의 사용자 행
///
/// 사용자 CRUD는 이 서비스의 범위 밖이며, 조회에 필요한 최소
/// 형태만 정의합니다.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: String,
    pub email: String,
    pub role: Role,
    pub password_hash: String,
    pub is_active: bool,
}

/// 사용자 조회 협력자 trait
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError>;
    async fn find_by_id(&self, user_id: &str) -> Result<Option<UserRecord>, StoreError>;
}

/// 비밀번호 검증 협력자 trait
///
/// 해시 알고리즘 선택은 이 서비스의 관심사가 아닙니다. 기본 구현은
/// bcrypt이며, 테스트에서는 저비용 해시로 교체할 수 있습니다.
pub trait PasswordVerifier: Send + Sync {
    fn verify(&self, password: &str, password_hash: &str) -> Result<bool, StoreError>;
}

/// bcrypt 기반 비밀번호 검증기
#[derive(Default)]
pub struct BcryptPasswordVerifier;

impl PasswordVerifier for BcryptPasswordVerifier {
    fn verify(&self, password: &str, password_hash: &str) -> Result<bool, StoreError> {
        bcrypt::verify(password, password_hash)
            .map_err(|e| StoreError(format!("bcrypt 검증 실패: {}", e)))
    }
}

/// 인메모리 사용자 디렉토리
///
/// 기동 시 시드 계정을 담는 용도와 테스트용입니다.
#[derive(Default)]
pub struct InMemoryUserDirectory {
    by_email: HashMap<String, UserRecord>,
}

impl InMemoryUserDirectory {
    pub fn new(users: Vec<UserRecord>) -> Self {
        Self {
            by_email: users
                .into_iter()
                .map(|u| (u.email.clone(), u))
                .collect(),
        }
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        Ok(self.by_email.get(email).cloned())
    }

    async fn find_by_id(&self, user_id: &str) -> Result<Option<UserRecord>, StoreError> {
        Ok(self.by_email.values().find(|u| u.id == user_id).cloned())
    }
}

/// 로그인 시도 정보
#[derive(Debug, Clone, Default)]
pub struct LoginAttempt {
    pub email: String,
    pub password: String,
    pub device_info: Option<String>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

/// 인증 오케스트레이션 서비스
pub struct AuthService {
    users: Arc<dyn UserDirectory>,
    passwords: Arc<dyn PasswordVerifier>,
    issuer: TokenIssuer,
    sessions: SessionRegistry,
    revocations: RevocationCache,
    lockouts: LockoutGuard,
    audit: Arc<dyn AuditSink>,
    clock: Arc<dyn Clock>,
}

impl AuthService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        users: Arc<dyn UserDirectory>,
        passwords: Arc<dyn PasswordVerifier>,
        issuer: TokenIssuer,
        sessions: SessionRegistry,
        revocations: RevocationCache,
        lockouts: LockoutGuard,
        audit: Arc<dyn AuditSink>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            users,
            passwords,
            issuer,
            sessions,
            revocations,
            lockouts,
            audit,
            clock,
        }
    }

    /// 설정된 액세스 토큰 수명 (초)
    pub fn access_ttl_secs(&self) -> i64 {
        self.issuer.access_ttl_secs()
    }

    /// 감사 이벤트를 발행합니다. 싱크 실패는 본 연산에 영향을 주지
    /// 않습니다.
    async fn emit(&self, event: SecurityAuditEvent) {
        if let Err(e) = self.audit.emit(&event).await {
            log::warn!(
                "감사 이벤트 기록 실패 ({}): {}",
                event.event_type.as_str(),
                e
            );
        }
    }

    /// 이메일/비밀번호 로그인
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - 액세스 토큰과 새 리프레시 토큰
    ///
    /// # Errors
    ///
    /// * `AuthError::AccountLocked` - 잠금 유효 중 (남은 분 포함)
    /// * `AuthError::InvalidCredentials` - 미등록 이메일, 비활성 계정,
    ///   비밀번호 불일치 (모두 동일 메시지로 수렴)
    /// * `AuthError::Store` - 저장소 장애
    pub async fn login(&self, attempt: LoginAttempt) -> Result<TokenPair, AuthError> {
        let now = self.clock.now();
        let client = (attempt.ip_address.clone(), attempt.user_agent.clone());

        let user = match self.users.find_by_email(&attempt.email).await? {
            Some(user) => user,
            None => {
                self.emit(
                    SecurityAuditEvent::failure(
                        AuditEventType::LoginFailed,
                        None,
                        "user_not_found",
                        now,
                    )
                    .with_client(client.0, client.1),
                )
                .await;
                return Err(AuthError::InvalidCredentials);
            }
        };

        // 잠금 검사는 비밀번호 검증보다 먼저
        if let Err(locked) = self.lockouts.ensure_not_locked(&user.id).await {
            self.emit(
                SecurityAuditEvent::failure(
                    AuditEventType::LoginFailed,
                    Some(&user.id),
                    "account_locked",
                    now,
                )
                .with_client(client.0, client.1),
            )
            .await;
            return Err(locked);
        }

        if !user.is_active {
            self.emit(
                SecurityAuditEvent::failure(
                    AuditEventType::LoginFailed,
                    Some(&user.id),
                    "account_inactive",
                    now,
                )
                .with_client(client.0, client.1),
            )
            .await;
            return Err(AuthError::InvalidCredentials);
        }

        if !self.passwords.verify(&attempt.password, &user.password_hash)? {
            let outcome = self.lockouts.record_failure(&user.id).await?;

            self.emit(
                SecurityAuditEvent::failure(
                    AuditEventType::LoginFailed,
                    Some(&user.id),
                    "invalid_password",
                    now,
                )
                .with_client(client.0.clone(), client.1.clone()),
            )
            .await;

            if outcome.newly_locked {
                self.emit(
                    SecurityAuditEvent::failure(
                        AuditEventType::AccountLocked,
                        Some(&user.id),
                        "max_attempts_exceeded",
                        now,
                    )
                    .with_client(client.0, client.1),
                )
                .await;
            }

            return Err(AuthError::InvalidCredentials);
        }

        self.lockouts.reset(&user.id).await?;

        let issued = self.issuer.issue_access(&user.id, &user.email, user.role)?;
        let refresh_token = self
            .sessions
            .create(&user.id, attempt.device_info, attempt.ip_address.clone())
            .await?;

        self.emit(
            SecurityAuditEvent::success(AuditEventType::Login, &user.id, now)
                .with_client(attempt.ip_address, attempt.user_agent),
        )
        .await;

        Ok(TokenPair {
            access_token: issued.token,
            refresh_token,
            expires_in: self.issuer.access_ttl_secs(),
        })
    }

    /// 리프레시 토큰으로 새 토큰 쌍 발급
    ///
    /// 제시된 리프레시 토큰은 성공 여부와 무관하게 즉시 무효화됩니다
    /// (순환). 순환 실패는 재사용 의심 이벤트를 발행합니다.
    ///
    /// # Errors
    ///
    /// * `AuthError::InvalidOrReused` - 미발급/만료/재사용 토큰, 또는
    ///   소유 사용자가 더 이상 활성이 아닌 경우
    pub async fn refresh(
        &self,
        refresh_token: &str,
        device_info: Option<String>,
        ip_address: Option<String>,
        user_agent: Option<String>,
    ) -> Result<TokenPair, AuthError> {
        let now = self.clock.now();

        let rotated = match self
            .sessions
            .rotate(refresh_token, device_info, ip_address.clone())
            .await
        {
            Ok(rotated) => rotated,
            Err(AuthError::InvalidOrReused) => {
                // 순환 실패는 재사용 공격일 수 있음 - 운영자 판단용 이벤트
                self.emit(
                    SecurityAuditEvent::failure(
                        AuditEventType::RefreshReuseSuspected,
                        None,
                        "rotation_miss",
                        now,
                    )
                    .with_client(ip_address, user_agent),
                )
                .await;
                return Err(AuthError::InvalidOrReused);
            }
            Err(e) => return Err(e),
        };

        let user_id = rotated.session.user_id.clone();
        let user = match self.users.find_by_id(&user_id).await? {
            Some(user) if user.is_active => user,
            _ => {
                // 비활성 계정의 새 세션은 즉시 회수, 계정 상태는 비노출
                let _ = self.sessions.revoke_by_token(&rotated.raw_token).await;
                self.emit(
                    SecurityAuditEvent::failure(
                        AuditEventType::TokenRefresh,
                        Some(&user_id),
                        "account_inactive",
                        now,
                    )
                    .with_client(ip_address, user_agent),
                )
                .await;
                return Err(AuthError::InvalidOrReused);
            }
        };

        let issued = self.issuer.issue_access(&user.id, &user.email, user.role)?;

        self.emit(
            SecurityAuditEvent::success(AuditEventType::TokenRefresh, &user.id, now)
                .with_client(ip_address, user_agent),
        )
        .await;

        Ok(TokenPair {
            access_token: issued.token,
            refresh_token: rotated.raw_token,
            expires_in: self.issuer.access_ttl_secs(),
        })
    }

    /// 로그아웃
    ///
    /// 호출자의 액세스 토큰 jti를 무효화 캐시에 등재하고, 요청에 따라
    /// 제시된 세션 또는 전체 세션을 무효화합니다. 무효화된 세션 수를
    /// 반환합니다.
    pub async fn logout(
        &self,
        user: &AuthenticatedUser,
        refresh_token: Option<&str>,
        logout_from_all: bool,
        ip_address: Option<String>,
        user_agent: Option<String>,
    ) -> Result<u64, AuthError> {
        let now = self.clock.now();

        let revoked = if logout_from_all {
            self.sessions.revoke_all(&user.user_id).await?
        } else if let Some(token) = refresh_token {
            if self.sessions.revoke_by_token(token).await? {
                1
            } else {
                log::debug!("로그아웃: 제시된 리프레시 토큰이 세션과 일치하지 않음");
                0
            }
        } else {
            0
        };

        // 액세스 토큰은 남은 수명 동안 블랙리스트에 등재
        self.revocations
            .blacklist(&user.token_id, self.issuer.access_ttl_secs())
            .await?;

        let event_type = if logout_from_all {
            AuditEventType::SessionsRevoked
        } else {
            AuditEventType::Logout
        };
        self.emit(
            SecurityAuditEvent::success(event_type, &user.user_id, now)
                .with_client(ip_address, user_agent),
        )
        .await;

        Ok(revoked)
    }

    /// 전체 세션 무효화 (logout-everywhere)
    pub async fn revoke_all(
        &self,
        user: &AuthenticatedUser,
        ip_address: Option<String>,
        user_agent: Option<String>,
    ) -> Result<u64, AuthError> {
        self.logout(user, None, true, ip_address, user_agent).await
    }

    /// 액세스 토큰으로 요청을 인증합니다.
    ///
    /// 서명/만료 검증 후 무효화 캐시를 조회합니다. 캐시에 등재된
    /// 토큰은 서명이 유효해도 거부됩니다.
    ///
    /// # Errors
    ///
    /// * `AuthError::Invalid` / `AuthError::Expired` - 토큰 검증 실패
    /// * `AuthError::Revoked` - 로그아웃으로 무효화된 토큰
    pub async fn authenticate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let claims = self.issuer.verify_access(token)?;

        if self.revocations.is_blacklisted(&claims.jti).await? {
            return Err(AuthError::Revoked);
        }

        Ok(AuthenticatedUser {
            user_id: claims.sub,
            email: claims.email,
            role: claims.role,
            token_id: claims.jti,
        })
    }

    /// Authorization 헤더 값으로 요청을 인증합니다.
    pub async fn authenticate_header(
        &self,
        auth_header: &str,
    ) -> Result<AuthenticatedUser, AuthError> {
        let token = self.issuer.extract_bearer_token(auth_header)?;
        self.authenticate(token).await
    }

    /// 사용자의 활성 세션 목록
    pub async fn list_sessions(&self, user_id: &str) -> Result<Vec<SessionView>, AuthError> {
        self.sessions.list(user_id).await
    }

    /// 사용자 소유의 특정 세션 무효화
    pub async fn revoke_session(
        &self,
        session_id: &str,
        user: &AuthenticatedUser,
        ip_address: Option<String>,
    ) -> Result<(), AuthError> {
        self.sessions.revoke_one(session_id, &user.user_id).await?;

        self.emit(
            SecurityAuditEvent::success(
                AuditEventType::SessionRevoked,
                &user.user_id,
                self.clock.now(),
            )
            .with_client(ip_address, None),
        )
        .await;

        Ok(())
    }
}
