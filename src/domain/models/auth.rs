//! 인증된 요청 컨텍스트 모델

use std::future::{ready, Ready};

use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use serde::{Deserialize, Serialize};

use super::role::Role;

/// 검증된 액세스 토큰에서 추출된 사용자 정보
///
/// 인증 미들웨어가 토큰 검증과 무효화 캐시 조회를 통과한 뒤
/// Request Extensions에 삽입하며, 핸들러는 추출자로 꺼내 씁니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// 사용자 고유 ID
    pub user_id: String,

    /// 사용자 이메일
    pub email: String,

    /// 사용자 역할
    pub role: Role,

    /// 액세스 토큰의 jti (로그아웃 시 무효화 캐시의 키)
    pub token_id: String,
}

impl AuthenticatedUser {
    /// 요구 역할을 만족하는지 확인 (관리자는 항상 만족)
    pub fn has_role(&self, required: Role) -> bool {
        self.role.satisfies(required)
    }

    /// 관리자 권한을 보유하고 있는지 확인
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// ActixWeb FromRequest trait 구현
impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<actix_web::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>() {
            Some(user) => ready(Ok(user.clone())),
            None => ready(Err(actix_web::error::ErrorUnauthorized(
                "인증되지 않은 요청입니다",
            ))),
        }
    }
}

/// 인증 미들웨어 동작 모드
#[derive(Debug, Clone, PartialEq)]
pub enum AuthMode {
    /// 인증 필수 - 실패 시 401 응답
    Required,
    /// 인증 선택 - 실패해도 요청 진행 (사용자 정보만 미삽입)
    Optional,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user(role: Role) -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: "user-1".to_string(),
            email: "coach@fitcoach.app".to_string(),
            role,
            token_id: "jti-1".to_string(),
        }
    }

    #[test]
    fn test_admin_passes_all_role_checks() {
        let admin = sample_user(Role::Admin);

        assert!(admin.is_admin());
        assert!(admin.has_role(Role::Trainer));
        assert!(admin.has_role(Role::Client));
    }

    #[test]
    fn test_trainer_is_not_admin() {
        let trainer = sample_user(Role::Trainer);

        assert!(!trainer.is_admin());
        assert!(trainer.has_role(Role::Trainer));
        assert!(!trainer.has_role(Role::Client));
    }
}
