//! JWT 인증 미들웨어
//!
//! ActixWeb 요청 파이프라인에서 액세스 토큰을 검증하고 사용자 정보를
//! 추출합니다. 검증은 서명/만료 확인과 무효화 캐시 조회를 모두
//! 포함하므로, 로그아웃된 토큰은 서명이 유효해도 거부됩니다.

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
};

use crate::domain::models::{AuthMode, Role};
use crate::middlewares::auth_inner::AuthMiddlewareService;

/// JWT 인증 미들웨어
pub struct AuthMiddleware {
    /// 인증 모드 (Required/Optional)
    mode: AuthMode,
    /// 접근에 필요한 역할 (선택사항)
    required_role: Option<Role>,
}

impl AuthMiddleware {
    /// 새로운 인증 미들웨어 생성
    pub fn new(mode: AuthMode) -> Self {
        Self {
            mode,
            required_role: None,
        }
    }

    /// 필수 인증 미들웨어 생성
    pub fn required() -> Self {
        Self::new(AuthMode::Required)
    }

    /// 선택적 인증 미들웨어 생성
    pub fn optional() -> Self {
        Self::new(AuthMode::Optional)
    }

    /// 특정 역할 요구 인증 미들웨어 생성
    ///
    /// 관리자 역할은 모든 요구 역할을 만족합니다.
    pub fn required_with_role(role: Role) -> Self {
        Self {
            mode: AuthMode::Required,
            required_role: Some(role),
        }
    }
}

/// ActixWeb Transform trait 구현
impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            mode: self.mode.clone(),
            required_role: self.required_role,
        }))
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::models::AuthenticatedUser;

    use super::*;

    #[test]
    fn test_role_requirement_satisfaction() {
        assert!(Role::Admin.satisfies(Role::Trainer));
        assert!(Role::Trainer.satisfies(Role::Trainer));
        assert!(!Role::Client.satisfies(Role::Trainer));
    }

    #[test]
    fn test_authenticated_user_role_checks() {
        let user = AuthenticatedUser {
            user_id: "test_id".to_string(),
            email: "coach@fitcoach.app".to_string(),
            role: Role::Admin,
            token_id: "jti-1".to_string(),
        };

        assert!(user.has_role(Role::Trainer));
        assert!(user.has_role(Role::Client));
        assert!(user.is_admin());

        let client = AuthenticatedUser {
            role: Role::Client,
            ..user
        };
        assert!(!client.has_role(Role::Trainer));
        assert!(!client.is_admin());
    }
}
