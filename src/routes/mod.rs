//! API 라우트 설정 모듈
//!
//! RESTful API 엔드포인트들을 기능별로 그룹화하여 제공합니다.
//! 인증 라우트, 세션 관리 라우트와 헬스체크 엔드포인트를 포함합니다.
//!
//! # Auth Middleware Usage
//!
//! 라우트에 따라 다른 인증 레벨을 적용합니다:
//!
//! ## 인증 불필요 (Public 라우트)
//! - `POST /api/v1/auth/login` - 로그인 자체는 인증 불필요
//! - `POST /api/v1/auth/refresh` - 리프레시 토큰이 자격 증명
//!
//! ## 인증 필요 (Bearer 토큰)
//! - `POST /api/v1/account/logout`
//! - `POST /api/v1/account/revoke-all`
//! - `GET /api/v1/sessions`
//! - `DELETE /api/v1/sessions/{session_id}`

use actix_web::web;
use serde_json::json;

use crate::handlers;
use crate::middlewares::AuthMiddleware;

/// 모든 라우트를 설정합니다
///
/// # Examples
///
/// ```rust,ignore
/// use actix_web::{web, App};
///
/// let app = App::new().configure(configure_all_routes);
/// ```
pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    // Health check endpoint
    cfg.service(health_check);

    configure_auth_routes(cfg);
    configure_session_routes(cfg);
}

/// 인증 관련 라우트를 설정합니다
///
/// # Available Routes
///
/// - `POST /api/v1/auth/login` - 이메일/비밀번호 로그인 (Public)
/// - `POST /api/v1/auth/refresh` - 토큰 갱신 (Public)
/// - `POST /api/v1/account/logout` - 로그아웃 (인증 필요)
/// - `POST /api/v1/account/revoke-all` - 전체 세션 무효화 (인증 필요)
///
/// # Examples
///
/// ```bash
/// curl -X POST http://localhost:8080/api/v1/auth/login \
///   -H "Content-Type: application/json" \
///   -d '{"email":"coach@fitcoach.app","password":"password123"}'
/// ```
fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    // Public 인증 라우트
    cfg.service(
        web::scope("/api/v1/auth")
            .service(handlers::auth::login)
            .service(handlers::auth::refresh),
    );

    // 인증이 필요한 계정 라우트
    cfg.service(
        web::scope("/api/v1/account")
            .wrap(AuthMiddleware::required())
            .service(handlers::auth::logout)
            .service(handlers::auth::revoke_all),
    );
}

/// 세션 관리 라우트를 설정합니다
///
/// - `GET /api/v1/sessions` - 활성 세션 목록
/// - `DELETE /api/v1/sessions/{session_id}` - 개별 세션 무효화
fn configure_session_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .wrap(AuthMiddleware::required())
            .service(handlers::sessions::list_sessions)
            .service(handlers::sessions::revoke_session),
    );
}

/// 서비스 상태를 확인하는 헬스체크 엔드포인트
///
/// 로드밸런서나 모니터링 시스템에서 서비스 상태를 확인하는 데 사용됩니다.
///
/// # Examples
///
/// ```bash
/// curl http://localhost:8080/health
/// ```
#[actix_web::get("/health")]
async fn health_check() -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "fitcoach_auth_backend",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
