//! # Application State Module
//!
//! 핸들러와 미들웨어가 공유하는 애플리케이션 상태 컨테이너입니다.
//! 전역 서비스 레지스트리 대신 `actix_web::web::Data`로 주입되는
//! 명시적 상태 객체를 사용합니다. 모든 의존성은 `main.rs`에서
//! 한 번 조립되어 이 구조체를 통해 전달됩니다.

use std::sync::Arc;

use crate::services::auth::AuthService;

/// 요청 처리에 필요한 서비스들을 담는 공유 상태
///
/// `HttpServer::new` 클로저에서 `web::Data<AppState>`로 등록되며,
/// 핸들러는 추출기로, 미들웨어는 `req.app_data()`로 접근합니다.
#[derive(Clone)]
pub struct AppState {
    /// 인증 오케스트레이션 서비스 (로그인, 갱신, 로그아웃, 세션 관리)
    pub auth: Arc<AuthService>,
}

impl AppState {
    pub fn new(auth: Arc<AuthService>) -> Self {
        Self { auth }
    }
}
