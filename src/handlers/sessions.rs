//! 세션 관리 API 핸들러
//!
//! 활성 세션 목록 조회와 개별 세션 무효화 엔드포인트를 제공합니다.
//! 두 엔드포인트 모두 인증 필수 라우트에 등록됩니다.

use actix_web::{delete, get, web, HttpRequest, HttpResponse};

use crate::core::errors::AppError;
use crate::core::state::AppState;
use crate::domain::dto::ApiResponse;
use crate::domain::models::AuthenticatedUser;

use super::extract_client_ip;

/// 활성 세션 목록 조회 API 핸들러
///
/// 호출자의 만료되지 않은 세션을 마지막 활동 시각 내림차순으로
/// 반환합니다. 토큰 해시는 포함되지 않습니다.
#[get("/sessions")]
pub async fn list_sessions(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let sessions = state.auth.list_sessions(&user.user_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(sessions)))
}

/// 개별 세션 무효화 API 핸들러
///
/// # Responses
///
/// * `200 OK` - 세션 무효화 완료
/// * `404 Not Found` - 세션이 없거나 호출자 소유가 아님
#[delete("/sessions/{session_id}")]
pub async fn revoke_session(
    req: HttpRequest,
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let session_id = path.into_inner();

    state
        .auth
        .revoke_session(&session_id, &user, extract_client_ip(&req))
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::<()>::message("세션이 무효화되었습니다")))
}
