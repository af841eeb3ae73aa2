//! 인증 API 핸들러
//!
//! 로그인, 토큰 갱신, 로그아웃, 전체 세션 무효화 엔드포인트를
//! 제공합니다. 로그인/갱신은 Public, 로그아웃/전체 무효화는 인증
//! 필수 라우트에 등록됩니다.

use actix_web::{post, web, HttpRequest, HttpResponse};
use validator::Validate;

use crate::core::errors::AppError;
use crate::core::state::AppState;
use crate::domain::dto::{
    ApiResponse, LoginRequest, LogoutRequest, RefreshRequest, RevokedResponse, TokenResponse,
};
use crate::domain::models::AuthenticatedUser;
use crate::services::auth::LoginAttempt;

use super::{extract_client_ip, extract_user_agent};

/// 로그인 API 핸들러
///
/// # Request Body
///
/// ```json
/// { "email": "coach@fitcoach.app", "password": "...", "device_info": "iPhone 15" }
/// ```
///
/// # Responses
///
/// * `200 OK` - 토큰 쌍 발급
/// * `400 Bad Request` - 입력 검증 실패
/// * `401 Unauthorized` - 자격 증명 오류
/// * `423 Locked` - 계정 잠김 (남은 분 포함 메시지)
#[post("/login")]
pub async fn login(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    body.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let body = body.into_inner();
    let pair = state
        .auth
        .login(LoginAttempt {
            email: body.email,
            password: body.password,
            device_info: body.device_info,
            ip_address: extract_client_ip(&req),
            user_agent: extract_user_agent(&req),
        })
        .await?;

    Ok(HttpResponse::Ok().json(TokenResponse::from(pair)))
}

/// 토큰 갱신 API 핸들러
///
/// 제시된 리프레시 토큰은 성공 여부와 무관하게 즉시 무효화됩니다.
///
/// # Responses
///
/// * `200 OK` - 새 토큰 쌍 (이전 리프레시 토큰은 무효)
/// * `401 Unauthorized` - 미발급/만료/재사용 토큰
#[post("/refresh")]
pub async fn refresh(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<RefreshRequest>,
) -> Result<HttpResponse, AppError> {
    body.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let body = body.into_inner();
    let pair = state
        .auth
        .refresh(
            &body.refresh_token,
            body.device_info,
            extract_client_ip(&req),
            extract_user_agent(&req),
        )
        .await?;

    Ok(HttpResponse::Ok().json(TokenResponse::from(pair)))
}

/// 로그아웃 API 핸들러
///
/// 호출자의 액세스 토큰을 즉시 무효화하고, 요청 본문에 따라 제시된
/// 세션 또는 전체 세션을 함께 무효화합니다.
#[post("/logout")]
pub async fn logout(
    req: HttpRequest,
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    body: Option<web::Json<LogoutRequest>>,
) -> Result<HttpResponse, AppError> {
    let body = body.map(|b| b.into_inner()).unwrap_or_default();

    let revoked = state
        .auth
        .logout(
            &user,
            body.refresh_token.as_deref(),
            body.logout_from_all,
            extract_client_ip(&req),
            extract_user_agent(&req),
        )
        .await?;

    log::info!("사용자 로그아웃 성공 - user_id: {}", user.user_id);

    Ok(HttpResponse::Ok().json(ApiResponse::success(RevokedResponse {
        revoked_sessions: revoked,
    })))
}

/// 전체 세션 무효화 API 핸들러 (logout-everywhere)
#[post("/revoke-all")]
pub async fn revoke_all(
    req: HttpRequest,
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let revoked = state
        .auth
        .revoke_all(&user, extract_client_ip(&req), extract_user_agent(&req))
        .await?;

    log::info!(
        "전체 세션 무효화 - user_id: {}, 세션 수: {}",
        user.user_id,
        revoked
    );

    Ok(HttpResponse::Ok().json(ApiResponse::success(RevokedResponse {
        revoked_sessions: revoked,
    })))
}
