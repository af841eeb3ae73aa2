//! 핏코치 인증 서비스 메인 애플리케이션
//!
//! Actix-web 기반의 HTTP 서버를 구동하고 모든 서비스를 조립합니다.
//! 설정은 환경 변수에서 한 번 읽혀 생성자 주입으로 전달되며,
//! Redis가 설정된 경우 무효화 캐시의 백엔드로 사용됩니다.

use std::sync::Arc;

use actix_cors::Cors;
use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::http::header;
use actix_web::{middleware, web, App, HttpServer};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info, warn};

use fitcoach_auth_backend::caching::redis::RedisClient;
use fitcoach_auth_backend::caching::revocation::{
    InMemoryRevocationStore, RedisRevocationStore, RevocationCache, RevocationStore,
};
use fitcoach_auth_backend::config::AuthConfig;
use fitcoach_auth_backend::core::clock::{Clock, SystemClock};
use fitcoach_auth_backend::core::state::AppState;
use fitcoach_auth_backend::domain::models::Role;
use fitcoach_auth_backend::repositories::lockouts::InMemoryLockoutStore;
use fitcoach_auth_backend::repositories::sessions::InMemorySessionStore;
use fitcoach_auth_backend::routes::configure_all_routes;
use fitcoach_auth_backend::services::auth::{
    AuthService, BcryptPasswordVerifier, InMemoryUserDirectory, TokenIssuer, UserRecord,
};
use fitcoach_auth_backend::services::security::{LockoutGuard, LogAuditSink};
use fitcoach_auth_backend::services::sessions::SessionRegistry;

/// Rate Limiting 설정 구조체
#[derive(Debug)]
struct RateLimitConfig {
    per_second: u64,
    burst_size: u32,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // 환경 설정 및 로깅 초기화
    load_env_file();
    init_logging();

    info!("🚀 핏코치 인증 서비스 시작중...");

    let config = AuthConfig::from_env();
    let state = build_app_state(&config).await;

    info!("✅ 모든 서비스가 성공적으로 초기화되었습니다!");

    // HTTP 서버 시작
    start_http_server(state).await
}

/// 서비스 의존성을 조립하여 애플리케이션 상태를 만듭니다
///
/// 저장소, 시계, 토큰 발급기, 세션 레지스트리, 잠금 가드를 생성하고
/// [`AuthService`] 하나로 묶습니다. `REDIS_URL`이 설정되어 있으면
/// 무효화 캐시는 Redis를 사용하고, 아니면 인메모리 저장소를
/// 사용합니다.
async fn build_app_state(config: &AuthConfig) -> AppState {
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let revocation_store: Arc<dyn RevocationStore> = if std::env::var("REDIS_URL").is_ok() {
        info!("📡 Redis 연결 중...");
        let redis = RedisClient::new()
            .await
            .expect("Redis 연결 실패");
        Arc::new(RedisRevocationStore::new(redis))
    } else {
        warn!("REDIS_URL 미설정, 인메모리 무효화 캐시 사용");
        Arc::new(InMemoryRevocationStore::new())
    };

    let issuer = TokenIssuer::new(
        &config.access_token_secret,
        config.access_token_ttl_secs,
        clock.clone(),
    );
    let sessions = SessionRegistry::new(
        Arc::new(InMemorySessionStore::new()),
        clock.clone(),
        config.refresh_token_ttl_secs,
    );
    let revocations = RevocationCache::new(
        revocation_store,
        clock.clone(),
        config.access_token_ttl_secs,
    );
    let lockouts = LockoutGuard::new(
        Arc::new(InMemoryLockoutStore::new()),
        clock.clone(),
        config.max_login_attempts,
        config.lockout_duration_ms,
    );

    let auth = AuthService::new(
        Arc::new(InMemoryUserDirectory::new(seed_users())),
        Arc::new(BcryptPasswordVerifier),
        issuer,
        sessions,
        revocations,
        lockouts,
        Arc::new(LogAuditSink::new()),
        clock,
    );

    AppState::new(Arc::new(auth))
}

/// 환경 변수에서 시드 계정을 로드합니다
///
/// 사용자 CRUD는 이 서비스의 범위 밖이므로, 기동 시 환경 변수로
/// 주어진 계정 하나를 디렉토리에 시드합니다.
///
/// # Environment Variables
///
/// * `SEED_USER_EMAIL` - 시드 계정 이메일
/// * `SEED_USER_PASSWORD` - 시드 계정 비밀번호 (기동 시 해시됨)
/// * `SEED_USER_ROLE` - 역할 (trainer/client/admin, 기본값 trainer)
fn seed_users() -> Vec<UserRecord> {
    let email = match std::env::var("SEED_USER_EMAIL") {
        Ok(email) => email,
        Err(_) => {
            warn!("SEED_USER_EMAIL 미설정, 시드 계정 없이 시작합니다");
            return Vec::new();
        }
    };

    let password = std::env::var("SEED_USER_PASSWORD").unwrap_or_else(|_| {
        warn!("SEED_USER_PASSWORD 미설정, 기본값 사용 (운영 환경에서는 안전하지 않음!)");
        "change-me".to_string()
    });

    let role = std::env::var("SEED_USER_ROLE")
        .ok()
        .and_then(|raw| Role::from_str(&raw).ok())
        .unwrap_or(Role::Trainer);

    let password_hash =
        bcrypt::hash(&password, bcrypt::DEFAULT_COST).expect("시드 비밀번호 해시 실패");

    vec![UserRecord {
        id: uuid::Uuid::new_v4().to_string(),
        email,
        role,
        password_hash,
        is_active: true,
    }]
}

/// HTTP 서버를 구성하고 실행합니다
///
/// Actix-web 기반 HTTP 서버를 설정하고 실행합니다.
/// Rate Limiting, CORS, 로깅, 경로 정규화 미들웨어를 포함합니다.
///
/// # Returns
///
/// * `Ok(())` - 서버가 정상적으로 종료됨
///
/// # Errors
///
/// * `std::io::Error` - 포트 바인딩 실패 또는 서버 실행 오류
async fn start_http_server(state: AppState) -> std::io::Result<()> {
    let bind_address = "127.0.0.1:8080";

    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/health", bind_address);
    info!("📍 API 엔드포인트: http://{}/api/v1", bind_address);

    // Rate Limiting 설정
    let rate_limit_config = load_rate_limit_config();
    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(rate_limit_config.per_second)
        .burst_size(rate_limit_config.burst_size)
        .use_headers()
        .finish()
        .unwrap();

    info!(
        "🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개",
        rate_limit_config.per_second, rate_limit_config.burst_size
    );

    let state = web::Data::new(state);

    HttpServer::new(move || {
        // CORS 설정
        let cors = configure_cors();

        App::new()
            // Rate Limiting 미들웨어 (가장 먼저 적용)
            .wrap(Governor::new(&governor_conf))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            // 공유 상태 등록
            .app_data(state.clone())
            // 라우트 설정
            .configure(configure_all_routes)
    })
    .bind(bind_address)?
    .workers(4)
    .run()
    .await
}

/// 환경별 설정 파일을 로드합니다
///
/// PROFILE 환경변수에 따라 적절한 .env 파일을 로드합니다.
///
/// # Environment Variables
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    info!("Current profile: {}", profile);

    match profile.as_str() {
        "prod" => match dotenv::from_filename(".env.prod") {
            Ok(_) => info!(".env.prod 파일 로드 됨"),
            Err(e) => error!(".env.prod 파일 로드 실패: {}", e),
        },
        "dev" => match dotenv::from_filename(".env.dev") {
            Ok(_) => info!(".env.dev 파일 로드 됨"),
            Err(e) => error!(".env.dev 파일 로드 실패: {}", e),
        },
        _ => {
            // 기본 .env 파일 로드
            dotenv().ok();
            info!("기본 .env 파일 로드");
        }
    }
}

/// 로깅 시스템을 초기화합니다
///
/// 환경변수 RUST_LOG를 기반으로 로깅 레벨을 설정합니다.
/// 기본값은 info 레벨이며, actix_web은 debug 레벨로 설정됩니다.
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=debug"));
}

/// CORS 설정을 구성합니다
///
/// 프론트엔드와의 통신을 위한 CORS(Cross-Origin Resource Sharing)
/// 설정을 구성합니다. 개발환경에서 로컬호스트 간 통신을 허용합니다.
fn configure_cors() -> Cors {
    Cors::default()
        // 허용할 Origin 설정
        .allowed_origin("http://localhost:3000")
        .allowed_origin("http://127.0.0.1:3000")
        .allowed_origin("http://localhost:8080")
        .allowed_origin("http://127.0.0.1:8080")
        // 허용할 HTTP 메서드
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "PATCH", "OPTIONS"])
        // 허용할 헤더
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        // 자격 증명(쿠키 등) 지원
        .supports_credentials()
        // Preflight 요청 캐시 시간 (초)
        .max_age(3600)
}

/// 환경변수에서 Rate Limiting 설정을 로드합니다
///
/// * `RATE_LIMIT_PER_SECOND` - 초당 허용 요청 수 (기본값: 100)
/// * `RATE_LIMIT_BURST_SIZE` - 버스트 허용량 (기본값: 200)
fn load_rate_limit_config() -> RateLimitConfig {
    let per_second = std::env::var("RATE_LIMIT_PER_SECOND")
        .unwrap_or_else(|_| "100".to_string())
        .parse::<u64>()
        .unwrap_or_else(|e| {
            error!("RATE_LIMIT_PER_SECOND 파싱 실패: {}. 기본값 100 사용", e);
            100
        });

    let burst_size = std::env::var("RATE_LIMIT_BURST_SIZE")
        .unwrap_or_else(|_| "200".to_string())
        .parse::<u32>()
        .unwrap_or_else(|e| {
            error!("RATE_LIMIT_BURST_SIZE 파싱 실패: {}. 기본값 200 사용", e);
            200
        });

    let config = RateLimitConfig {
        per_second,
        burst_size,
    };

    info!("Rate Limiting 설정 로드됨: {:?}", config);
    config
}
