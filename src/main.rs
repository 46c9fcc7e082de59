//! NOTI 인증 서비스 메인 애플리케이션
//!
//! Actix-web 기반의 HTTP 서버를 구동하고 모든 서비스를 조립합니다.
//! MongoDB(프로필), Redis(세션), 인증 게이트웨이 클라이언트를 준비한 뒤
//! [`AppContext`]로 묶어 핸들러에 전달합니다.

use std::io;
use std::sync::Arc;

use actix_cors::Cors;
use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::http::header;
use actix_web::{middleware, web, App, HttpServer};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info, warn};
use noti_auth_service::caching::redis::RedisClient;
use noti_auth_service::config::{CorsConfig, RateLimitConfig, ServerConfig};
use noti_auth_service::core::{AppContext, AppSettings};
use noti_auth_service::db::Database;
use noti_auth_service::repositories::profiles::ProfileRepository;
use noti_auth_service::repositories::sessions::RedisSessionStore;
use noti_auth_service::routes::configure_all_routes;
use noti_auth_service::services::gateway::GoTrueGateway;

#[actix_web::main]
async fn main() -> io::Result<()> {
    // 환경 설정 및 로깅 초기화
    load_env_file();
    init_logging();

    info!("🚀 NOTI 인증 서비스 시작중...");

    let settings = AppSettings::from_env();
    info!("🔗 인증 콜백 주소: {}", settings.site_url_for("/auth/callback"));

    let context = initialize_context(settings).await;
    info!("✅ 모든 서비스가 성공적으로 초기화되었습니다!");

    start_http_server(context).await
}

/// 데이터 스토어와 게이트웨이 클라이언트를 준비하고 서비스를 조립합니다
///
/// # Panics
///
/// * MongoDB 연결 실패 시
/// * Redis 연결 실패 시
/// * 게이트웨이 HTTP 클라이언트 생성 실패 시
async fn initialize_context(settings: AppSettings) -> AppContext {
    info!("📡 데이터베이스 연결 중...");

    let database = Arc::new(Database::from_env().await.expect("데이터베이스 연결 실패"));

    let profiles = Arc::new(ProfileRepository::new(database));
    if let Err(e) = profiles.create_indexes().await {
        warn!("프로필 인덱스 생성 실패 (계속 진행): {}", e);
    }

    let redis_client = Arc::new(RedisClient::new().await.expect("Redis 연결 실패"));

    let store = Arc::new(RedisSessionStore::new(redis_client, settings.session.ttl_secs));
    let gateway = Arc::new(GoTrueGateway::from_env().expect("인증 게이트웨이 클라이언트 생성 실패"));

    AppContext::assemble(gateway, store, profiles, settings)
}

/// HTTP 서버를 구성하고 실행합니다
///
/// 요청 제한, CORS, 로깅, 경로 정규화 미들웨어를 포함합니다.
///
/// # Errors
///
/// * `std::io::Error` - 요청 제한 설정 오류, 포트 바인딩 실패 또는 서버 실행 오류
async fn start_http_server(context: AppContext) -> io::Result<()> {
    let bind_address = format!("{}:{}", ServerConfig::host(), ServerConfig::port());

    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/health", bind_address);

    let rate_limit_config = RateLimitConfig::from_env();
    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(rate_limit_config.per_second)
        .burst_size(rate_limit_config.burst_size)
        .use_headers()
        .finish()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "잘못된 Rate Limiting 설정"))?;

    info!(
        "🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개",
        rate_limit_config.per_second, rate_limit_config.burst_size
    );

    let origins = CorsConfig::allowed_origins();
    info!("CORS 허용 Origin: {:?}", origins);

    let context = web::Data::new(context);

    HttpServer::new(move || {
        App::new()
            .app_data(context.clone())
            // Rate Limiting 미들웨어 (가장 먼저 적용)
            .wrap(Governor::new(&governor_conf))
            .wrap(configure_cors(&origins))
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .configure(configure_all_routes)
    })
    .bind(bind_address)?
    .workers(ServerConfig::workers())
    .run()
    .await
}

/// 환경별 설정 파일을 로드합니다
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    match profile.as_str() {
        "prod" => {
            if let Err(e) = dotenv::from_filename(".env.prod") {
                error!(".env.prod 파일 로드 실패: {}", e);
            }
        }
        "dev" => {
            if let Err(e) = dotenv::from_filename(".env.dev") {
                error!(".env.dev 파일 로드 실패: {}", e);
            }
        }
        _ => {
            dotenv().ok();
        }
    }
}

/// `RUST_LOG` 기반 로깅 초기화 (기본값: "info,actix_web=debug")
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=debug"));
}

/// 프론트엔드 Origin에서 쿠키를 포함한 요청을 허용합니다
fn configure_cors(origins: &[String]) -> Cors {
    origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
        .supports_credentials()
        .max_age(3600)
}
