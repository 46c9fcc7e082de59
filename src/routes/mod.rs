//! API 라우트 설정 모듈
//!
//! 엔드포인트를 기능별로 묶어 등록합니다.
//!
//! # Route Groups
//!
//! | 그룹 | 경로 | 세션 필요 |
//! |------|------|-----------|
//! | 헬스체크 | `GET /health` | - |
//! | 콜백 브릿지 | `GET /auth/callback` | - |
//! | 인증 | `/api/auth/*` | `me`, `password`, `unlink-identity`만 |
//! | 계정 찾기 | `/api/user/*` | - |
//!
//! # Session Guard
//!
//! 세션이 필요한 핸들러는 스코프가 아니라 핸들러 단위로 가드를 붙입니다.
//! `unlink-identity`는 요청 본문을 먼저 검사하므로 핸들러 안에서 세션을 확인합니다.
//!
//! ```rust,ignore
//! #[get("/me", wrap = "SessionGuard::required()")]
//! pub async fn me(current: CurrentSession) -> HttpResponse { ... }
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use actix_web::{web, App};
//!
//! let app = App::new()
//!     .app_data(web::Data::new(context))
//!     .configure(configure_all_routes);
//! ```

use crate::handlers;
use actix_web::web;
use serde_json::json;

/// 모든 라우트와 추출기 설정을 등록합니다.
pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(handlers::json_config())
        .app_data(handlers::query_config());

    cfg.service(health_check);
    cfg.service(handlers::callback::callback_bridge);

    configure_auth_routes(cfg);
    configure_user_routes(cfg);
}

/// 인증 관련 라우트
///
/// - `POST /api/auth/callback/resolve` - 브릿지 페이지가 보낸 콜백 해석
/// - `GET /api/auth/callback` - 소셜 로그인 코드 교환
/// - `POST /api/auth/login`, `/signup`, `/logout`
/// - `GET /api/auth/oauth/{provider}` - 소셜 로그인 시작
/// - `POST /api/auth/link-account/confirm`, `/link-account/cancel`
/// - `POST /api/auth/unlink-identity`, `/password`, `GET /api/auth/me` (세션 필요)
///
/// ```bash
/// curl -X POST http://localhost:8080/api/auth/login \
///   -H "Content-Type: application/json" \
///   -d '{"email":"hong@example.com","password":"password123"}'
/// ```
fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/auth")
            // 콜백
            .service(handlers::callback::resolve_callback)
            .service(handlers::callback::code_callback)
            // 자격 증명
            .service(handlers::auth::login)
            .service(handlers::auth::signup)
            .service(handlers::auth::logout)
            .service(handlers::auth::oauth_start)
            // 계정 연결
            .service(handlers::auth::link_confirm)
            .service(handlers::auth::link_cancel)
            // 세션 필요
            .service(handlers::auth::unlink_identity)
            .service(handlers::auth::update_password)
            .service(handlers::auth::me),
    );
}

/// 계정 찾기 라우트
///
/// ```bash
/// curl -X POST http://localhost:8080/api/user/find-id \
///   -H "Content-Type: application/json" \
///   -d '{"fullName":"홍길동","birth":"1990-01-01"}'
///
/// curl "http://localhost:8080/api/user/check-id?email=hong@example.com"
/// ```
fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/user")
            .service(handlers::users::find_id)
            .service(handlers::users::find_password)
            .service(handlers::users::reset_password)
            .service(handlers::users::check_email),
    );
}

/// 서비스 상태를 확인하는 헬스체크 엔드포인트
///
/// ```json
/// {
///   "status": "healthy",
///   "service": "noti_auth_service",
///   "version": "0.1.0",
///   "timestamp": "2026-01-01T00:00:00Z",
///   "features": {
///     "database": "MongoDB",
///     "session_store": "Redis",
///     "identity_provider": "GoTrue"
///   }
/// }
/// ```
#[actix_web::get("/health")]
async fn health_check() -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "noti_auth_service",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "features": {
            "database": "MongoDB",
            "session_store": "Redis",
            "identity_provider": "GoTrue"
        }
    }))
}
