//! # HTTP Request Handlers Module
//!
//! HTTP 요청을 처리하는 핸들러 함수들을 정의하는 모듈입니다.
//! 핸들러는 요청을 DTO로 받아 [`AppContext`]의 서비스에 넘기고, 결과를 JSON
//! 응답과 쿠키로 바꾸는 일만 합니다.
//!
//! ## 아키텍처 위치
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//!   Browser (NOTI 웹 앱)
//! └─────────────────────┬───────────────────────┘
//!                       │ HTTP Request/Response (세션 쿠키)
//! ┌─────────────────────▼───────────────────────┐
//!   Handlers (이 모듈) - HTTP 엔드포인트 처리         ← Web Layer
//! ├─────────────────────────────────────────────┤
//!   Services - 콜백 해석, 계정 연결, 계정 찾기        ← Service Layer
//! ├─────────────────────────────────────────────┤
//!   Gateway / SessionStore / ProfileDirectory       ← Infra Layer
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## 모듈 구성
//!
//! - **`callback`**: 인증 리다이렉트 처리
//!   - 브릿지 페이지 (`GET /auth/callback`)
//!   - 콜백 해석 (`POST /api/auth/callback/resolve`)
//!   - PKCE 코드 교환 (`GET /api/auth/callback`)
//! - **`auth`**: 로그인/회원가입/로그아웃, 소셜 로그인 시작, 계정 연결, 비밀번호 변경
//! - **`users`**: 아이디/비밀번호 찾기, 이메일 가입 여부 확인
//!
//! ## 에러 처리
//!
//! 핸들러는 `Result<HttpResponse, AppError>`를 돌려주며, JSON 본문이나 쿼리를
//! 해석할 수 없는 요청은 [`json_config`] / [`query_config`]의 에러 핸들러를 거쳐
//! 같은 `400 {"error":"bad_request"}` 응답이 됩니다.
//!
//! ```rust,ignore
//! #[post("/find-id")]
//! pub async fn find_id(
//!     context: web::Data<AppContext>,
//!     payload: web::Json<FindIdRequest>,
//! ) -> Result<HttpResponse, AppError> {
//!     let response = context.recovery.find_id(&payload).await?;
//!     Ok(HttpResponse::Ok().json(response))
//! }
//! ```
//!
//! [`AppContext`]: crate::core::AppContext

pub mod auth;
pub mod callback;
pub mod users;

use actix_web::web;

use crate::core::AppError;

/// JSON 본문 해석 실패를 `bad_request`로 응답합니다.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        log::debug!("JSON 본문 해석 실패: {}", err);
        AppError::BadRequest(err.to_string()).into()
    })
}

/// 쿼리 문자열 해석 실패를 `bad_request`로 응답합니다.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        log::debug!("쿼리 해석 실패: {}", err);
        AppError::BadRequest(err.to_string()).into()
    })
}
