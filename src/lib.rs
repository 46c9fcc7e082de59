//! NOTI 인증 서비스 백엔드
//!
//! 외부 인증 게이트웨이(GoTrue 호환) 앞에서 NOTI 웹 앱의 인증 흐름을 처리하는
//! 서비스입니다. 토큰은 서버의 세션 저장소에만 두고, 브라우저에는 세션 쿠키만
//! 내려보냅니다.
//!
//! # Features
//!
//! - **콜백 해석**: 이메일 인증, 매직 링크, 비밀번호 재설정, 소셜 로그인 리다이렉트를
//!   분류해 목적지 하나로 보냅니다
//! - **계정 연결**: 방금 연결된 소셜 identity를 감지하고 유지/취소를 묻습니다
//! - **계정 찾기**: 마스킹된 아이디 조회, 존재 여부를 드러내지 않는 재설정 메일
//! - **자격 증명**: 이메일 로그인/회원가입, PKCE 소셜 로그인, 비밀번호 변경
//! - **MongoDB**: 계정 찾기용 프로필 저장
//! - **Redis**: 서버 측 세션 저장
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← REST API + 콜백 브릿지 페이지
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청/응답, 쿠키
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← 콜백 해석, 계정 연결, 계정 찾기
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────────────────────────────┐
//! │ IdentityGateway │ SessionStore │ Profiles │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use noti_auth_service::core::{AppContext, AppSettings};
//! use noti_auth_service::routes::configure_all_routes;
//!
//! let context = AppContext::assemble(gateway, store, profiles, AppSettings::from_env());
//! let app = App::new()
//!     .app_data(web::Data::new(context))
//!     .configure(configure_all_routes);
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod caching;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod utils;
pub mod routes;
pub mod handlers;
pub mod middlewares;

#[cfg(test)]
pub mod testing;
