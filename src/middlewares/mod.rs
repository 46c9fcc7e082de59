//! 미들웨어 모듈
//!
//! ActixWeb 요청 처리 파이프라인에서 사용되는 미들웨어입니다.
//!
//! # 제공 미들웨어
//!
//! ### 세션 가드 (SessionGuard)
//! - 세션 쿠키(`noti_sid`)로 저장된 세션을 찾고 게이트웨이에서 사용자를 다시 확인
//! - 확인된 세션을 request extension에 저장
//! - 세션이 없으면 `401 {"error":"authentication_required"}`
//!
//! # 사용 방법
//!
//! ```rust,ignore
//! use crate::middlewares::SessionGuard;
//!
//! #[get("/me", wrap = "SessionGuard::required()")]
//! pub async fn me(current: CurrentSession) -> HttpResponse {
//!     HttpResponse::Ok().json(CurrentUserResponse::from(current.0.user()))
//! }
//! ```

pub mod session_guard;
mod session_guard_inner;

pub use session_guard::SessionGuard;
