//! # Core Module
//!
//! 서비스 전역에서 공유하는 기반 타입입니다.
//!
//! ### [`errors`] - 통합 에러 처리
//! - **AppError**: 애플리케이션 전역 에러 타입, Actix-Web `ResponseError` 구현
//! - **ErrorContext**: 하위 계층 에러에 문맥을 붙여 `AppError`로 변환
//!
//! ### [`context`] - 서비스 조립
//! - **AppSettings**: 환경 변수에서 읽은 실행 설정
//! - **AppContext**: 게이트웨이, 세션 저장소, 프로필 디렉터리를 주입받아 만든 서비스 묶음.
//!   `web::Data`로 핸들러에 공유됩니다.
//!
//! ## 에러 처리
//!
//! ```rust,ignore
//! use crate::core::{AppError, AppResult};
//!
//! async fn find_profile(name: &str) -> AppResult<Option<Profile>> {
//!     directory
//!         .find_by_name(name, None)
//!         .await
//!         .map_err(|e| AppError::DatabaseError(e.to_string()))
//! }
//! ```

pub mod context;
pub mod errors;

pub use context::*;
pub use errors::*;
