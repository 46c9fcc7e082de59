//! # Repositories
//!
//! 저장소 접근 계층입니다.
//!
//! - [`profiles`] - MongoDB `profiles` 컬렉션
//! - [`sessions`] - 세션 저장소 (Redis / 메모리)

pub mod profiles;
pub mod sessions;
