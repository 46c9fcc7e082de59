//! # Domain Models Module
//!
//! 저장되지 않는 도메인 모델과 값 객체입니다.
//!
//! - [`identity`] - 게이트웨이 사용자, identity, 세션
//! - [`callback`] - 콜백 이벤트와 리다이렉트 목적지
//!
//! 영속 문서(MongoDB)는 `../entities/`에 둡니다.

pub mod identity;
pub mod callback;

pub use identity::*;
pub use callback::*;
