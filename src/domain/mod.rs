//! # Domain Layer
//!
//! - `entities` - MongoDB 영속 문서
//! - `models` - 게이트웨이 사용자/세션, 콜백 이벤트, 리다이렉트 목적지
//! - `dto` - HTTP 요청/응답 본문

pub mod entities;
pub mod dto;
pub mod models;

pub use entities::*;
pub use dto::*;
pub use models::*;
