//! # Domain Entities
//!
//! MongoDB에 저장되는 영속 문서입니다.

pub mod profiles;

pub use profiles::*;
