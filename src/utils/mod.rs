//! 공통 유틸리티 함수 모듈
//!
//! 입력 문자열 정리, 이메일/생년월일 형식 검증, 세션/PKCE 쿠키 처리를 제공합니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::utils::string_utils::{is_valid_birth, normalize_email};
//!
//! let email = normalize_email("  Hong@Example.com ");
//! assert!(is_valid_birth("1990-01-01"));
//! ```

pub mod cookies;
pub mod string_utils;
