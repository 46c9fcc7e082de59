//! 인증 서비스 모듈
//!
//! 외부 인증 게이트웨이 위에서 동작하는 세션/콜백/계정 연결/자격 증명 흐름입니다.
//!
//! # Components
//!
//! - [`SessionResolver`] - 원시 토큰 또는 세션 쿠키 → 세션
//! - [`LinkageEvaluator`] - 방금 연결된 소셜 identity 감지 (순수 함수)
//! - [`CallbackInterpreter`] - 리다이렉트 분류, 목적지 하나 선택
//! - [`LinkAccountFlow`] - 계정 연결 확인/취소, identity 해제
//! - [`CredentialService`] - 로그인, 회원가입, 소셜 로그인 시작, 비밀번호 변경
//!
//! # Examples
//!
//! ```rust,ignore
//! let outcome = context.callbacks.interpret(&event, session_id.as_ref()).await;
//! let redirect = outcome.route.to_path();
//! ```

pub mod callback_interpreter;
pub mod credential_service;
pub mod error_translation;
pub mod link_account;
pub mod linkage;
pub mod session_resolver;

pub use callback_interpreter::{CallbackInterpreter, CallbackOutcome};
pub use credential_service::{CredentialService, LoginFailure, SignUpResult, CODE_CALLBACK_PATH};
pub use error_translation::translate_auth_error;
pub use link_account::{LinkAccountFlow, LinkState};
pub use linkage::{LinkDecision, LinkageEvaluator, PendingLink};
pub use session_resolver::SessionResolver;
