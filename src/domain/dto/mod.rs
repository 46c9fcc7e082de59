//! # Data Transfer Objects
//!
//! HTTP 요청/응답 본문 구조체입니다. JSON 필드는 프론트엔드와 맞춰 camelCase를
//! 사용합니다.
//!
//! - [`auth`] - 로그인, 회원가입, 콜백, 계정 연결
//! - [`recovery`] - 아이디/비밀번호 찾기, 이메일 확인

pub mod auth;
pub mod recovery;

pub use auth::{
    CallbackResolveRequest, CurrentUserResponse, EmailCheckQuery,
    IdentityRequest, LoginRequest, PasswordUpdateRequest, RedirectResponse, SignUpRequest,
    SignUpResponse,
};
pub use recovery::{
    EmailCheckResponse, FindIdRequest, FindIdResponse, FindPasswordRequest, SentResponse,
};
