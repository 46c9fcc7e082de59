//! 계정 찾기 서비스 모듈
//!
//! 아이디 찾기, 비밀번호 재설정 메일 요청, 이메일 가입 여부 확인과
//! 응답/로그에 쓰는 이메일 마스킹을 제공합니다.

pub mod masking;
pub mod recovery_service;

pub use masking::mask_email;
pub use recovery_service::RecoveryService;
