//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! 모든 서비스는 생성 시점에 협력 객체(`Arc<dyn IdentityGateway>`, 세션 저장소,
//! 프로필 디렉터리)를 주입받으며 [`crate::core::AppContext`]가 한 번 조립합니다.
//!
//! - [`gateway`] - 외부 인증 게이트웨이 경계 (GoTrue REST 클라이언트, PKCE)
//! - [`auth`] - 세션, 콜백 해석, 계정 연결, 로그인/회원가입
//! - [`recovery`] - 아이디/비밀번호 찾기, 가입 여부 확인
//!
//! # Examples
//!
//! ```rust,ignore
//! let context = AppContext::assemble(gateway, store, profiles, AppSettings::from_env());
//! let response = context.recovery.find_id(&request).await?;
//! ```

pub mod auth;
pub mod gateway;
pub mod recovery;
