//! # Identity Provider Gateway
//!
//! 계정, 세션, identity, 비밀번호 재설정 메일을 소유한 외부 인증 서비스와의
//! 경계입니다. 서비스 계층은 [`IdentityGateway`] 트레이트에만 의존하고,
//! 운영 환경에서는 GoTrue 호환 REST 클라이언트([`GoTrueGateway`])를 주입합니다.
//!
//! ## 에러 모델
//!
//! | 변형 | 의미 |
//! |------|------|
//! | `Api` | 게이트웨이가 4xx/5xx로 응답 (`error_code`, 메시지 포함) |
//! | `Transport` | 네트워크 실패, 타임아웃 |
//! | `Decode` | 성공 응답을 해석할 수 없음 |

pub mod gotrue;
pub mod pkce;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::SocialProvider;
use crate::core::AppError;
use crate::domain::models::{AuthUser, Identity, Session, UserMetadata};

pub use gotrue::GoTrueGateway;
pub use pkce::PkceChallenge;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GatewayError {
    #[error("gateway api error ({status}): {message}")]
    Api {
        status: u16,
        code: Option<String>,
        message: String,
    },

    #[error("gateway transport error: {0}")]
    Transport(String),

    #[error("gateway response decode error: {0}")]
    Decode(String),
}

impl GatewayError {
    pub fn api(status: u16, code: Option<&str>, message: &str) -> Self {
        GatewayError::Api {
            status,
            code: code.map(str::to_string),
            message: message.to_string(),
        }
    }

    /// 게이트웨이 에러 코드 (예: `invalid_credentials`)
    pub fn code(&self) -> Option<&str> {
        match self {
            GatewayError::Api { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            GatewayError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            GatewayError::Api { message, .. } => message,
            GatewayError::Transport(message) | GatewayError::Decode(message) => message,
        }
    }

    /// 토큰이 만료되었거나 거부된 경우
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403))
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

impl From<GatewayError> for AppError {
    fn from(error: GatewayError) -> Self {
        if error.is_unauthorized() {
            AppError::AuthenticationError(error.to_string())
        } else {
            AppError::ExternalServiceError(error.to_string())
        }
    }
}

/// 회원가입 요청 파라미터
#[derive(Debug, Clone)]
pub struct SignUpParams {
    pub email: String,
    pub password: String,
    pub metadata: UserMetadata,
    /// 인증 메일 링크가 돌아올 주소
    pub email_redirect_to: String,
}

/// 회원가입 결과. 이메일 인증이 필요하면 `session`이 비어 있습니다.
#[derive(Debug, Clone)]
pub struct SignUpOutcome {
    pub user: AuthUser,
    pub session: Option<Session>,
}

/// 외부 인증 서비스 연산
#[async_trait]
pub trait IdentityGateway: Send + Sync {
    /// access token으로 현재 사용자를 조회합니다.
    async fn get_user(&self, access_token: &str) -> Result<AuthUser, GatewayError>;

    async fn refresh_session(&self, refresh_token: &str) -> Result<Session, GatewayError>;

    /// PKCE 인가 코드를 세션으로 교환합니다.
    async fn exchange_code(&self, code: &str, code_verifier: &str) -> Result<Session, GatewayError>;

    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session, GatewayError>;

    async fn sign_up(&self, params: &SignUpParams) -> Result<SignUpOutcome, GatewayError>;

    async fn sign_out(&self, access_token: &str) -> Result<(), GatewayError>;

    async fn unlink_identity(&self, access_token: &str, identity: &Identity) -> Result<(), GatewayError>;

    /// 비밀번호 재설정 메일을 발송합니다.
    async fn send_password_reset(&self, email: &str, redirect_to: &str) -> Result<(), GatewayError>;

    async fn update_password(&self, access_token: &str, password: &str) -> Result<AuthUser, GatewayError>;

    /// 관리자 권한으로 사용자 id 조회
    async fn admin_get_user(&self, user_id: &str) -> Result<AuthUser, GatewayError>;

    /// 관리자 권한으로 사용자 목록 조회 (1부터 시작하는 페이지)
    async fn admin_list_users(&self, page: u32, per_page: u32) -> Result<Vec<AuthUser>, GatewayError>;

    /// 소셜 로그인 시작 URL
    fn authorize_url(&self, provider: SocialProvider, redirect_to: &str, challenge: &PkceChallenge) -> String;
}
