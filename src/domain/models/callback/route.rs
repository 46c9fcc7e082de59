//! 인증 흐름이 끝난 뒤 브라우저를 보낼 프론트엔드 경로

use crate::config::IdentityProvider;

/// 프론트엔드 페이지 경로
pub mod paths {
    pub const LOGIN: &str = "/login";
    pub const FIND_PW: &str = "/account/find/pw";
    pub const RESET_PASSWORD: &str = "/account/reset-password";
    pub const CALLBACK: &str = "/auth/callback";
    pub const LINK_ACCOUNT: &str = "/auth/link-account";
    pub const VERIFIED: &str = "/auth/verified";
    pub const DASHBOARD: &str = "/dashboard";
    pub const TASKS: &str = "/tasks";
}

/// 콜백 해석 결과로 선택되는 목적지. 리다이렉트 한 번에 정확히 하나.
#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    /// 인증 실패 안내 (`status=fail`)
    VerificationFailed {
        reason: Option<String>,
        message: Option<String>,
    },
    /// 이메일 인증 완료 안내 (`status=ok`)
    EmailVerified { kind: String },
    /// 새 비밀번호 입력 폼
    ResetPassword,
    /// 비밀번호 찾기 폼 (`error=invalid_link`)
    InvalidRecoveryLink,
    /// 계정 연결 확인 페이지
    LinkAccount {
        provider: IdentityProvider,
        email: String,
        identity_id: String,
    },
    /// 로그인 후 기본 화면
    Landing,
    Dashboard,
    Login,
}

impl Route {
    pub fn to_path(&self) -> String {
        match self {
            Route::VerificationFailed { reason, message } => {
                let mut path = format!("{}?status=fail", paths::VERIFIED);
                if let Some(reason) = reason {
                    path.push_str(&format!("&reason={}", urlencoding::encode(reason)));
                }
                if let Some(message) = message {
                    path.push_str(&format!("&message={}", urlencoding::encode(message)));
                }
                path
            }
            Route::EmailVerified { kind } => format!(
                "{}?status=ok&type={}",
                paths::VERIFIED,
                urlencoding::encode(kind)
            ),
            Route::ResetPassword => paths::RESET_PASSWORD.to_string(),
            Route::InvalidRecoveryLink => format!("{}?error=invalid_link", paths::FIND_PW),
            Route::LinkAccount {
                provider,
                email,
                identity_id,
            } => format!(
                "{}?provider={}&email={}&identity_id={}",
                paths::LINK_ACCOUNT,
                urlencoding::encode(provider.as_str()),
                urlencoding::encode(email),
                urlencoding::encode(identity_id)
            ),
            Route::Landing => paths::TASKS.to_string(),
            Route::Dashboard => paths::DASHBOARD.to_string(),
            Route::Login => paths::LOGIN.to_string(),
        }
    }
}
