//! 인증 관련 응답 DTO

use serde::Serialize;

use crate::config::IdentityProvider;
use crate::domain::models::{AuthUser, Route};

/// 다음에 이동할 프론트엔드 경로
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RedirectResponse {
    pub redirect: String,
}

impl From<&Route> for RedirectResponse {
    fn from(route: &Route) -> Self {
        Self {
            redirect: route.to_path(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpResponse {
    pub needs_email_confirm: bool,
}

/// 현재 로그인한 사용자 요약
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUserResponse {
    pub id: String,
    pub email: Option<String>,
    pub nickname: Option<String>,
    pub full_name: Option<String>,
    pub providers: Vec<IdentityProvider>,
}

impl From<&AuthUser> for CurrentUserResponse {
    fn from(user: &AuthUser) -> Self {
        Self {
            id: user.id.clone(),
            email: user.email.clone(),
            nickname: user.user_metadata.nickname.clone(),
            full_name: user.user_metadata.full_name.clone(),
            providers: user.providers(),
        }
    }
}
