//! # Credential Service
//!
//! 이메일 로그인, 회원가입, 소셜 로그인 시작(PKCE), 코드 교환, 비밀번호 변경을
//! 담당합니다. 게이트웨이가 발급한 세션은 모두 [`SessionResolver::persist`]를 거쳐
//! 세션 저장소에 들어갑니다.
//!
//! ## 로그인 실패 분류
//!
//! | 분류 | 조건 | HTTP |
//! |------|------|------|
//! | `format` | 이메일 형식 오류 | 400 |
//! | `credential` | 빈 비밀번호, 400 응답, "invalid credentials" 메시지 | 400 / 401 |
//! | `unconfirmed` | `email_not_confirmed` | 403 |
//! | `server` | 그 밖의 게이트웨이 실패 | 502 |
//! | `bad_response` | 성공 응답을 해석할 수 없음 | 502 |
//! | `network` | 게이트웨이에 닿지 못함 | 503 |

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::json;
use thiserror::Error;
use validator::Validate;

use crate::config::{join_url, SocialProvider};
use crate::core::{AppError, AppResult};
use crate::domain::dto::{LoginRequest, PasswordUpdateRequest, SignUpRequest};
use crate::domain::entities::Profile;
use crate::domain::models::{paths, ResolvedSession, UserMetadata};
use crate::repositories::profiles::ProfileDirectory;
use crate::services::auth::error_translation::{
    first_validation_message, is_duplicate_account, translate_auth_error,
};
use crate::services::auth::session_resolver::SessionResolver;
use crate::services::gateway::{GatewayError, IdentityGateway, PkceChallenge, SignUpParams};
use crate::services::recovery::masking::mask_email;
use crate::utils::string_utils::{is_valid_email, normalize_email};

/// 소셜 로그인이 돌아오는 서버 경로
pub const CODE_CALLBACK_PATH: &str = "/api/auth/callback";

static CREDENTIAL_MESSAGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"invalid (login )?credentials|invalid email or password").expect("credential message regex")
});

/// 분류된 로그인 실패
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginFailure {
    #[error("올바른 이메일 주소를 입력해주세요.")]
    Format,

    #[error("비밀번호를 입력해 주세요.")]
    PasswordEmpty,

    #[error("이메일 또는 비밀번호가 올바르지 않습니다.")]
    Credential,

    #[error("계정을 사용하려면 이메일 인증을 먼저 완료해 주세요.")]
    Unconfirmed,

    #[error("서버 오류가 발생했습니다. 잠시 후 다시 시도해 주세요.")]
    Server,

    #[error("서버 응답이 올바르지 않습니다. 잠시 후 다시 시도해 주세요.")]
    BadResponse,

    #[error("네트워크 오류가 발생했습니다. 인터넷 연결을 확인해 주세요.")]
    Network,
}

impl LoginFailure {
    pub fn kind(&self) -> &'static str {
        match self {
            LoginFailure::Format => "format",
            LoginFailure::PasswordEmpty | LoginFailure::Credential => "credential",
            LoginFailure::Unconfirmed => "unconfirmed",
            LoginFailure::Server => "server",
            LoginFailure::BadResponse => "bad_response",
            LoginFailure::Network => "network",
        }
    }

    /// 게이트웨이 로그인 에러 분류
    pub fn classify(error: &GatewayError) -> Self {
        match error {
            GatewayError::Transport(_) => LoginFailure::Network,
            GatewayError::Decode(_) => LoginFailure::BadResponse,
            GatewayError::Api { status, .. } => {
                if error.code() == Some("email_not_confirmed") {
                    LoginFailure::Unconfirmed
                } else if *status == 400 || CREDENTIAL_MESSAGE_RE.is_match(&error.message().to_lowercase()) {
                    LoginFailure::Credential
                } else {
                    LoginFailure::Server
                }
            }
        }
    }
}

impl ResponseError for LoginFailure {
    fn status_code(&self) -> StatusCode {
        match self {
            LoginFailure::Format | LoginFailure::PasswordEmpty => StatusCode::BAD_REQUEST,
            LoginFailure::Credential => StatusCode::UNAUTHORIZED,
            LoginFailure::Unconfirmed => StatusCode::FORBIDDEN,
            LoginFailure::Server | LoginFailure::BadResponse => StatusCode::BAD_GATEWAY,
            LoginFailure::Network => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({
            "error": self.kind(),
            "message": self.to_string(),
        }))
    }
}

/// 회원가입 결과
#[derive(Debug, Clone)]
pub struct SignUpResult {
    /// 게이트웨이가 바로 세션을 준 경우 (이메일 인증 불필요)
    pub session: Option<ResolvedSession>,
}

impl SignUpResult {
    pub fn needs_email_confirm(&self) -> bool {
        self.session.is_none()
    }
}

pub struct CredentialService {
    gateway: Arc<dyn IdentityGateway>,
    sessions: Arc<SessionResolver>,
    profiles: Arc<dyn ProfileDirectory>,
    site_url: String,
}

impl CredentialService {
    pub fn new(
        gateway: Arc<dyn IdentityGateway>,
        sessions: Arc<SessionResolver>,
        profiles: Arc<dyn ProfileDirectory>,
        site_url: String,
    ) -> Self {
        Self {
            gateway,
            sessions,
            profiles,
            site_url,
        }
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<ResolvedSession, LoginFailure> {
        let email = normalize_email(&request.email);
        if !is_valid_email(&email) {
            return Err(LoginFailure::Format);
        }
        if request.password.is_empty() {
            return Err(LoginFailure::PasswordEmpty);
        }

        let session = self
            .gateway
            .sign_in_with_password(&email, &request.password)
            .await
            .map_err(|e| {
                let failure = LoginFailure::classify(&e);
                log::warn!("로그인 실패 ({}): {} - {}", failure.kind(), mask_email(&email), e);
                failure
            })?;

        let resolved = self.sessions.persist(session).await.map_err(|e| {
            log::error!("로그인 세션 저장 실패: {}", e);
            LoginFailure::Server
        })?;

        log::info!("로그인 성공: 사용자 ID {}", resolved.user().id);
        Ok(resolved)
    }

    pub async fn sign_up(&self, request: &SignUpRequest) -> AppResult<SignUpResult> {
        request
            .validate()
            .map_err(|e| AppError::ValidationError(first_validation_message(&e)))?;

        let email = request.normalized_email();
        let full_name = request.full_name.trim().to_string();
        let params = SignUpParams {
            email: email.clone(),
            password: request.password.clone(),
            metadata: UserMetadata {
                nickname: Some(request.nickname.trim().to_string()),
                full_name: Some(full_name.clone()),
                birth: Some(request.birth.clone()),
            },
            email_redirect_to: join_url(&self.site_url, paths::CALLBACK),
        };

        let outcome = self.gateway.sign_up(&params).await.map_err(|e| {
            log::warn!("회원가입 실패: {} - {}", mask_email(&email), e);
            sign_up_error(&e)
        })?;

        let mut profile = Profile::new(outcome.user.id.clone(), full_name)
            .with_email(email.as_str())
            .with_birth(request.birth.as_str());
        profile.nickname = Some(request.nickname.trim().to_string());
        if let Err(e) = self.profiles.save_signup_profile(&profile).await {
            log::warn!("프로필 저장 보류: {}", e);
        }

        let session = match outcome.session {
            Some(session) => Some(self.sessions.persist(session).await?),
            None => None,
        };

        log::info!(
            "회원가입 완료: 사용자 ID {} (이메일 인증 필요: {})",
            outcome.user.id,
            session.is_none()
        );
        Ok(SignUpResult { session })
    }

    /// 소셜 로그인 시작 URL과 이번 요청의 PKCE 값
    pub fn oauth_start(&self, provider: SocialProvider) -> (String, PkceChallenge) {
        let challenge = PkceChallenge::generate();
        let redirect_to = join_url(&self.site_url, CODE_CALLBACK_PATH);
        let url = self.gateway.authorize_url(provider, &redirect_to, &challenge);
        log::debug!("소셜 로그인 시작: {}", provider.as_str());
        (url, challenge)
    }

    /// 인가 코드를 세션으로 교환해 저장합니다.
    pub async fn exchange_code(&self, code: &str, code_verifier: &str) -> AppResult<ResolvedSession> {
        let session = self.gateway.exchange_code(code, code_verifier).await?;
        let resolved = self.sessions.persist(session).await?;
        log::info!("코드 교환 완료: 사용자 ID {}", resolved.user().id);
        Ok(resolved)
    }

    /// 재설정 폼에서 새 비밀번호를 저장합니다.
    pub async fn update_password(&self, resolved: &ResolvedSession, request: &PasswordUpdateRequest) -> AppResult<()> {
        request
            .validate()
            .map_err(|e| AppError::ValidationError(first_validation_message(&e)))?;

        self.gateway
            .update_password(&resolved.session.access_token, &request.password)
            .await
            .map_err(|e| {
                log::warn!("비밀번호 변경 실패: 사용자 ID {} - {}", resolved.user().id, e);
                match e.status() {
                    Some(status) if (400..500).contains(&status) && !e.is_unauthorized() => {
                        AppError::ValidationError(translate_auth_error(&e).to_string())
                    }
                    _ => e.into(),
                }
            })?;

        log::info!("비밀번호 변경 완료: 사용자 ID {}", resolved.user().id);
        Ok(())
    }
}

fn sign_up_error(error: &GatewayError) -> AppError {
    let message = translate_auth_error(error).to_string();
    if is_duplicate_account(error) {
        return AppError::ConflictError(message);
    }
    match error.status() {
        Some(status) if (400..500).contains(&status) => AppError::ValidationError(message),
        _ => AppError::ExternalServiceError(error.to_string()),
    }
}
