//! # Account Recovery Service
//!
//! 아이디(이메일) 찾기, 비밀번호 재설정 메일 요청, 이메일 가입 여부 확인.
//!
//! - **Find-ID**: 이름 + 생년월일이 일치하는 프로필의 이메일을 마스킹해 돌려줍니다.
//!   찾지 못한 경우도 그대로 알려줍니다.
//! - **Find-PW**: 프로필과 게이트웨이의 공식 이메일이 모두 일치할 때만 재설정
//!   메일을 보내며, 응답은 어떤 경우에도 `{"sent":true}` 하나입니다.
//!   일치 여부가 응답에서 드러나지 않도록 실패는 모두 로그로만 남깁니다.

use std::sync::Arc;

use validator::Validate;

use crate::config::join_url;
use crate::core::{AppError, AppResult};
use crate::domain::dto::{EmailCheckResponse, FindIdRequest, FindIdResponse, FindPasswordRequest, SentResponse};
use crate::domain::models::paths;
use crate::repositories::profiles::ProfileDirectory;
use crate::services::gateway::IdentityGateway;
use crate::services::recovery::masking::mask_email;
use crate::utils::string_utils::normalize_email;

/// 가입 여부 확인 시 조회하는 사용자 목록 범위
const EMAIL_CHECK_PAGE: u32 = 1;
const EMAIL_CHECK_PER_PAGE: u32 = 200;

pub struct RecoveryService {
    gateway: Arc<dyn IdentityGateway>,
    profiles: Arc<dyn ProfileDirectory>,
    site_url: String,
}

impl RecoveryService {
    pub fn new(gateway: Arc<dyn IdentityGateway>, profiles: Arc<dyn ProfileDirectory>, site_url: String) -> Self {
        Self {
            gateway,
            profiles,
            site_url,
        }
    }

    /// 재설정 메일 링크가 돌아올 주소
    pub fn recovery_redirect(&self) -> String {
        join_url(&self.site_url, &format!("{}?type=recovery", paths::CALLBACK))
    }

    pub async fn find_id(&self, request: &FindIdRequest) -> AppResult<FindIdResponse> {
        request
            .validate()
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        let profile = self
            .profiles
            .find_by_name(request.normalized_name(), Some(request.birth.as_str()))
            .await?;

        match profile.and_then(|p| p.email) {
            Some(email) => {
                let masked = mask_email(&email);
                log::info!("아이디 찾기: 일치하는 프로필 있음 ({})", masked);
                Ok(FindIdResponse::found(masked))
            }
            None => {
                log::info!("아이디 찾기: 일치하는 프로필 없음");
                Ok(FindIdResponse::not_found())
            }
        }
    }

    /// 형식 오류만 에러로 돌려주고, 나머지는 항상 `SentResponse::ACK`.
    pub async fn find_password(&self, request: &FindPasswordRequest) -> AppResult<SentResponse> {
        request
            .validate()
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        let email = request.normalized_email();
        if let Err(reason) = self.send_reset_if_matching(request, &email).await {
            log::warn!("비밀번호 찾기: 메일 미발송 ({}) - {}", mask_email(&email), reason);
        }

        Ok(SentResponse::ACK)
    }

    async fn send_reset_if_matching(&self, request: &FindPasswordRequest, email: &str) -> Result<(), String> {
        let profile = self
            .profiles
            .find_by_name(request.normalized_name(), request.birth.as_deref())
            .await
            .map_err(|e| format!("profile lookup failed: {}", e))?
            .ok_or_else(|| "no matching profile".to_string())?;

        let user = self
            .gateway
            .admin_get_user(&profile.id)
            .await
            .map_err(|e| format!("user lookup failed: {}", e))?;

        let official = user.email.as_deref().map(normalize_email).unwrap_or_default();
        if official.is_empty() || official != email {
            return Err("email mismatch".to_string());
        }

        self.gateway
            .send_password_reset(email, &self.recovery_redirect())
            .await
            .map_err(|e| format!("reset mail failed: {}", e))?;

        log::info!("비밀번호 재설정 메일 발송: {}", mask_email(email));
        Ok(())
    }

    /// 이메일로 가입된 계정이 있는지 확인합니다.
    pub async fn email_exists(&self, raw_email: Option<&str>) -> AppResult<EmailCheckResponse> {
        let email = raw_email
            .map(normalize_email)
            .filter(|e| !e.is_empty())
            .ok_or_else(|| AppError::BadRequest("email is required".to_string()))?;

        let users = self
            .gateway
            .admin_list_users(EMAIL_CHECK_PAGE, EMAIL_CHECK_PER_PAGE)
            .await
            .map_err(|e| AppError::InternalError(format!("failed to list users: {}", e)))?;

        let exists = users
            .iter()
            .any(|user| user.email.as_deref().map(normalize_email).as_deref() == Some(email.as_str()));

        Ok(EmailCheckResponse { exists })
    }
}
