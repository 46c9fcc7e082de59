//! 인증 관련 요청 DTO

use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::domain::dto::recovery::request::{validate_birth, validate_email_shape, validate_full_name};
use crate::utils::string_utils::{deserialize_optional_string, normalize_email};

/// 이메일 로그인 요청
///
/// 형식 검사는 로그인 실패 분류와 함께 서비스에서 수행합니다.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// 회원가입 요청
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_signup_passwords_match"))]
pub struct SignUpRequest {
    #[validate(length(min = 1, max = 20, message = "닉네임은 1-20자 사이여야 합니다"))]
    pub nickname: String,

    #[validate(custom(function = "validate_full_name"))]
    pub full_name: String,

    #[validate(custom(function = "validate_email_shape"))]
    pub email: String,

    #[validate(length(min = 8, message = "비밀번호는 8자 이상으로 설정해 주세요."))]
    pub password: String,

    pub confirm_password: String,

    #[validate(custom(function = "validate_birth"))]
    pub birth: String,
}

impl SignUpRequest {
    pub fn normalized_email(&self) -> String {
        normalize_email(&self.email)
    }
}

fn validate_signup_passwords_match(req: &SignUpRequest) -> Result<(), ValidationError> {
    if req.password != req.confirm_password {
        return Err(ValidationError::new("passwords_mismatch")
            .with_message("비밀번호가 일치하지 않아요.".into()));
    }
    Ok(())
}

/// 재설정 폼에서 새 비밀번호를 저장하는 요청
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_update_passwords_match"))]
pub struct PasswordUpdateRequest {
    #[validate(length(min = 8, message = "비밀번호는 8자 이상으로 설정해 주세요."))]
    pub password: String,

    pub confirm_password: String,
}

fn validate_update_passwords_match(req: &PasswordUpdateRequest) -> Result<(), ValidationError> {
    if req.password != req.confirm_password {
        return Err(ValidationError::new("passwords_mismatch")
            .with_message("비밀번호가 일치하지 않아요.".into()));
    }
    Ok(())
}

/// 브릿지 페이지가 보내는 콜백 원문 (`location.search`, `location.hash`)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CallbackResolveRequest {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub hash: String,
}

/// identity 하나를 지정하는 요청 (연결 취소, 연결 해제)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityRequest {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub identity_id: Option<String>,
}

/// 이메일 가입 여부 확인 쿼리
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmailCheckQuery {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup(password: &str, confirm: &str, birth: &str) -> SignUpRequest {
        SignUpRequest {
            nickname: "길동".to_string(),
            full_name: "홍길동".to_string(),
            email: "hong@example.com".to_string(),
            password: password.to_string(),
            confirm_password: confirm.to_string(),
            birth: birth.to_string(),
        }
    }

    #[test]
    fn test_signup_valid() {
        assert!(signup("password1", "password1", "1990-01-01").validate().is_ok());
    }

    #[test]
    fn test_signup_password_rules() {
        assert!(signup("short", "short", "1990-01-01").validate().is_err());
        assert!(signup("password1", "password2", "1990-01-01").validate().is_err());
    }

    #[test]
    fn test_signup_birth_shape() {
        assert!(signup("password1", "password1", "1990.01.01").validate().is_err());
    }

    #[test]
    fn test_signup_deserializes_camel_case() {
        let req: SignUpRequest = serde_json::from_str(
            r#"{"nickname":"n","fullName":"홍길동","email":"a@b.co","password":"12345678","confirmPassword":"12345678","birth":"2000-12-31"}"#,
        )
        .unwrap();
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_identity_request_empty_is_none() {
        let req: IdentityRequest = serde_json::from_str(r#"{"identityId": "  "}"#).unwrap();
        assert_eq!(req.identity_id, None);

        let req: IdentityRequest = serde_json::from_str(r#"{"identityId": "i-1"}"#).unwrap();
        assert_eq!(req.identity_id.as_deref(), Some("i-1"));
    }
}
