//! 계정 찾기 요청 DTO
//!
//! 두 요청 모두 형식 오류는 상세 사유 없이 `bad_request` 하나로 응답합니다.

use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::utils::string_utils::{
    char_len, deserialize_optional_string, is_valid_birth, is_valid_email, normalize_email,
};

/// 아이디(이메일) 찾기 요청
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FindIdRequest {
    pub full_name: String,

    #[validate(custom(function = "validate_birth"))]
    pub birth: String,
}

impl FindIdRequest {
    pub fn normalized_name(&self) -> &str {
        self.full_name.trim()
    }
}

/// 비밀번호 찾기(재설정 메일) 요청
///
/// `birth`는 선택 항목이며 빈 문자열은 입력하지 않은 것으로 봅니다.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_optional_birth"))]
pub struct FindPasswordRequest {
    #[validate(custom(function = "validate_email_shape"))]
    pub email: String,

    #[validate(custom(function = "validate_full_name"))]
    pub full_name: String,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub birth: Option<String>,
}

impl FindPasswordRequest {
    pub fn normalized_email(&self) -> String {
        normalize_email(&self.email)
    }

    pub fn normalized_name(&self) -> &str {
        self.full_name.trim()
    }
}

pub(crate) fn validate_birth(birth: &str) -> Result<(), ValidationError> {
    if !is_valid_birth(birth) {
        return Err(ValidationError::new("invalid_birth")
            .with_message("생년월일은 YYYY-MM-DD 형식이어야 합니다".into()));
    }
    Ok(())
}

pub(crate) fn validate_email_shape(email: &str) -> Result<(), ValidationError> {
    if !is_valid_email(&normalize_email(email)) {
        return Err(ValidationError::new("invalid_email")
            .with_message("올바른 이메일 형식이 아니에요.".into()));
    }
    Ok(())
}

pub(crate) fn validate_full_name(full_name: &str) -> Result<(), ValidationError> {
    if char_len(full_name.trim()) < 2 {
        return Err(ValidationError::new("invalid_full_name")
            .with_message("이름은 2자 이상 입력해 주세요.".into()));
    }
    Ok(())
}

fn validate_optional_birth(req: &FindPasswordRequest) -> Result<(), ValidationError> {
    match req.birth.as_deref() {
        Some(birth) => validate_birth(birth),
        None => Ok(()),
    }
}
