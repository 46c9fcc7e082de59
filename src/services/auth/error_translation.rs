//! 게이트웨이 에러와 입력 검증 에러를 사용자에게 보여줄 한국어 문구로 바꿉니다.

use once_cell::sync::Lazy;
use regex::Regex;
use validator::ValidationErrors;

use crate::services::gateway::GatewayError;

pub const GENERIC_FAILURE_MESSAGE: &str = "문제가 발생했어요. 잠시 후 다시 시도해 주세요.";

static INVALID_EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"invalid.*email|email.*invalid").expect("invalid email message regex"));

/// 게이트웨이 에러 코드별 안내 문구. 알 수 없는 코드는 메시지를 보고 추정합니다.
pub fn translate_auth_error(error: &GatewayError) -> &'static str {
    match error.code().unwrap_or_default() {
        "email_address_invalid" => "사용할 수 없는 이메일이에요. 실제 받는 메일 주소로 입력해 주세요.",
        "email_address_not_authorized" => {
            "이 프로젝트 설정상 해당 이메일로는 메일을 보낼 수 없어요. (SMTP 설정을 확인해 주세요)"
        }
        "email_exists" | "user_already_exists" => "이미 가입된 이메일이에요.",
        "weak_password" => "비밀번호가 너무 약해요. 8자 이상으로 설정해 주세요.",
        "invalid_credentials" => "이메일 또는 비밀번호가 올바르지 않아요.",
        "email_not_confirmed" => "계정을 사용하려면 이메일 인증을 먼저 완료해 주세요.",
        _ => {
            if INVALID_EMAIL_RE.is_match(&error.message().to_lowercase()) {
                "올바른 이메일 형식이 아니에요."
            } else {
                GENERIC_FAILURE_MESSAGE
            }
        }
    }
}

/// 이미 가입된 계정 때문에 실패했는지
pub fn is_duplicate_account(error: &GatewayError) -> bool {
    matches!(error.code(), Some("email_exists" | "user_already_exists"))
}

/// 검증 에러 중 첫 번째 안내 문구 (필드 이름 순)
pub fn first_validation_message(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(_, errs)| errs.iter())
        .find_map(|err| err.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| "입력값을 확인해 주세요.".to_string())
}
