//! 계정 찾기 응답 DTO

use serde::Serialize;

/// 아이디 찾기 결과. 찾지 못한 경우도 그대로 알려줍니다.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FindIdResponse {
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub masked_email: Option<String>,
}

impl FindIdResponse {
    pub fn found(masked_email: String) -> Self {
        Self {
            found: true,
            masked_email: Some(masked_email),
        }
    }

    pub fn not_found() -> Self {
        Self {
            found: false,
            masked_email: None,
        }
    }
}

/// 비밀번호 찾기 응답. 일치 여부와 관계없이 항상 같은 값입니다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SentResponse {
    pub sent: bool,
}

impl SentResponse {
    pub const ACK: SentResponse = SentResponse { sent: true };
}

/// 이메일 가입 여부 확인 결과
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EmailCheckResponse {
    pub exists: bool,
}
