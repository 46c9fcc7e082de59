//! # Callback Event
//!
//! 인증 게이트웨이 리다이렉트의 쿼리 문자열과 URL 프래그먼트에서 읽어낸 값입니다.
//! 저장되지 않으며 요청 하나의 수명 동안만 존재합니다.
//!
//! 어떤 입력도 에러가 되지 않습니다. 해석할 수 없는 문자열은 빈 파라미터로
//! 취급하고, 빈 값은 없는 값과 같습니다.

use std::collections::HashMap;

use actix_web::web;

use crate::utils::string_utils::clean_optional_string;

/// 타입이 지정되지 않았을 때의 기본 이벤트 타입
pub const DEFAULT_EVENT_TYPE: &str = "signup";

/// 복구(비밀번호 재설정) 링크 이벤트 타입
pub const RECOVERY_EVENT_TYPE: &str = "recovery";

/// 쿼리 또는 프래그먼트 한쪽의 파라미터 묶음
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallbackParams {
    pub error: Option<String>,
    pub error_code: Option<String>,
    pub error_description: Option<String>,
    pub kind: Option<String>,
    pub code: Option<String>,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
}

impl CallbackParams {
    /// `a=1&b=2` 형식 문자열을 읽습니다. 앞의 `?`/`#`는 무시합니다.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim().trim_start_matches(['?', '#']);
        if trimmed.is_empty() {
            return Self::default();
        }

        match web::Query::<HashMap<String, String>>::from_query(trimmed) {
            Ok(query) => Self::from_map(query.into_inner()),
            Err(e) => {
                log::warn!("콜백 파라미터 해석 실패, 빈 값으로 처리: {}", e);
                Self::default()
            }
        }
    }

    pub fn from_map(mut map: HashMap<String, String>) -> Self {
        let mut take = |key: &str| clean_optional_string(map.remove(key));
        Self {
            error: take("error"),
            error_code: take("error_code"),
            error_description: take("error_description"),
            kind: take("type"),
            code: take("code"),
            access_token: take("access_token"),
            refresh_token: take("refresh_token"),
        }
    }

    fn has_error(&self) -> bool {
        self.error.is_some() || self.error_code.is_some()
    }
}

/// 실패로 끝난 리다이렉트의 사유
#[derive(Debug, Clone, PartialEq)]
pub struct CallbackFailure {
    pub reason: Option<String>,
    pub message: Option<String>,
}

/// 리다이렉트 한 번에 해당하는 콜백 이벤트
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallbackEvent {
    pub query: CallbackParams,
    pub fragment: CallbackParams,
}

impl CallbackEvent {
    pub fn new(query: CallbackParams, fragment: CallbackParams) -> Self {
        Self { query, fragment }
    }

    /// `location.search`, `location.hash` 원문에서 만듭니다.
    pub fn from_raw(search: &str, hash: &str) -> Self {
        Self::new(CallbackParams::parse(search), CallbackParams::parse(hash))
    }

    /// `error` 또는 `error_code`가 있으면 실패 사유를 돌려줍니다.
    ///
    /// 쿼리를 우선 보고, 쿼리에 에러가 없을 때만 프래그먼트의 에러를 봅니다.
    pub fn failure(&self) -> Option<CallbackFailure> {
        let source = if self.query.has_error() {
            &self.query
        } else if self.fragment.has_error() {
            &self.fragment
        } else {
            return None;
        };

        Some(CallbackFailure {
            reason: source.error_code.clone(),
            message: source.error_description.clone(),
        })
    }

    /// 이벤트 타입: 쿼리 → 프래그먼트 → `signup`
    pub fn kind(&self) -> &str {
        self.query
            .kind
            .as_deref()
            .or(self.fragment.kind.as_deref())
            .unwrap_or(DEFAULT_EVENT_TYPE)
    }

    pub fn is_recovery(&self) -> bool {
        self.kind() == RECOVERY_EVENT_TYPE
    }

    /// 프래그먼트에 access/refresh 토큰이 모두 있을 때만 돌려줍니다.
    pub fn tokens(&self) -> Option<(&str, &str)> {
        match (&self.fragment.access_token, &self.fragment.refresh_token) {
            (Some(access), Some(refresh)) => Some((access.as_str(), refresh.as_str())),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_prefers_query_then_fragment_then_default() {
        let both = CallbackEvent::from_raw("?type=recovery", "#type=signup");
        assert_eq!(both.kind(), "recovery");

        let fragment_only = CallbackEvent::from_raw("", "#type=magiclink&access_token=a");
        assert_eq!(fragment_only.kind(), "magiclink");

        let neither = CallbackEvent::from_raw("", "");
        assert_eq!(neither.kind(), "signup");
    }

    #[test]
    fn test_empty_type_counts_as_absent() {
        let event = CallbackEvent::from_raw("?type=", "#type=recovery");
        assert_eq!(event.kind(), "recovery");
        assert!(event.is_recovery());
    }

    #[test]
    fn test_failure_from_error_or_code() {
        let by_error = CallbackEvent::from_raw("?error=access_denied", "");
        assert_eq!(
            by_error.failure(),
            Some(CallbackFailure { reason: None, message: None })
        );

        let by_code = CallbackEvent::from_raw(
            "?error_code=otp_expired&error_description=Email+link+is+invalid+or+has+expired",
            "",
        );
        let failure = by_code.failure().unwrap();
        assert_eq!(failure.reason.as_deref(), Some("otp_expired"));
        assert_eq!(failure.message.as_deref(), Some("Email link is invalid or has expired"));
    }

    #[test]
    fn test_fragment_error_is_a_failure_too() {
        let event = CallbackEvent::from_raw("", "#error=unauthorized_client&error_code=401");
        assert_eq!(event.failure().unwrap().reason.as_deref(), Some("401"));
    }

    #[test]
    fn test_tokens_require_both_values() {
        let full = CallbackEvent::from_raw("", "#access_token=at&refresh_token=rt&type=signup");
        assert_eq!(full.tokens(), Some(("at", "rt")));

        let partial = CallbackEvent::from_raw("", "#access_token=at");
        assert_eq!(partial.tokens(), None);

        let in_query = CallbackEvent::from_raw("?access_token=at&refresh_token=rt", "");
        assert_eq!(in_query.tokens(), None);
    }

    #[test]
    fn test_malformed_input_never_panics() {
        let event = CallbackEvent::from_raw("?%%%=&&=", "#%E0%A4%A");
        assert!(event.failure().is_none());
        assert_eq!(event.kind(), "signup");
    }
}
