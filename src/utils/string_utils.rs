//! # 문자열 유틸리티
//!
//! 입력 정리와 형식 검증에 쓰이는 공통 함수들입니다.
//! 이메일과 생년월일 검증은 모두 "모양"만 확인하는 정규식 검사입니다.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex")
});

static BIRTH_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("birth regex")
});

/// 앞뒤 공백을 제거하고, 비어 있으면 `None`을 돌려줍니다.
pub fn clean_optional_string(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// serde 필드에 `deserialize_with`로 붙여 빈 문자열을 `None`으로 받습니다.
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(clean_optional_string(opt))
}

/// 이메일 비교용 정규화 (trim + 소문자)
pub fn normalize_email(value: &str) -> String {
    value.trim().to_lowercase()
}

/// `local@domain.tld` 모양인지 확인합니다.
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

/// `YYYY-MM-DD` 모양인지 확인합니다.
///
/// 달력상 존재하지 않는 날짜(예: `2024-02-30`)도 통과합니다.
pub fn is_valid_birth(value: &str) -> bool {
    BIRTH_RE.is_match(value)
}

/// 유니코드 문자 단위 길이
pub fn char_len(value: &str) -> usize {
    value.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_optional_string() {
        assert_eq!(clean_optional_string(Some("  recovery ".to_string())), Some("recovery".to_string()));
        assert_eq!(clean_optional_string(Some("".to_string())), None);
        assert_eq!(clean_optional_string(Some("   ".to_string())), None);
        assert_eq!(clean_optional_string(None), None);
    }

    #[test]
    fn test_deserialize_optional_string() {
        #[derive(Deserialize)]
        struct Form {
            #[serde(default, deserialize_with = "deserialize_optional_string")]
            birth: Option<String>,
        }

        let empty: Form = serde_json::from_str(r#"{"birth": ""}"#).unwrap();
        assert_eq!(empty.birth, None);

        let missing: Form = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(missing.birth, None);

        let filled: Form = serde_json::from_str(r#"{"birth": " 1990-01-01 "}"#).unwrap();
        assert_eq!(filled.birth.as_deref(), Some("1990-01-01"));
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Hong@Example.COM "), "hong@example.com");
    }

    #[test]
    fn test_email_shape() {
        assert!(is_valid_email("hong@example.com"));
        assert!(is_valid_email("a.b+c@sub.domain.kr"));
        assert!(!is_valid_email("hong@example"));
        assert!(!is_valid_email("hong example@x.com"));
        assert!(!is_valid_email("@x.com"));
        assert!(!is_valid_email("hong@@x.com"));
    }

    #[test]
    fn test_birth_shape_only() {
        assert!(is_valid_birth("1990-01-31"));
        // 달력 검증은 하지 않는다 (알려진 한계)
        assert!(is_valid_birth("2024-02-30"));
        assert!(!is_valid_birth("1990-1-31"));
        assert!(!is_valid_birth("19900131"));
        assert!(!is_valid_birth("1990-01-31 "));
    }

    #[test]
    fn test_char_len_counts_hangul_as_one() {
        assert_eq!(char_len("홍길동"), 3);
        assert_eq!(char_len("ab"), 2);
    }
}
