//! # Authentication Configuration Module
//!
//! 외부 인증 게이트웨이(GoTrue 호환 REST 서버), 사이트 주소, 세션 쿠키,
//! 계정 연결 감지 등 인증 관련 설정을 관리하는 모듈입니다.
//!
//! ## 필수 환경 변수 설정
//!
//! ```bash
//! export AUTH_GATEWAY_URL="https://project.supabase.co/auth/v1"
//! export AUTH_GATEWAY_ANON_KEY="public-anon-key"
//! export AUTH_GATEWAY_SERVICE_ROLE_KEY="service-role-key"   # 관리자 API 용
//! export SITE_URL="https://noti.app"
//! ```
//!
//! ## 선택 환경 변수
//!
//! ```bash
//! export AUTH_GATEWAY_TIMEOUT_SECS="10"
//! export LINK_FRESHNESS_SECS="10"
//! export SESSION_COOKIE_NAME="noti_sid"
//! export SESSION_TTL_SECS="604800"
//! ```
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::config::{join_url, GatewayConfig, IdentityProvider, SiteConfig};
//!
//! let base = GatewayConfig::base_url();
//! let redirect = join_url(&SiteConfig::base_url(), "/auth/callback?type=recovery");
//! let provider = IdentityProvider::from_str("kakao");
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

use crate::config::Environment;

/// 인증 게이트웨이 접속 설정
pub struct GatewayConfig;

impl GatewayConfig {
    /// 게이트웨이 REST 엔드포인트 (끝의 `/` 제거)
    pub fn base_url() -> String {
        env::var("AUTH_GATEWAY_URL")
            .unwrap_or_else(|_| {
                log::warn!("AUTH_GATEWAY_URL not set, using local default");
                "http://localhost:9999".to_string()
            })
            .trim_end_matches('/')
            .to_string()
    }

    /// 공개(anon) API 키. 모든 요청의 `apikey` 헤더로 전송됩니다.
    pub fn anon_key() -> String {
        env::var("AUTH_GATEWAY_ANON_KEY").unwrap_or_else(|_| {
            log::warn!("AUTH_GATEWAY_ANON_KEY not set, gateway calls will be rejected");
            String::new()
        })
    }

    /// 관리자 API 키. 계정 찾기/이메일 확인에서만 사용합니다.
    pub fn service_role_key() -> String {
        env::var("AUTH_GATEWAY_SERVICE_ROLE_KEY").unwrap_or_else(|_| {
            log::warn!("AUTH_GATEWAY_SERVICE_ROLE_KEY not set, admin lookups will fail");
            String::new()
        })
    }

    pub fn timeout() -> Duration {
        let secs = env::var("AUTH_GATEWAY_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(10);
        Duration::from_secs(secs)
    }
}

/// 프론트엔드 사이트 주소 설정
pub struct SiteConfig;

impl SiteConfig {
    /// `SITE_URL` (끝의 `/` 제거, 기본값 `http://localhost:3000`)
    pub fn base_url() -> String {
        env::var("SITE_URL")
            .unwrap_or_else(|_| "http://localhost:3000".to_string())
            .trim_end_matches('/')
            .to_string()
    }
}

/// 기준 URL과 경로를 `/` 하나로 이어 붙입니다.
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// 계정 연결 감지 설정
pub struct LinkingConfig;

impl LinkingConfig {
    /// 새로 생성된 소셜 identity를 "방금 연결됨"으로 볼 시간 창 (기본 10초)
    pub fn freshness_window() -> Duration {
        let secs = env::var("LINK_FRESHNESS_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(10);
        Duration::from_secs(secs)
    }
}

/// 세션 쿠키 설정
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub cookie_name: String,
    pub ttl_secs: u64,
    pub secure: bool,
}

impl SessionConfig {
    pub const PKCE_COOKIE_NAME: &'static str = "noti_pkce";

    pub fn from_env() -> Self {
        Self {
            cookie_name: env::var("SESSION_COOKIE_NAME").unwrap_or_else(|_| "noti_sid".to_string()),
            ttl_secs: env::var("SESSION_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60 * 60 * 24 * 7),
            secure: Environment::current().requires_secure_cookies(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: "noti_sid".to_string(),
            ttl_secs: 60 * 60 * 24 * 7,
            secure: false,
        }
    }
}

/// 사용자에게 연결된 인증 수단의 종류
///
/// 게이트웨이가 알려준 새 프로바이더는 태그 그대로 `Other`에 담깁니다.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum IdentityProvider {
    Email,
    Kakao,
    Google,
    Other(String),
}

impl IdentityProvider {
    pub fn from_str(s: &str) -> Self {
        let tag = s.trim().to_lowercase();
        match tag.as_str() {
            "email" => IdentityProvider::Email,
            "kakao" => IdentityProvider::Kakao,
            "google" => IdentityProvider::Google,
            _ => IdentityProvider::Other(tag),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            IdentityProvider::Email => "email",
            IdentityProvider::Kakao => "kakao",
            IdentityProvider::Google => "google",
            IdentityProvider::Other(tag) => tag,
        }
    }

    pub fn is_email(&self) -> bool {
        matches!(self, IdentityProvider::Email)
    }
}

/// 로그인 시작이 가능한 소셜 프로바이더
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialProvider {
    Kakao,
    Google,
}

impl SocialProvider {
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.trim().to_lowercase().as_str() {
            "kakao" => Ok(SocialProvider::Kakao),
            "google" => Ok(SocialProvider::Google),
            _ => Err(format!("Unsupported social provider: {}", s)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SocialProvider::Kakao => "kakao",
            SocialProvider::Google => "google",
        }
    }
}

impl From<String> for IdentityProvider {
    fn from(tag: String) -> Self {
        Self::from_str(&tag)
    }
}

impl From<IdentityProvider> for String {
    fn from(provider: IdentityProvider) -> Self {
        provider.as_str().to_string()
    }
}

impl From<SocialProvider> for IdentityProvider {
    fn from(provider: SocialProvider) -> Self {
        match provider {
            SocialProvider::Kakao => IdentityProvider::Kakao,
            SocialProvider::Google => IdentityProvider::Google,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_provider_from_string() {
        assert_eq!(IdentityProvider::from_str("email"), IdentityProvider::Email);
        assert_eq!(IdentityProvider::from_str("KAKAO"), IdentityProvider::Kakao);
        assert_eq!(IdentityProvider::from_str("Google"), IdentityProvider::Google);
        assert_eq!(
            IdentityProvider::from_str("GitHub"),
            IdentityProvider::Other("github".to_string())
        );
    }

    #[test]
    fn test_identity_provider_keeps_unknown_tag() {
        let parsed: Vec<IdentityProvider> =
            serde_json::from_str(r#"["email","google","apple"]"#).unwrap();
        assert_eq!(
            parsed,
            vec![
                IdentityProvider::Email,
                IdentityProvider::Google,
                IdentityProvider::Other("apple".to_string())
            ]
        );
        assert_eq!(parsed[2].as_str(), "apple");
        assert_eq!(serde_json::to_string(&parsed).unwrap(), r#"["email","google","apple"]"#);
    }

    #[test]
    fn test_social_provider_from_string() {
        assert_eq!(SocialProvider::from_str("kakao").unwrap(), SocialProvider::Kakao);
        assert_eq!(SocialProvider::from_str("GOOGLE").unwrap(), SocialProvider::Google);
        assert!(SocialProvider::from_str("email").is_err());
        assert!(SocialProvider::from_str("twitter").is_err());
    }

    #[test]
    fn test_social_provider_maps_to_identity_provider() {
        assert_eq!(
            IdentityProvider::from(SocialProvider::Kakao),
            IdentityProvider::Kakao
        );
        assert_eq!(
            IdentityProvider::from(SocialProvider::Google).as_str(),
            "google"
        );
    }

    #[test]
    fn test_join_url() {
        assert_eq!(
            join_url("https://noti.app/", "/auth/callback?type=recovery"),
            "https://noti.app/auth/callback?type=recovery"
        );
        assert_eq!(join_url("http://localhost:3000", "tasks"), "http://localhost:3000/tasks");
    }
}
