//! # 세션/PKCE 쿠키
//!
//! 브라우저에는 세션 id와 PKCE verifier만 HttpOnly 쿠키로 내려갑니다.
//! 토큰 자체는 서버의 세션 저장소에만 있습니다.

use actix_web::cookie::time::Duration;
use actix_web::cookie::{Cookie, SameSite};
use actix_web::HttpRequest;

use crate::config::SessionConfig;
use crate::domain::models::SessionId;

/// PKCE verifier 쿠키 수명 (소셜 로그인 왕복 한 번)
const PKCE_COOKIE_TTL_SECS: i64 = 10 * 60;

/// 요청 쿠키에서 세션 id를 읽습니다. 형식이 맞지 않으면 `None`.
pub fn read_session_id(req: &HttpRequest, config: &SessionConfig) -> Option<SessionId> {
    req
        .cookie(&config.cookie_name)
        .and_then(|cookie| SessionId::parse(cookie.value()))
}

pub fn session_cookie(id: &SessionId, config: &SessionConfig) -> Cookie<'static> {
    Cookie::build(config.cookie_name.clone(), id.as_str().to_string())
        .path("/")
        .http_only(true)
        .secure(config.secure)
        .same_site(SameSite::Lax)
        .max_age(Duration::seconds(i64::try_from(config.ttl_secs).unwrap_or(i64::MAX)))
        .finish()
}

pub fn session_removal_cookie(config: &SessionConfig) -> Cookie<'static> {
    let mut cookie = Cookie::build(config.cookie_name.clone(), "").path("/").finish();
    cookie.make_removal();
    cookie
}

pub fn read_pkce_verifier(req: &HttpRequest) -> Option<String> {
    req
        .cookie(SessionConfig::PKCE_COOKIE_NAME)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
}

pub fn pkce_cookie(verifier: &str, config: &SessionConfig) -> Cookie<'static> {
    Cookie::build(SessionConfig::PKCE_COOKIE_NAME, verifier.to_string())
        .path("/")
        .http_only(true)
        .secure(config.secure)
        .same_site(SameSite::Lax)
        .max_age(Duration::seconds(PKCE_COOKIE_TTL_SECS))
        .finish()
}

pub fn pkce_removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build(SessionConfig::PKCE_COOKIE_NAME, "").path("/").finish();
    cookie.make_removal();
    cookie
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_session_cookie_attributes() {
        let config = SessionConfig {
            cookie_name: "sid".to_string(),
            ttl_secs: 3600,
            secure: true,
        };
        let id = SessionId::generate();
        let cookie = session_cookie(&id, &config);

        assert_eq!(cookie.name(), "sid");
        assert_eq!(cookie.value(), id.as_str());
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.max_age(), Some(Duration::seconds(3600)));
    }

    #[test]
    fn test_read_session_id_ignores_garbage() {
        let config = SessionConfig::default();
        let id = SessionId::generate();

        let valid = TestRequest::default()
            .cookie(Cookie::new(config.cookie_name.clone(), id.as_str().to_string()))
            .to_http_request();
        assert_eq!(read_session_id(&valid, &config), Some(id));

        let garbage = TestRequest::default()
            .cookie(Cookie::new(config.cookie_name.clone(), "../../etc"))
            .to_http_request();
        assert_eq!(read_session_id(&garbage, &config), None);

        assert_eq!(read_session_id(&TestRequest::default().to_http_request(), &config), None);
    }

    #[test]
    fn test_read_pkce_verifier() {
        let with_verifier = TestRequest::default()
            .cookie(Cookie::new(SessionConfig::PKCE_COOKIE_NAME, "verifier-1"))
            .to_http_request();
        assert_eq!(read_pkce_verifier(&with_verifier).as_deref(), Some("verifier-1"));

        let empty = TestRequest::default()
            .cookie(Cookie::new(SessionConfig::PKCE_COOKIE_NAME, ""))
            .to_http_request();
        assert_eq!(read_pkce_verifier(&empty), None);
    }

    #[test]
    fn test_removal_cookies_expire() {
        let removal = session_removal_cookie(&SessionConfig::default());
        assert_eq!(removal.value(), "");
        assert_eq!(removal.max_age(), Some(Duration::ZERO));
        assert_eq!(pkce_removal_cookie().max_age(), Some(Duration::ZERO));
    }
}
