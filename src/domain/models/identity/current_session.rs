//! 핸들러에서 세션 가드가 확인한 세션을 꺼내는 추출자

use std::future::{ready, Ready};

use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};

use super::session::ResolvedSession;
use crate::core::AppError;

/// 세션 가드를 통과한 요청의 세션
///
/// 가드가 없는 라우트에서 쓰면 401로 응답합니다.
#[derive(Debug, Clone)]
pub struct CurrentSession(pub ResolvedSession);

impl FromRequest for CurrentSession {
    type Error = Error;
    type Future = Ready<actix_web::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<ResolvedSession>() {
            Some(resolved) => ready(Ok(CurrentSession(resolved.clone()))),
            None => ready(Err(AppError::AuthenticationError(
                "인증되지 않은 요청입니다".to_string(),
            )
            .into())),
        }
    }
}
