//! # Application Error Handling
//!
//! 인증 백엔드 전역에서 사용하는 에러 타입입니다.
//! 모든 변형은 `actix_web::ResponseError`를 통해 `{"error": <tag>}` 형태의
//! JSON 응답으로 변환됩니다.
//!
//! ## 응답 원칙
//!
//! 에러 응답에는 기계가 읽을 수 있는 짧은 태그만 담습니다. 사용자가 입력한
//! 이메일, 이름 같은 개인정보는 절대 응답 본문에 다시 싣지 않으며, 내부 원인
//! 문자열은 서버 로그로만 남깁니다.
//!
//! ## HTTP 응답 매핑
//!
//! | AppError | HTTP Status | 응답 태그 |
//! |----------|-------------|-----------|
//! | `BadRequest` | 400 | `bad_request` |
//! | `ValidationError` | 400 | `validation_error` (+ message) |
//! | `AuthenticationError` | 401 | `unauthorized` |
//! | `AuthorizationError` | 403 | `forbidden` |
//! | `NotFound` | 404 | `not_found` |
//! | `ConflictError` | 409 | `conflict` (+ message) |
//! | `DatabaseError` | 500 | `db_error` |
//! | `RedisError` | 500 | `server_error` |
//! | `ExternalServiceError` | 502 | `upstream_error` |
//! | `InternalError` | 500 | `server_error` |
//!
//! ## 사용 패턴
//!
//! ```rust,ignore
//! use crate::core::errors::AppError;
//!
//! let profile = directory
//!     .find_by_name_and_birth(name, birth)
//!     .await
//!     .map_err(|e| AppError::DatabaseError(e.to_string()))?;
//! ```

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

/// 애플리케이션 전역 에러 타입
///
/// `ValidationError`와 `ConflictError`의 메시지는 사용자에게 보여줄 수 있는
/// 문구(예: "이미 가입된 이메일이에요.")만 담아야 합니다. 나머지 변형의 문자열은
/// 로그 전용입니다.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Redis error: {0}")]
    RedisError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict error: {0}")]
    ConflictError(String),

    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    #[error("Authorization error: {0}")]
    AuthorizationError(String),

    #[error("External service error: {0}")]
    ExternalServiceError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    /// 응답 본문에 실리는 에러 태그
    pub fn tag(&self) -> &'static str {
        match self {
            AppError::BadRequest(_) => "bad_request",
            AppError::ValidationError(_) => "validation_error",
            AppError::DatabaseError(_) => "db_error",
            AppError::NotFound(_) => "not_found",
            AppError::ConflictError(_) => "conflict",
            AppError::AuthenticationError(_) => "unauthorized",
            AppError::AuthorizationError(_) => "forbidden",
            AppError::ExternalServiceError(_) => "upstream_error",
            AppError::RedisError(_) | AppError::InternalError(_) => "server_error",
        }
    }

    /// 사용자에게 그대로 노출해도 되는 메시지 (없으면 `None`)
    fn public_message(&self) -> Option<&str> {
        match self {
            AppError::ValidationError(msg) | AppError::ConflictError(msg) => Some(msg),
            _ => None,
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) | AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ConflictError(_) => StatusCode::CONFLICT,
            AppError::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            AppError::AuthorizationError(_) => StatusCode::FORBIDDEN,
            AppError::ExternalServiceError(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("요청 처리 실패 ({}): {}", status.as_u16(), self);
        } else {
            log::debug!("요청 거부 ({}): {}", status.as_u16(), self);
        }

        let body = match self.public_message() {
            Some(message) => json!({ "error": self.tag(), "message": message }),
            None => json!({ "error": self.tag() }),
        };

        HttpResponse::build(status).json(body)
    }
}

pub type AppResult<T> = Result<T, AppError>;

/// 임의의 에러에 문맥을 덧붙여 `AppError::InternalError`로 변환합니다.
pub trait ErrorContext<T> {
    fn context(self, msg: &str) -> AppResult<T>;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    async fn body_of(error: AppError) -> serde_json::Value {
        let response = error.error_response();
        let bytes = to_bytes(response.into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_bad_request_status() {
        let error = AppError::BadRequest("birth format".to_string());
        assert_eq!(error.error_response().status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_bad_request_hides_detail() {
        let body = body_of(AppError::BadRequest("fullName=홍길동".to_string())).await;
        assert_eq!(body, json!({ "error": "bad_request" }));
    }

    #[actix_web::test]
    async fn test_database_error_hides_cause() {
        let body = body_of(AppError::DatabaseError("connection refused".to_string())).await;
        assert_eq!(body, json!({ "error": "db_error" }));
    }

    #[actix_web::test]
    async fn test_conflict_carries_public_message() {
        let body = body_of(AppError::ConflictError("이미 가입된 이메일이에요.".to_string())).await;
        assert_eq!(body["error"], "conflict");
        assert_eq!(body["message"], "이미 가입된 이메일이에요.");
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::AuthenticationError("x".into()).error_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::NotFound("x".into()).error_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::ExternalServiceError("x".into()).error_response().status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            AppError::RedisError("x".into()).error_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_context_trait() {
        let result: Result<(), &str> = Err("original error");
        let app_result = result.context("세션 직렬화");

        match app_result {
            Err(AppError::InternalError(msg)) => {
                assert!(msg.contains("세션 직렬화"));
                assert!(msg.contains("original error"));
            }
            other => panic!("Expected InternalError, got {:?}", other),
        }
    }
}
