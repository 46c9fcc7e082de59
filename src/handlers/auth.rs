//! 인증 관련 HTTP 핸들러
//!
//! 로그인/회원가입/로그아웃, 소셜 로그인 시작, 계정 연결 확인과 취소,
//! 로그인된 사용자의 identity 해제와 비밀번호 변경을 처리합니다.

use actix_web::http::header;
use actix_web::{get, post, web, HttpRequest, HttpResponse};
use serde_json::json;

use crate::config::SocialProvider;
use crate::core::{AppContext, AppError};
use crate::domain::dto::{
    CurrentUserResponse, IdentityRequest, LoginRequest, PasswordUpdateRequest, RedirectResponse,
    SignUpRequest, SignUpResponse,
};
use crate::domain::models::{CurrentSession, Route};
use crate::middlewares::SessionGuard;
use crate::services::auth::{LinkState, LoginFailure};
use crate::utils::cookies::{pkce_cookie, read_session_id, session_cookie, session_removal_cookie};

/// 이메일 로그인
///
/// # Endpoint
/// `POST /api/auth/login`
///
/// # Request Body
/// ```json
/// { "email": "hong@example.com", "password": "password123" }
/// ```
///
/// # Response
/// 성공 시 세션 쿠키와 함께 `{"redirect":"/dashboard"}`.
/// 실패는 `{"error":"format|credential|unconfirmed|server|bad_response|network","message":"..."}`.
#[post("/login")]
pub async fn login(
    req: HttpRequest,
    context: web::Data<AppContext>,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, LoginFailure> {
    let resolved = context.credentials.login(&payload).await?;
    let previous = read_session_id(&req, &context.settings.session);
    context.sessions.supersede(previous.as_ref(), &resolved).await;

    Ok(HttpResponse::Ok()
        .cookie(session_cookie(&resolved.id, &context.settings.session))
        .json(RedirectResponse::from(&Route::Dashboard)))
}

/// 이메일 회원가입
///
/// # Endpoint
/// `POST /api/auth/signup`
///
/// 이메일 인증이 필요한 경우 `{"needsEmailConfirm":true}`만 돌려주고,
/// 게이트웨이가 바로 세션을 준 경우 세션 쿠키도 함께 내려보냅니다.
#[post("/signup")]
pub async fn signup(
    context: web::Data<AppContext>,
    payload: web::Json<SignUpRequest>,
) -> Result<HttpResponse, AppError> {
    let result = context.credentials.sign_up(&payload).await?;

    let mut response = HttpResponse::Ok();
    if let Some(resolved) = &result.session {
        response.cookie(session_cookie(&resolved.id, &context.settings.session));
    }
    Ok(response.json(SignUpResponse {
        needs_email_confirm: result.needs_email_confirm(),
    }))
}

/// 로그아웃. 세션이 없어도 성공합니다.
///
/// # Endpoint
/// `POST /api/auth/logout`
#[post("/logout")]
pub async fn logout(req: HttpRequest, context: web::Data<AppContext>) -> HttpResponse {
    let session_id = read_session_id(&req, &context.settings.session);
    context.sessions.sign_out(session_id.as_ref()).await;

    HttpResponse::Ok()
        .cookie(session_removal_cookie(&context.settings.session))
        .json(RedirectResponse::from(&Route::Login))
}

/// 소셜 로그인 시작
///
/// # Endpoint
/// `GET /api/auth/oauth/{provider}` (`kakao` | `google`)
///
/// PKCE verifier를 쿠키에 담고 게이트웨이 인가 페이지로 302 이동합니다.
#[get("/oauth/{provider}")]
pub async fn oauth_start(
    context: web::Data<AppContext>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let provider = SocialProvider::from_str(&path.into_inner()).map_err(AppError::BadRequest)?;
    let (url, challenge) = context.credentials.oauth_start(provider);

    Ok(HttpResponse::Found()
        .cookie(pkce_cookie(&challenge.verifier, &context.settings.session))
        .insert_header((header::LOCATION, url))
        .finish())
}

/// 계정 연결 유지
///
/// # Endpoint
/// `POST /api/auth/link-account/confirm`
#[post("/link-account/confirm")]
pub async fn link_confirm(context: web::Data<AppContext>) -> HttpResponse {
    link_response(context.linking.confirm())
}

/// 계정 연결 취소. 본문이 없거나 잘못돼도 로그아웃까지 진행합니다.
///
/// # Endpoint
/// `POST /api/auth/link-account/cancel`
///
/// # Request Body
/// ```json
/// { "identityId": "..." }
/// ```
#[post("/link-account/cancel")]
pub async fn link_cancel(
    req: HttpRequest,
    context: web::Data<AppContext>,
    body: web::Bytes,
) -> HttpResponse {
    let request: IdentityRequest = serde_json::from_slice(&body).unwrap_or_default();
    let session_id = read_session_id(&req, &context.settings.session);

    let state = context
        .linking
        .cancel(session_id.as_ref(), request.identity_id.as_deref())
        .await;

    HttpResponse::Ok()
        .cookie(session_removal_cookie(&context.settings.session))
        .json(link_redirect(state))
}

fn link_response(state: LinkState) -> HttpResponse {
    HttpResponse::Ok().json(link_redirect(state))
}

fn link_redirect(state: LinkState) -> RedirectResponse {
    RedirectResponse::from(&state.route().unwrap_or(Route::Login))
}

/// 로그인된 사용자의 identity 하나를 해제합니다.
///
/// # Endpoint
/// `POST /api/auth/unlink-identity`
///
/// `identityId`가 없으면 세션과 상관없이 400, 세션이 없으면 401입니다.
#[post("/unlink-identity")]
pub async fn unlink_identity(
    req: HttpRequest,
    context: web::Data<AppContext>,
    payload: web::Json<IdentityRequest>,
) -> Result<HttpResponse, AppError> {
    let identity_id = payload
        .identity_id
        .as_deref()
        .ok_or_else(|| AppError::BadRequest("identityId is required".to_string()))?;

    let session_id = read_session_id(&req, &context.settings.session);
    let current = context
        .sessions
        .current(session_id.as_ref())
        .await
        .ok_or_else(|| AppError::AuthenticationError("인증되지 않은 요청입니다".to_string()))?;

    context.linking.unlink(&current, Some(identity_id)).await?;

    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}

/// 재설정 폼의 새 비밀번호 저장
///
/// # Endpoint
/// `POST /api/auth/password`
#[post("/password", wrap = "SessionGuard::required()")]
pub async fn update_password(
    context: web::Data<AppContext>,
    current: CurrentSession,
    payload: web::Json<PasswordUpdateRequest>,
) -> Result<HttpResponse, AppError> {
    context.credentials.update_password(&current.0, &payload).await?;
    Ok(HttpResponse::Ok().json(json!({ "updated": true })))
}

/// 현재 사용자 정보
///
/// # Endpoint
/// `GET /api/auth/me`
#[get("/me", wrap = "SessionGuard::required()")]
pub async fn me(current: CurrentSession) -> HttpResponse {
    HttpResponse::Ok().json(CurrentUserResponse::from(current.0.user()))
}
