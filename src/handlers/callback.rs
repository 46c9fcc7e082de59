//! 인증 콜백 핸들러
//!
//! URL 프래그먼트(`#access_token=...`)는 서버로 전송되지 않으므로, 게이트웨이가
//! 돌려보내는 `/auth/callback`은 작은 브릿지 페이지를 내려보내고 그 페이지가
//! `location.search`와 `location.hash`를 해석 엔드포인트로 한 번 전달합니다.
//!
//! PKCE 코드 흐름(`?code=`)은 서버가 직접 받아 세션으로 교환한 뒤 303으로 이동합니다.

use actix_web::http::header;
use actix_web::{get, post, web, HttpRequest, HttpResponse};

use crate::core::{AppContext, AppError};
use crate::domain::dto::{CallbackResolveRequest, RedirectResponse};
use crate::domain::models::{CallbackEvent, CallbackParams, Route};
use crate::utils::cookies::{pkce_removal_cookie, read_pkce_verifier, read_session_id, session_cookie};

/// 코드 교환 실패 사유
const EXCHANGE_FAILED: &str = "exchange_failed";

const BRIDGE_PAGE: &str = r#"<!doctype html>
<html lang="ko">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>NOTI</title>
</head>
<body>
<p>인증 정보를 확인하고 있어요...</p>
<script>
(function () {
  fetch("/api/auth/callback/resolve", {
    method: "POST",
    credentials: "same-origin",
    headers: { "Content-Type": "application/json" },
    body: JSON.stringify({ search: window.location.search, hash: window.location.hash })
  })
    .then(function (res) { return res.json(); })
    .then(function (data) { window.location.replace(data.redirect || "/login"); })
    .catch(function () { window.location.replace("/auth/verified?status=fail"); });
})();
</script>
</body>
</html>
"#;

/// 콜백 브릿지 페이지
///
/// # Endpoint
/// `GET /auth/callback`
#[get("/auth/callback")]
pub async fn callback_bridge() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .body(BRIDGE_PAGE)
}

/// 브릿지 페이지가 보낸 콜백 원문을 해석합니다.
///
/// 프래그먼트 토큰으로 세션이 새로 만들어지면 세션 쿠키를 함께 내려보냅니다.
///
/// # Endpoint
/// `POST /api/auth/callback/resolve`
#[post("/callback/resolve")]
pub async fn resolve_callback(
    req: HttpRequest,
    context: web::Data<AppContext>,
    payload: web::Json<CallbackResolveRequest>,
) -> Result<HttpResponse, AppError> {
    let event = CallbackEvent::from_raw(&payload.search, &payload.hash);
    let ambient = read_session_id(&req, &context.settings.session);

    let outcome = context.callbacks.interpret(&event, ambient.as_ref()).await;

    let mut response = HttpResponse::Ok();
    if let Some(id) = &outcome.established {
        response.cookie(session_cookie(id, &context.settings.session));
    }
    Ok(response.json(RedirectResponse::from(&outcome.route)))
}

/// 소셜 로그인 PKCE 코드 교환
///
/// # Endpoint
/// `GET /api/auth/callback?code=...`
#[get("/callback")]
pub async fn code_callback(req: HttpRequest, context: web::Data<AppContext>) -> HttpResponse {
    let event = CallbackEvent::new(CallbackParams::parse(req.query_string()), CallbackParams::default());
    let ambient = read_session_id(&req, &context.settings.session);
    let mut response = HttpResponse::SeeOther();
    response.cookie(pkce_removal_cookie());

    let route = match (event.failure(), event.query.code.as_deref()) {
        (None, Some(code)) => match read_pkce_verifier(&req) {
            Some(verifier) => match context.credentials.exchange_code(code, &verifier).await {
                Ok(resolved) => {
                    context.sessions.supersede(ambient.as_ref(), &resolved).await;
                    response.cookie(session_cookie(&resolved.id, &context.settings.session));
                    context.callbacks.route_for(&event, Some(&resolved))
                }
                Err(e) => {
                    log::warn!("인가 코드 교환 실패: {}", e);
                    exchange_failed()
                }
            },
            None => {
                log::warn!("인가 코드 교환 실패: PKCE verifier 쿠키 없음");
                exchange_failed()
            }
        },
        _ => context.callbacks.interpret(&event, ambient.as_ref()).await.route,
    };

    response
        .insert_header((header::LOCATION, route.to_path()))
        .finish()
}

fn exchange_failed() -> Route {
    Route::VerificationFailed {
        reason: Some(EXCHANGE_FAILED.to_string()),
        message: None,
    }
}
