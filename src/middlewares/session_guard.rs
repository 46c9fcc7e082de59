//! 세션 가드 미들웨어
//!
//! 세션 쿠키로 현재 세션을 확인하고, 없으면 핸들러를 호출하지 않고 401로 응답합니다.
//! 확인된 세션은 request extensions에 [`ResolvedSession`]으로 들어가며 핸들러는
//! [`CurrentSession`] 추출자로 꺼냅니다.
//!
//! [`ResolvedSession`]: crate::domain::models::ResolvedSession
//! [`CurrentSession`]: crate::domain::models::CurrentSession

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
};

use crate::middlewares::session_guard_inner::SessionGuardService;

/// 로그인이 필요한 스코프에 붙이는 미들웨어
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionGuard;

impl SessionGuard {
    pub fn required() -> Self {
        Self
    }
}

impl<S, B> Transform<S, ServiceRequest> for SessionGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = SessionGuardService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionGuardService {
            service: Rc::new(service),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::AppContext;
    use crate::domain::models::CurrentSession;
    use crate::testing::{email_user, session, FakeGateway, FakeProfiles, TestHarness};
    use crate::utils::cookies::session_cookie;
    use actix_web::{test, web, App, HttpResponse};

    async fn whoami(current: CurrentSession) -> HttpResponse {
        HttpResponse::Ok().body(current.0.user().id.clone())
    }

    fn harness() -> TestHarness {
        TestHarness::new(
            FakeGateway::new().with_user("at", email_user("u-1", "a@b.co")),
            FakeProfiles::new(),
        )
    }

    macro_rules! guarded_app {
        ($context:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new($context))
                    .service(
                        web::scope("/private")
                            .wrap(SessionGuard::required())
                            .route("/whoami", web::get().to(whoami)),
                    ),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_missing_cookie_is_rejected() {
        let h = harness();
        let app = guarded_app!(h.context.clone());

        let req = test::TestRequest::get().uri("/private/whoami").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 401);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "authentication_required");
    }

    #[actix_web::test]
    async fn test_valid_session_reaches_handler() {
        let h = harness();
        let id = h.login(session("at", email_user("u-1", "a@b.co"))).await;
        let context: AppContext = h.context.clone();
        let cookie = session_cookie(&id, &context.settings.session);
        let app = guarded_app!(context);

        let req = test::TestRequest::get().uri("/private/whoami").cookie(cookie).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);
        assert_eq!(test::read_body(resp).await, "u-1");
    }

    #[actix_web::test]
    async fn test_expired_session_is_rejected() {
        let h = harness();
        let id = h.login(session("revoked", email_user("u-1", "a@b.co"))).await;
        let cookie = session_cookie(&id, &h.context.settings.session);
        let app = guarded_app!(h.context.clone());

        let req = test::TestRequest::get().uri("/private/whoami").cookie(cookie).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 401);
    }
}
