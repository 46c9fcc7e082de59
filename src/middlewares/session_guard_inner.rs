//! SessionGuard 세션 확인 로직
use std::rc::Rc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::{web, Error, HttpMessage, HttpResponse};
use futures_util::future::LocalBoxFuture;

use crate::core::AppContext;
use crate::domain::models::ResolvedSession;
use crate::utils::cookies::read_session_id;

/// 실제 세션 확인을 수행하는 서비스
pub struct SessionGuardService<S> {
    pub service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for SessionGuardService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();

        Box::pin(async move {
            match resolve_session(&req).await {
                Some(resolved) => {
                    log::debug!("세션 확인: 사용자 ID {}", resolved.user().id);
                    req.extensions_mut().insert(resolved);
                }
                None => {
                    log::debug!("세션 없음: {}", req.path());
                    let response = HttpResponse::Unauthorized().json(serde_json::json!({
                        "error": "authentication_required",
                        "message": "로그인이 필요합니다"
                    }));
                    let (req, _) = req.into_parts();
                    let res = ServiceResponse::new(req, response).map_into_right_body();
                    return Ok(res);
                }
            }

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

/// 쿠키의 세션 id로 현재 세션을 확인
async fn resolve_session(req: &ServiceRequest) -> Option<ResolvedSession> {
    let Some(context) = req.app_data::<web::Data<AppContext>>().cloned() else {
        log::error!("AppContext가 등록되지 않아 세션을 확인할 수 없습니다");
        return None;
    };

    let session_id = read_session_id(req.request(), &context.settings.session);
    context.sessions.current(session_id.as_ref()).await
}
