//! 계정 찾기 HTTP 핸들러
//!
//! 로그인하지 않은 사용자가 쓰는 엔드포인트입니다.
//!
//! | Method | Path | 설명 |
//! |--------|------|------|
//! | POST | `/api/user/find-id` | 이름 + 생년월일로 마스킹된 이메일 조회 |
//! | POST | `/api/user/find-pw` | 비밀번호 재설정 메일 요청 |
//! | POST | `/api/user/reset-password` | `find-pw`와 같은 동작 |
//! | GET | `/api/user/check-id?email=` | 이메일 가입 여부 |

use actix_web::{get, post, web, HttpResponse};

use crate::core::{AppContext, AppError};
use crate::domain::dto::{EmailCheckQuery, FindIdRequest, FindPasswordRequest};

/// 아이디(이메일) 찾기
///
/// # Request Body
/// ```json
/// { "fullName": "홍길동", "birth": "1990-01-01" }
/// ```
///
/// # Response
/// ```json
/// { "found": true, "maskedEmail": "hon*@example.com" }
/// ```
#[post("/find-id")]
pub async fn find_id(
    context: web::Data<AppContext>,
    payload: web::Json<FindIdRequest>,
) -> Result<HttpResponse, AppError> {
    let response = context.recovery.find_id(&payload).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// 비밀번호 찾기
///
/// 일치 여부와 관계없이 `{"sent":true}`로 응답합니다.
#[post("/find-pw")]
pub async fn find_password(
    context: web::Data<AppContext>,
    payload: web::Json<FindPasswordRequest>,
) -> Result<HttpResponse, AppError> {
    send_reset(context, payload).await
}

/// `find-pw`의 다른 경로
#[post("/reset-password")]
pub async fn reset_password(
    context: web::Data<AppContext>,
    payload: web::Json<FindPasswordRequest>,
) -> Result<HttpResponse, AppError> {
    send_reset(context, payload).await
}

async fn send_reset(
    context: web::Data<AppContext>,
    payload: web::Json<FindPasswordRequest>,
) -> Result<HttpResponse, AppError> {
    let response = context.recovery.find_password(&payload).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// 이메일 가입 여부 확인
#[get("/check-id")]
pub async fn check_email(
    context: web::Data<AppContext>,
    query: web::Query<EmailCheckQuery>,
) -> Result<HttpResponse, AppError> {
    let response = context.recovery.email_exists(query.email.as_deref()).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Profile;
    use crate::routes::configure_all_routes;
    use crate::testing::{email_user, FakeGateway, FakeProfiles, TestHarness};
    use actix_web::http::header;
    use actix_web::{test, App};
    use serde_json::json;

    macro_rules! app {
        ($harness:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new($harness.context.clone()))
                    .configure(configure_all_routes),
            )
            .await
        };
    }

    fn hong() -> Profile {
        Profile::new("u-1".to_string(), "홍길동".to_string())
            .with_email("hong@example.com")
            .with_birth("1990-01-01")
    }

    #[actix_web::test]
    async fn test_find_id() {
        let h = TestHarness::new(FakeGateway::new(), FakeProfiles::new().with(hong()));
        let app = app!(h);

        let req = test::TestRequest::post()
            .uri("/api/user/find-id")
            .set_json(json!({ "fullName": "홍길동", "birth": "1990-01-01" }))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["found"], true);
        assert_eq!(body["maskedEmail"], "hon*@example.com");

        let req = test::TestRequest::post()
            .uri("/api/user/find-id")
            .set_json(json!({ "fullName": "김철수", "birth": "1990-01-01" }))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["found"], false);
    }

    #[actix_web::test]
    async fn test_find_id_rejects_bad_input() {
        let h = TestHarness::new(FakeGateway::new(), FakeProfiles::new());
        let app = app!(h);

        let req = test::TestRequest::post()
            .uri("/api/user/find-id")
            .set_json(json!({ "fullName": "홍길동", "birth": "1990.01.01" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);

        let req = test::TestRequest::post()
            .uri("/api/user/find-id")
            .insert_header((header::CONTENT_TYPE, "application/json"))
            .set_payload("{\"fullName\":")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "error": "bad_request" }));
    }

    #[actix_web::test]
    async fn test_find_password_bodies_are_identical() {
        let h = TestHarness::new(
            FakeGateway::new().with_admin_user(email_user("u-1", "hong@example.com")),
            FakeProfiles::new().with(hong()),
        );
        let app = app!(h);

        let matching = test::TestRequest::post()
            .uri("/api/user/find-pw")
            .set_json(json!({ "email": "hong@example.com", "fullName": "홍길동", "birth": "1990-01-01" }))
            .to_request();
        let matching = test::call_and_read_body(&app, matching).await;

        let other = test::TestRequest::post()
            .uri("/api/user/reset-password")
            .set_json(json!({ "email": "nobody@example.com", "fullName": "홍길동" }))
            .to_request();
        let other = test::call_and_read_body(&app, other).await;

        assert_eq!(matching, other);
        assert_eq!(matching, web::Bytes::from_static(br#"{"sent":true}"#));
        assert_eq!(h.gateway.count("reset:"), 1);
    }

    #[actix_web::test]
    async fn test_check_email() {
        let h = TestHarness::new(
            FakeGateway::new().with_admin_user(email_user("u-1", "hong@example.com")),
            FakeProfiles::new(),
        );
        let app = app!(h);

        let req = test::TestRequest::get().uri("/api/user/check-id?email=HONG%40example.com").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, json!({ "exists": true }));

        let req = test::TestRequest::get().uri("/api/user/check-id").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);
    }
}
