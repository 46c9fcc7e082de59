//! GoTrue 호환 REST 게이트웨이 클라이언트
//!
//! 모든 요청에 `apikey` 헤더를 붙이고, 사용자 권한 호출은 access token을,
//! 관리자 호출은 service role key를 Bearer 토큰으로 사용합니다.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::config::{GatewayConfig, SocialProvider};
use crate::core::{AppResult, ErrorContext};
use crate::domain::models::{AuthUser, Identity, Session};
use crate::services::gateway::{
    GatewayError, IdentityGateway, PkceChallenge, SignUpOutcome, SignUpParams,
};

pub struct GoTrueGateway {
    http: Client,
    base_url: String,
    anon_key: String,
    service_role_key: String,
}

impl GoTrueGateway {
    pub fn new(base_url: String, anon_key: String, service_role_key: String) -> AppResult<Self> {
        let http = Client::builder()
            .timeout(GatewayConfig::timeout())
            .build()
            .context("HTTP 클라이언트 생성 실패")?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key,
            service_role_key,
        })
    }

    pub fn from_env() -> AppResult<Self> {
        Self::new(
            GatewayConfig::base_url(),
            GatewayConfig::anon_key(),
            GatewayConfig::service_role_key(),
        )
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn public(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.header("apikey", &self.anon_key)
    }

    fn as_user(&self, builder: RequestBuilder, access_token: &str) -> RequestBuilder {
        self.public(builder).bearer_auth(access_token)
    }

    fn as_admin(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &self.service_role_key)
            .bearer_auth(&self.service_role_key)
    }

    async fn send(builder: RequestBuilder, context: &str) -> Result<Response, GatewayError> {
        let response = builder.send().await.map_err(|e| {
            GatewayError::Transport(format!("{} 요청 실패: {}", context, e))
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(parse_error_body(status.as_u16(), &body))
    }

    async fn send_json<T: DeserializeOwned>(builder: RequestBuilder, context: &str) -> Result<T, GatewayError> {
        Self::send(builder, context)
            .await?
            .json::<T>()
            .await
            .map_err(|e| GatewayError::Decode(format!("{} 응답 파싱 실패: {}", context, e)))
    }

    async fn token_grant(&self, grant_type: &str, body: Value, context: &str) -> Result<Session, GatewayError> {
        let request = self
            .public(self.http.post(self.endpoint("token")))
            .query(&[("grant_type", grant_type)])
            .json(&body);
        Self::send_json::<Session>(request, context).await
    }
}

#[async_trait]
impl IdentityGateway for GoTrueGateway {
    async fn get_user(&self, access_token: &str) -> Result<AuthUser, GatewayError> {
        let request = self.as_user(self.http.get(self.endpoint("user")), access_token);
        Self::send_json(request, "사용자 조회").await
    }

    async fn refresh_session(&self, refresh_token: &str) -> Result<Session, GatewayError> {
        self.token_grant(
            "refresh_token",
            json!({ "refresh_token": refresh_token }),
            "세션 갱신",
        )
        .await
    }

    async fn exchange_code(&self, code: &str, code_verifier: &str) -> Result<Session, GatewayError> {
        self.token_grant(
            "pkce",
            json!({ "auth_code": code, "code_verifier": code_verifier }),
            "인가 코드 교환",
        )
        .await
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session, GatewayError> {
        self.token_grant(
            "password",
            json!({ "email": email, "password": password }),
            "이메일 로그인",
        )
        .await
    }

    async fn sign_up(&self, params: &SignUpParams) -> Result<SignUpOutcome, GatewayError> {
        let request = self
            .public(self.http.post(self.endpoint("signup")))
            .query(&[("redirect_to", params.email_redirect_to.as_str())])
            .json(&json!({
                "email": params.email,
                "password": params.password,
                "data": params.metadata,
            }));

        let body: Value = Self::send_json(request, "회원가입").await?;
        parse_sign_up(body)
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), GatewayError> {
        let request = self.as_user(self.http.post(self.endpoint("logout")), access_token);
        Self::send(request, "로그아웃").await.map(|_| ())
    }

    async fn unlink_identity(&self, access_token: &str, identity: &Identity) -> Result<(), GatewayError> {
        let path = format!("user/identities/{}", urlencoding::encode(identity.unlink_id()));
        let request = self.as_user(self.http.delete(self.endpoint(&path)), access_token);
        Self::send(request, "identity 연결 해제").await.map(|_| ())
    }

    async fn send_password_reset(&self, email: &str, redirect_to: &str) -> Result<(), GatewayError> {
        let request = self
            .public(self.http.post(self.endpoint("recover")))
            .query(&[("redirect_to", redirect_to)])
            .json(&json!({ "email": email }));
        Self::send(request, "비밀번호 재설정 메일").await.map(|_| ())
    }

    async fn update_password(&self, access_token: &str, password: &str) -> Result<AuthUser, GatewayError> {
        let request = self
            .as_user(self.http.put(self.endpoint("user")), access_token)
            .json(&json!({ "password": password }));
        Self::send_json(request, "비밀번호 변경").await
    }

    async fn admin_get_user(&self, user_id: &str) -> Result<AuthUser, GatewayError> {
        let path = format!("admin/users/{}", urlencoding::encode(user_id));
        let request = self.as_admin(self.http.get(self.endpoint(&path)));
        Self::send_json(request, "관리자 사용자 조회").await
    }

    async fn admin_list_users(&self, page: u32, per_page: u32) -> Result<Vec<AuthUser>, GatewayError> {
        #[derive(Deserialize)]
        struct UserPage {
            #[serde(default)]
            users: Vec<AuthUser>,
        }

        let request = self
            .as_admin(self.http.get(self.endpoint("admin/users")))
            .query(&[("page", page), ("per_page", per_page)]);
        let page: UserPage = Self::send_json(request, "관리자 사용자 목록").await?;
        Ok(page.users)
    }

    fn authorize_url(&self, provider: SocialProvider, redirect_to: &str, challenge: &PkceChallenge) -> String {
        build_authorize_url(&self.base_url, provider, redirect_to, challenge)
    }
}

fn build_authorize_url(
    base_url: &str,
    provider: SocialProvider,
    redirect_to: &str,
    challenge: &PkceChallenge,
) -> String {
    let params = [
        ("provider", provider.as_str()),
        ("redirect_to", redirect_to),
        ("code_challenge", challenge.challenge.as_str()),
        ("code_challenge_method", PkceChallenge::METHOD),
    ];

    let query_string = params
        .iter()
        .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");

    format!("{}/authorize?{}", base_url, query_string)
}

/// 게이트웨이 에러 본문을 해석합니다.
///
/// 신형 `{code, error_code, msg}`와 구형 `{error, error_description}` 형식을 모두 받습니다.
fn parse_error_body(status: u16, body: &str) -> GatewayError {
    #[derive(Deserialize, Default)]
    struct ErrorBody {
        error_code: Option<String>,
        code: Option<Value>,
        msg: Option<String>,
        message: Option<String>,
        error_description: Option<String>,
        error: Option<String>,
    }

    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    let code = parsed
        .error_code
        .or_else(|| parsed.code.and_then(|c| c.as_str().map(str::to_string)));
    let message = parsed
        .msg
        .or(parsed.message)
        .or(parsed.error_description)
        .or(parsed.error)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| {
            if body.trim().is_empty() {
                format!("status {}", status)
            } else {
                body.trim().to_string()
            }
        });

    GatewayError::Api {
        status,
        code,
        message,
    }
}

/// 회원가입 응답: 자동 인증이면 세션, 아니면 사용자만 옵니다.
fn parse_sign_up(body: Value) -> Result<SignUpOutcome, GatewayError> {
    if body.get("access_token").is_some() {
        let session: Session = serde_json::from_value(body)
            .map_err(|e| GatewayError::Decode(format!("회원가입 세션 파싱 실패: {}", e)))?;
        return Ok(SignUpOutcome {
            user: session.user.clone(),
            session: Some(session),
        });
    }

    let user_value = match body.get("user") {
        Some(user) => user.clone(),
        None => body,
    };
    let user: AuthUser = serde_json::from_value(user_value)
        .map_err(|e| GatewayError::Decode(format!("회원가입 사용자 파싱 실패: {}", e)))?;

    Ok(SignUpOutcome {
        user,
        session: None,
    })
}
