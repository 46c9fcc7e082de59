//! 테스트용 가짜 게이트웨이/프로필 디렉터리와 픽스처

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use crate::config::{IdentityProvider, SocialProvider};
use crate::core::{AppContext, AppError, AppResult, AppSettings};
use crate::domain::entities::Profile;
use crate::domain::models::{AuthUser, Identity, Session, SessionId, UserMetadata};
use crate::repositories::profiles::ProfileDirectory;
use crate::repositories::sessions::{MemorySessionStore, SessionStore};
use crate::services::gateway::{
    GatewayError, IdentityGateway, PkceChallenge, SignUpOutcome, SignUpParams,
};

pub fn identity(provider: IdentityProvider, id: &str, created_at: Option<DateTime<Utc>>) -> Identity {
    Identity {
        id: id.to_string(),
        identity_id: Some(format!("gid-{}", id)),
        provider,
        created_at: created_at.map(|ts| ts.to_rfc3339()),
    }
}

pub fn user(id: &str, email: &str, identities: Vec<Identity>) -> AuthUser {
    AuthUser {
        id: id.to_string(),
        email: Some(email.to_string()),
        user_metadata: UserMetadata::default(),
        identities,
    }
}

pub fn email_user(id: &str, email: &str) -> AuthUser {
    user(
        id,
        email,
        vec![identity(IdentityProvider::Email, id, Some(Utc::now() - Duration::days(30)))],
    )
}

/// email + google, google identity가 `age`만큼 전에 생성된 사용자
pub fn linked_user(id: &str, email: &str, age: Duration) -> AuthUser {
    user(
        id,
        email,
        vec![
            identity(IdentityProvider::Email, id, Some(Utc::now() - Duration::days(30))),
            identity(IdentityProvider::Google, "g-1", Some(Utc::now() - age)),
        ],
    )
}

pub fn session(access_token: &str, user: AuthUser) -> Session {
    Session {
        access_token: access_token.to_string(),
        refresh_token: format!("{}-refresh", access_token),
        expires_in: Some(3600),
        expires_at: None,
        user,
    }
}

/// 호출을 기록하는 메모리 게이트웨이
#[derive(Default)]
pub struct FakeGateway {
    users_by_token: Mutex<HashMap<String, AuthUser>>,
    refreshes: Mutex<HashMap<String, Session>>,
    codes: Mutex<HashMap<String, Session>>,
    logins: Mutex<HashMap<String, Result<Session, GatewayError>>>,
    sign_up_result: Mutex<Option<Result<SignUpOutcome, GatewayError>>>,
    admin_users: Mutex<Vec<AuthUser>>,
    failures: Mutex<Vec<&'static str>>,
    calls: Mutex<Vec<String>>,
}

impl FakeGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(self, access_token: &str, user: AuthUser) -> Self {
        self.users_by_token.lock().unwrap().insert(access_token.to_string(), user);
        self
    }

    pub fn with_refresh(self, refresh_token: &str, session: Session) -> Self {
        self.refreshes.lock().unwrap().insert(refresh_token.to_string(), session);
        self
    }

    pub fn with_code(self, code: &str, session: Session) -> Self {
        self.codes.lock().unwrap().insert(code.to_string(), session);
        self
    }

    pub fn with_login(self, email: &str, result: Result<Session, GatewayError>) -> Self {
        self.logins.lock().unwrap().insert(email.to_string(), result);
        self
    }

    pub fn with_sign_up(self, result: Result<SignUpOutcome, GatewayError>) -> Self {
        *self.sign_up_result.lock().unwrap() = Some(result);
        self
    }

    pub fn with_admin_user(self, user: AuthUser) -> Self {
        self.admin_users.lock().unwrap().push(user);
        self
    }

    /// 지정한 연산(`unlink`, `reset`, `admin`, `sign_out`, `update_password`)을 실패시킵니다.
    pub fn failing(self, operation: &'static str) -> Self {
        self.failures.lock().unwrap().push(operation);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.calls().iter().filter(|call| call.starts_with(prefix)).count()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn check(&self, operation: &'static str) -> Result<(), GatewayError> {
        if self.failures.lock().unwrap().contains(&operation) {
            Err(GatewayError::api(500, None, &format!("{} failed", operation)))
        } else {
            Ok(())
        }
    }
}

fn unauthorized() -> GatewayError {
    GatewayError::api(401, Some("bad_jwt"), "invalid JWT")
}

#[async_trait]
impl IdentityGateway for FakeGateway {
    async fn get_user(&self, access_token: &str) -> Result<AuthUser, GatewayError> {
        self.record(format!("get_user:{}", access_token));
        self.users_by_token
            .lock()
            .unwrap()
            .get(access_token)
            .cloned()
            .ok_or_else(unauthorized)
    }

    async fn refresh_session(&self, refresh_token: &str) -> Result<Session, GatewayError> {
        self.record(format!("refresh:{}", refresh_token));
        self.refreshes
            .lock()
            .unwrap()
            .get(refresh_token)
            .cloned()
            .ok_or_else(|| GatewayError::api(400, Some("refresh_token_not_found"), "Invalid Refresh Token"))
    }

    async fn exchange_code(&self, code: &str, code_verifier: &str) -> Result<Session, GatewayError> {
        self.record(format!("exchange:{}:{}", code, code_verifier));
        self.codes
            .lock()
            .unwrap()
            .get(code)
            .cloned()
            .ok_or_else(|| GatewayError::api(400, Some("flow_state_not_found"), "invalid flow state"))
    }

    async fn sign_in_with_password(&self, email: &str, _password: &str) -> Result<Session, GatewayError> {
        self.record(format!("sign_in:{}", email));
        self.logins
            .lock()
            .unwrap()
            .get(email)
            .cloned()
            .unwrap_or_else(|| Err(GatewayError::api(400, Some("invalid_credentials"), "Invalid login credentials")))
    }

    async fn sign_up(&self, params: &SignUpParams) -> Result<SignUpOutcome, GatewayError> {
        self.record(format!("sign_up:{}:{}", params.email, params.email_redirect_to));
        self.sign_up_result
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| {
                Ok(SignUpOutcome {
                    user: user("new-user", &params.email, vec![]),
                    session: None,
                })
            })
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), GatewayError> {
        self.record(format!("sign_out:{}", access_token));
        self.check("sign_out")
    }

    async fn unlink_identity(&self, access_token: &str, identity: &Identity) -> Result<(), GatewayError> {
        self.record(format!("unlink:{}:{}", access_token, identity.unlink_id()));
        self.check("unlink")
    }

    async fn send_password_reset(&self, email: &str, redirect_to: &str) -> Result<(), GatewayError> {
        self.record(format!("reset:{}:{}", email, redirect_to));
        self.check("reset")
    }

    async fn update_password(&self, access_token: &str, _password: &str) -> Result<AuthUser, GatewayError> {
        self.record(format!("update_password:{}", access_token));
        self.check("update_password")?;
        self.get_user(access_token).await
    }

    async fn admin_get_user(&self, user_id: &str) -> Result<AuthUser, GatewayError> {
        self.record(format!("admin_get:{}", user_id));
        self.check("admin")?;
        self.admin_users
            .lock()
            .unwrap()
            .iter()
            .find(|user| user.id == user_id)
            .cloned()
            .ok_or_else(|| GatewayError::api(404, Some("user_not_found"), "User not found"))
    }

    async fn admin_list_users(&self, page: u32, per_page: u32) -> Result<Vec<AuthUser>, GatewayError> {
        self.record(format!("admin_list:{}:{}", page, per_page));
        self.check("admin")?;
        Ok(self.admin_users.lock().unwrap().clone())
    }

    fn authorize_url(&self, provider: SocialProvider, redirect_to: &str, challenge: &PkceChallenge) -> String {
        format!(
            "https://gateway.test/authorize?provider={}&redirect_to={}&code_challenge={}",
            provider.as_str(),
            urlencoding::encode(redirect_to),
            challenge.challenge
        )
    }
}

/// 메모리 프로필 디렉터리
#[derive(Default)]
pub struct FakeProfiles {
    profiles: Mutex<Vec<Profile>>,
    failing: Mutex<bool>,
}

impl FakeProfiles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, profile: Profile) -> Self {
        self.profiles.lock().unwrap().push(profile);
        self
    }

    pub fn failing(self) -> Self {
        *self.failing.lock().unwrap() = true;
        self
    }

    pub fn all(&self) -> Vec<Profile> {
        self.profiles.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProfileDirectory for FakeProfiles {
    async fn find_by_name(&self, full_name: &str, birth: Option<&str>) -> AppResult<Option<Profile>> {
        if *self.failing.lock().unwrap() {
            return Err(AppError::DatabaseError("profiles unavailable".to_string()));
        }
        Ok(self
            .profiles
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.full_name == full_name && birth.is_none_or(|b| p.birth.as_deref() == Some(b)))
            .cloned())
    }

    async fn save_signup_profile(&self, profile: &Profile) -> AppResult<()> {
        if *self.failing.lock().unwrap() {
            return Err(AppError::DatabaseError("profiles unavailable".to_string()));
        }
        let mut profiles = self.profiles.lock().unwrap();
        profiles.retain(|p| p.id != profile.id);
        profiles.push(profile.clone());
        Ok(())
    }
}

/// 가짜 협력 객체로 조립한 애플리케이션 컨텍스트
pub struct TestHarness {
    pub gateway: Arc<FakeGateway>,
    pub profiles: Arc<FakeProfiles>,
    pub store: Arc<MemorySessionStore>,
    pub context: AppContext,
}

impl TestHarness {
    pub fn new(gateway: FakeGateway, profiles: FakeProfiles) -> Self {
        let gateway = Arc::new(gateway);
        let profiles = Arc::new(profiles);
        let store = Arc::new(MemorySessionStore::new());
        let context = AppContext::assemble(
            gateway.clone(),
            store.clone(),
            profiles.clone(),
            AppSettings::for_tests(),
        );
        Self {
            gateway,
            profiles,
            store,
            context,
        }
    }

    /// 저장소에 세션을 넣고 그 id를 돌려줍니다.
    pub async fn login(&self, session: Session) -> SessionId {
        let id = SessionId::generate();
        self.store.set(&id, &session).await.unwrap();
        id
    }
}
