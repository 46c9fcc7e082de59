//! 세션 모델
//!
//! 세션 본문(토큰 쌍 + 사용자)은 서버의 세션 저장소에만 두고, 브라우저에는
//! 무작위 세션 id만 쿠키로 내려갑니다.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::AuthUser;

/// 게이트웨이가 발급한 세션
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,
    pub user: AuthUser,
}

/// 세션 저장소 키로 쓰이는 불투명 식별자
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// 쿠키 값에서 세션 id를 복원합니다. uuid 형식이 아니면 `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        Uuid::parse_str(raw.trim())
            .ok()
            .map(|uuid| Self(uuid.simple().to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// 저장소에서 확인된 세션과 그 id
#[derive(Debug, Clone)]
pub struct ResolvedSession {
    pub id: SessionId,
    pub session: Session,
}

impl ResolvedSession {
    pub fn user(&self) -> &AuthUser {
        &self.session.user
    }
}
