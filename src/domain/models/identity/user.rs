//! 인증 게이트웨이가 돌려주는 사용자와 연결된 identity 모델

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::IdentityProvider;

/// 게이트웨이 사용자
///
/// `identities`는 연결된 인증 수단 목록입니다. 정상 상태에서는 프로바이더당
/// 하나씩만 존재하지만, 계정 연결 직후에는 잠시 겹칠 수 있습니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: UserMetadata,
    #[serde(default)]
    pub identities: Vec<Identity>,
}

impl AuthUser {
    pub fn email_or_empty(&self) -> &str {
        self.email.as_deref().unwrap_or("")
    }

    /// identity 고유 id(`id`) 또는 게이트웨이 identity id로 찾습니다.
    pub fn find_identity(&self, identity_id: &str) -> Option<&Identity> {
        self.identities
            .iter()
            .find(|identity| identity.id == identity_id || identity.identity_id.as_deref() == Some(identity_id))
    }

    pub fn providers(&self) -> Vec<IdentityProvider> {
        self.identities.iter().map(|identity| identity.provider.clone()).collect()
    }
}

/// 가입 시 함께 저장하는 사용자 메타데이터
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth: Option<String>,
}

/// 사용자에게 연결된 인증 수단 하나
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    /// 프로바이더가 부여한 식별자
    pub id: String,
    /// 게이트웨이 내부 identity id (연결 해제 API에 사용)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity_id: Option<String>,
    pub provider: IdentityProvider,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Identity {
    /// 생성 시각. 없거나 해석할 수 없으면 `None`.
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        self.created_at
            .as_deref()
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
            .map(|ts| ts.with_timezone(&Utc))
    }

    /// 연결 해제 요청에 쓸 id
    pub fn unlink_id(&self) -> &str {
        self.identity_id.as_deref().unwrap_or(&self.id)
    }
}
