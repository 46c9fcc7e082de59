//! Profile Entity
//!
//! `profiles` 컬렉션 문서입니다. `_id`는 게이트웨이 사용자 id와 같습니다.
//! 계정 찾기는 이 문서의 `full_name` + `birth`로 사용자를 찾습니다.

use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub full_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime>,
}

impl Profile {
    pub fn new(id: String, full_name: String) -> Self {
        let now = DateTime::now();
        Self {
            id,
            email: None,
            full_name,
            birth: None,
            nickname: None,
            created_at: Some(now),
            updated_at: Some(now),
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_birth(mut self, birth: impl Into<String>) -> Self {
        self.birth = Some(birth.into());
        self
    }
}
