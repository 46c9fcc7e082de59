//! # 프로필 리포지토리
//!
//! `profiles` 컬렉션 접근 계층입니다. 계정 찾기는 (이름, 생년월일)로 프로필을
//! 찾고, 회원가입은 메타데이터를 프로필에 반영합니다.

use std::sync::Arc;

use async_trait::async_trait;
use mongodb::bson::{doc, DateTime, Document};
use mongodb::options::IndexOptions;
use mongodb::{Collection, IndexModel};

use crate::core::{AppError, AppResult};
use crate::db::Database;
use crate::domain::entities::Profile;

/// 프로필 조회/갱신 연산
#[async_trait]
pub trait ProfileDirectory: Send + Sync {
    /// 이름(정확히 일치)과 선택적 생년월일로 첫 번째 프로필을 찾습니다.
    async fn find_by_name(&self, full_name: &str, birth: Option<&str>) -> AppResult<Option<Profile>>;

    /// 가입 정보로 프로필을 만들거나 갱신합니다.
    async fn save_signup_profile(&self, profile: &Profile) -> AppResult<()>;
}

pub struct ProfileRepository {
    db: Arc<Database>,
}

impl ProfileRepository {
    pub const COLLECTION: &'static str = "profiles";

    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn collection(&self) -> Collection<Profile> {
        self.db.collection::<Profile>(Self::COLLECTION)
    }

    /// 계정 찾기 조회용 인덱스
    pub async fn create_indexes(&self) -> AppResult<()> {
        let lookup_index = IndexModel::builder()
            .keys(doc! { "full_name": 1, "birth": 1 })
            .options(IndexOptions::builder()
                .name("full_name_birth".to_string())
                .build())
            .build();

        self.collection()
            .create_indexes([lookup_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        log::info!("✅ profiles 인덱스 생성 완료");
        Ok(())
    }
}

fn lookup_filter(full_name: &str, birth: Option<&str>) -> Document {
    let mut filter = doc! { "full_name": full_name };
    if let Some(birth) = birth {
        filter.insert("birth", birth);
    }
    filter
}

fn signup_update(profile: &Profile) -> Document {
    let mut set = doc! {
        "full_name": profile.full_name.as_str(),
        "updated_at": DateTime::now(),
    };
    if let Some(email) = &profile.email {
        set.insert("email", email.as_str());
    }
    if let Some(birth) = &profile.birth {
        set.insert("birth", birth.as_str());
    }
    if let Some(nickname) = &profile.nickname {
        set.insert("nickname", nickname.as_str());
    }

    doc! {
        "$set": set,
        "$setOnInsert": { "created_at": DateTime::now() },
    }
}

#[async_trait]
impl ProfileDirectory for ProfileRepository {
    async fn find_by_name(&self, full_name: &str, birth: Option<&str>) -> AppResult<Option<Profile>> {
        self.collection()
            .find_one(lookup_filter(full_name, birth))
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn save_signup_profile(&self, profile: &Profile) -> AppResult<()> {
        self.collection()
            .update_one(doc! { "_id": profile.id.as_str() }, signup_update(profile))
            .upsert(true)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;
        Ok(())
    }
}
