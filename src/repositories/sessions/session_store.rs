//! # 세션 저장소
//!
//! 게이트웨이가 발급한 세션을 세션 id 기준으로 보관합니다.
//! 서비스 계층은 [`SessionStore`] 트레이트(`get` / `set` / `clear`)에만 의존하며,
//! 운영 환경은 Redis, 테스트는 메모리 구현을 주입합니다.
//!
//! 저장소에 쓰는 값은 항상 게이트웨이 응답에서 온 세션입니다.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::caching::redis::RedisClient;
use crate::core::{AppError, AppResult};
use crate::domain::models::{Session, SessionId};

#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, id: &SessionId) -> AppResult<Option<Session>>;

    async fn set(&self, id: &SessionId, session: &Session) -> AppResult<()>;

    async fn clear(&self, id: &SessionId) -> AppResult<()>;
}

/// Redis 기반 세션 저장소 (`session:<id>` 키, TTL 적용)
pub struct RedisSessionStore {
    redis: Arc<RedisClient>,
    ttl_secs: u64,
}

impl RedisSessionStore {
    pub fn new(redis: Arc<RedisClient>, ttl_secs: u64) -> Self {
        Self { redis, ttl_secs }
    }

    fn key(id: &SessionId) -> String {
        format!("session:{}", id)
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn get(&self, id: &SessionId) -> AppResult<Option<Session>> {
        self.redis
            .get::<Session>(&Self::key(id))
            .await
            .map_err(|e| AppError::RedisError(e.to_string()))
    }

    async fn set(&self, id: &SessionId, session: &Session) -> AppResult<()> {
        self.redis
            .set_with_expiry(&Self::key(id), session, self.ttl_secs)
            .await
            .map_err(|e| AppError::RedisError(e.to_string()))
    }

    async fn clear(&self, id: &SessionId) -> AppResult<()> {
        self.redis
            .del(&Self::key(id))
            .await
            .map_err(|e| AppError::RedisError(e.to_string()))
    }
}

/// 프로세스 메모리 세션 저장소
///
/// 단일 인스턴스 개발 서버와 테스트에서 사용합니다. 만료 처리는 하지 않습니다.
#[derive(Default)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<String, Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.sessions.read().map(|map| map.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned<T>(_: T) -> AppError {
    AppError::InternalError("세션 저장소 잠금 오류".to_string())
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(&self, id: &SessionId) -> AppResult<Option<Session>> {
        let map = self.sessions.read().map_err(poisoned)?;
        Ok(map.get(id.as_str()).cloned())
    }

    async fn set(&self, id: &SessionId, session: &Session) -> AppResult<()> {
        let mut map = self.sessions.write().map_err(poisoned)?;
        map.insert(id.as_str().to_string(), session.clone());
        Ok(())
    }

    async fn clear(&self, id: &SessionId) -> AppResult<()> {
        let mut map = self.sessions.write().map_err(poisoned)?;
        map.remove(id.as_str());
        Ok(())
    }
}
