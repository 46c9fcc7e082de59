//! # Redis 클라이언트
//!
//! 세션 저장소가 사용하는 Redis 래퍼입니다. 값은 JSON 문자열로 저장하고
//! 모든 키에 TTL을 붙입니다.
//!
//! ## 연결 관리
//!
//! `ConnectionManager`를 사용해 하나의 멀티플렉싱 연결을 공유하며, 연결이
//! 끊어지면 다음 명령에서 자동으로 재연결합니다.

use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};
use serde::{Serialize, de::DeserializeOwned};
use std::env;

/// Redis 클라이언트 래퍼
///
/// ```rust,ignore
/// let redis = RedisClient::new().await?;
/// redis.set_with_expiry("session:abc", &session, 3600).await?;
/// let cached: Option<Session> = redis.get("session:abc").await?;
/// redis.del("session:abc").await?;
/// ```
#[derive(Clone)]
pub struct RedisClient {
    manager: ConnectionManager,
}

impl RedisClient {
    /// `REDIS_URL`(기본값 `redis://localhost:6379`)로 연결합니다.
    ///
    /// 생성 시 `PING`으로 서버 가용성을 확인합니다.
    pub async fn new() -> Result<Self, redis::RedisError> {
        let redis_url = env::var("REDIS_URL")
            .unwrap_or_else(|_| "redis://localhost:6379".to_string());
        Self::connect(&redis_url).await
    }

    pub async fn connect(redis_url: &str) -> Result<Self, redis::RedisError> {
        let client = Client::open(redis_url)?;
        let mut manager = ConnectionManager::new(client).await?;

        redis::cmd("PING").query_async::<()>(&mut manager).await?;
        log::info!("✅ Redis 연결 성공");

        Ok(Self { manager })
    }

    /// JSON으로 저장된 값을 읽습니다. 키가 없으면 `Ok(None)`.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, redis::RedisError> {
        let mut conn = self.manager.clone();
        let raw: Option<String> = conn.get(key).await?;

        raw.map(|json| serde_json::from_str(&json).map_err(|e| json_error("역직렬화 실패", e)))
            .transpose()
    }

    /// 값을 JSON으로 저장하고 `seconds` 후 만료시킵니다 (`SET key value EX seconds`).
    pub async fn set_with_expiry<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        seconds: u64,
    ) -> Result<(), redis::RedisError> {
        let json = serde_json::to_string(value).map_err(|e| json_error("직렬화 실패", e))?;
        let mut conn = self.manager.clone();
        conn.set_ex(key, json, seconds).await
    }

    pub async fn del(&self, key: &str) -> Result<(), redis::RedisError> {
        let mut conn = self.manager.clone();
        conn.del(key).await
    }
}

fn json_error(what: &'static str, err: serde_json::Error) -> redis::RedisError {
    redis::RedisError::from((redis::ErrorKind::TypeError, what, err.to_string()))
}
