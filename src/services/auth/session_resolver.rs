//! # Session Resolver
//!
//! 원시 토큰 또는 브라우저의 세션 쿠키로부터 인증된 세션을 만들어냅니다.
//!
//! - `set_session`: 콜백 프래그먼트의 access/refresh 토큰을 게이트웨이로 검증한 뒤
//!   새 세션 id로 저장합니다.
//! - `current`: 쿠키의 세션 id로 저장된 세션을 꺼내 게이트웨이에서 사용자를 다시
//!   확인합니다. 어떤 실패든 "세션 없음"으로 취급하며 재시도하지 않습니다.
//!
//! access token이 거부되면 refresh token으로 한 번 갱신을 시도합니다.

use std::sync::Arc;

use crate::core::AppResult;
use crate::domain::models::{ResolvedSession, Session, SessionId};
use crate::repositories::sessions::SessionStore;
use crate::services::gateway::{GatewayError, IdentityGateway};

pub struct SessionResolver {
    gateway: Arc<dyn IdentityGateway>,
    store: Arc<dyn SessionStore>,
}

impl SessionResolver {
    pub fn new(gateway: Arc<dyn IdentityGateway>, store: Arc<dyn SessionStore>) -> Self {
        Self { gateway, store }
    }

    /// 원시 토큰으로 세션을 설정합니다.
    pub async fn set_session(&self, access_token: &str, refresh_token: &str) -> AppResult<ResolvedSession> {
        let session = match self.gateway.get_user(access_token).await {
            Ok(user) => Session {
                access_token: access_token.to_string(),
                refresh_token: refresh_token.to_string(),
                expires_in: None,
                expires_at: None,
                user,
            },
            Err(e) if e.is_unauthorized() => self.gateway.refresh_session(refresh_token).await?,
            Err(e) => return Err(e.into()),
        };

        self.persist(session).await
    }

    /// 게이트웨이가 발급한 세션을 새 세션 id로 저장합니다.
    pub async fn persist(&self, session: Session) -> AppResult<ResolvedSession> {
        let id = SessionId::generate();
        self.store.set(&id, &session).await?;
        log::debug!("세션 저장: 사용자 ID {}", session.user.id);
        Ok(ResolvedSession { id, session })
    }

    /// 쿠키의 세션 id에 해당하는 현재 세션. 실패는 모두 `None`.
    pub async fn current(&self, id: Option<&SessionId>) -> Option<ResolvedSession> {
        let id = id?;

        let stored = match self.store.get(id).await {
            Ok(Some(session)) => session,
            Ok(None) => return None,
            Err(e) => {
                log::warn!("세션 저장소 조회 실패, 세션 없음으로 처리: {}", e);
                return None;
            }
        };

        match self.revalidate(&stored).await {
            Ok(fresh) => {
                if fresh != stored {
                    if let Err(e) = self.store.set(id, &fresh).await {
                        log::warn!("갱신된 세션 저장 실패: {}", e);
                    }
                }
                Some(ResolvedSession {
                    id: id.clone(),
                    session: fresh,
                })
            }
            Err(e) => {
                log::warn!("세션 확인 실패, 세션 없음으로 처리: {}", e);
                if e.is_unauthorized() || e.status() == Some(400) {
                    if let Err(e) = self.store.clear(id).await {
                        log::warn!("만료된 세션 삭제 실패: {}", e);
                    }
                }
                None
            }
        }
    }

    async fn revalidate(&self, stored: &Session) -> Result<Session, GatewayError> {
        match self.gateway.get_user(&stored.access_token).await {
            Ok(user) => Ok(Session {
                user,
                ..stored.clone()
            }),
            Err(e) if e.is_unauthorized() => self.gateway.refresh_session(&stored.refresh_token).await,
            Err(e) => Err(e),
        }
    }

    /// 새 세션이 쿠키의 이전 세션을 대체할 때 이전 세션을 정리합니다.
    ///
    /// 다른 사용자의 세션이면 게이트웨이 로그아웃도 시도합니다. 같은 사용자면 게이트웨이
    /// 로그아웃이 새 세션까지 끊으므로 저장소에서만 지웁니다.
    pub async fn supersede(&self, previous: Option<&SessionId>, current: &ResolvedSession) {
        let Some(previous) = previous.filter(|id| **id != current.id) else {
            return;
        };

        match self.store.get(previous).await {
            Ok(Some(old)) if old.user.id != current.user().id => {
                if let Err(e) = self.gateway.sign_out(&old.access_token).await {
                    log::warn!("이전 세션 게이트웨이 로그아웃 실패: {}", e);
                }
            }
            Ok(_) => {}
            Err(e) => log::warn!("이전 세션 조회 실패: {}", e),
        }

        if let Err(e) = self.store.clear(previous).await {
            log::warn!("이전 세션 삭제 실패: {}", e);
        }
    }

    /// 게이트웨이 로그아웃 후 저장소에서 세션을 지웁니다. 실패는 로그만 남깁니다.
    pub async fn sign_out(&self, id: Option<&SessionId>) {
        let Some(id) = id else {
            return;
        };

        match self.store.get(id).await {
            Ok(Some(session)) => {
                if let Err(e) = self.gateway.sign_out(&session.access_token).await {
                    log::warn!("게이트웨이 로그아웃 실패 (로컬 세션은 제거): {}", e);
                }
            }
            Ok(None) => {}
            Err(e) => log::warn!("로그아웃 중 세션 조회 실패: {}", e),
        }

        if let Err(e) = self.store.clear(id).await {
            log::error!("세션 삭제 실패: {}", e);
        }
    }
}
