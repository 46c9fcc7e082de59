//! # Account-Linking Confirmation
//!
//! 방금 연결된 소셜 identity를 사용자가 확인하거나 취소합니다.
//!
//! ```text
//! Prompt ──confirm──▶ Confirmed  (/tasks, 게이트웨이 호출 없음)
//!    │
//!    └────cancel────▶ Cancelled  (identity 해제 → 강제 로그아웃 → /login)
//! ```
//!
//! 취소는 어떤 실패가 있어도 로그아웃과 `/login` 이동으로 끝납니다. 실패는
//! 로그에만 남습니다.
//!
//! 계정 설정 화면의 연결 해제(`unlink`)는 같은 게이트웨이 연산을 쓰지만
//! 로그아웃하지 않고 실패를 상태 코드로 돌려줍니다.

use std::sync::Arc;

use crate::core::{AppError, AppResult};
use crate::domain::models::{ResolvedSession, Route, SessionId};
use crate::services::auth::session_resolver::SessionResolver;
use crate::services::gateway::IdentityGateway;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    Prompt,
    Confirmed,
    Cancelled,
}

impl LinkState {
    /// 종료 상태에서 이동할 목적지. `Prompt`는 아직 이동하지 않습니다.
    pub fn route(&self) -> Option<Route> {
        match self {
            LinkState::Prompt => None,
            LinkState::Confirmed => Some(Route::Landing),
            LinkState::Cancelled => Some(Route::Login),
        }
    }
}

pub struct LinkAccountFlow {
    gateway: Arc<dyn IdentityGateway>,
    sessions: Arc<SessionResolver>,
}

impl LinkAccountFlow {
    pub fn new(gateway: Arc<dyn IdentityGateway>, sessions: Arc<SessionResolver>) -> Self {
        Self { gateway, sessions }
    }

    /// 연결 유지. 게이트웨이에서는 이미 연결된 상태입니다.
    pub fn confirm(&self) -> LinkState {
        LinkState::Confirmed
    }

    /// 연결 취소: 가능하면 identity를 해제하고, 항상 로그아웃합니다.
    pub async fn cancel(&self, session_id: Option<&SessionId>, identity_id: Option<&str>) -> LinkState {
        match self.sessions.current(session_id).await {
            None => log::warn!("연결 취소: 현재 사용자 없음"),
            Some(resolved) => self.try_unlink(&resolved, identity_id).await,
        }

        self.sessions.sign_out(session_id).await;
        LinkState::Cancelled
    }

    async fn try_unlink(&self, resolved: &ResolvedSession, identity_id: Option<&str>) {
        let Some(identity) = identity_id.and_then(|id| resolved.user().find_identity(id)) else {
            log::warn!("연결 취소: identity를 찾을 수 없음 ({:?})", identity_id);
            return;
        };

        match self
            .gateway
            .unlink_identity(&resolved.session.access_token, identity)
            .await
        {
            Ok(()) => log::info!("연결 취소: {} identity 해제 완료", identity.provider.as_str()),
            Err(e) => log::error!("연결 취소: identity 해제 실패: {}", e),
        }
    }

    /// 로그인된 사용자의 identity 하나를 해제합니다.
    ///
    /// - identity id 없음 → `BadRequest`
    /// - 사용자에게 없는 identity → `NotFound`
    /// - 게이트웨이 실패 → `InternalError`
    pub async fn unlink(&self, resolved: &ResolvedSession, identity_id: Option<&str>) -> AppResult<()> {
        let identity_id = identity_id.ok_or_else(|| AppError::BadRequest("identityId is required".to_string()))?;

        let identity = resolved
            .user()
            .find_identity(identity_id)
            .ok_or_else(|| AppError::NotFound("identity not found".to_string()))?;

        self.gateway
            .unlink_identity(&resolved.session.access_token, identity)
            .await
            .map_err(|e| AppError::InternalError(format!("failed to unlink identity: {}", e)))?;

        log::info!("identity 해제: 사용자 ID {}, provider {}", resolved.user().id, identity.provider.as_str());
        Ok(())
    }
}
