//! # Callback Interpreter
//!
//! 인증 제공자가 되돌려 보낸 리다이렉트 하나를 분류해 목적지 하나를 고릅니다.
//!
//! | 조건 | 목적지 |
//! |------|--------|
//! | `error` / `error_code` 존재 | `/auth/verified?status=fail[&reason][&message]` |
//! | `type=recovery` + 세션 | `/account/reset-password` |
//! | `type=recovery` + 세션 없음 | `/account/find/pw?error=invalid_link` |
//! | 세션 + 방금 연결된 소셜 identity | `/auth/link-account?...` |
//! | 세션 | `/tasks` |
//! | 세션 없음 | `/auth/verified?status=ok&type=<type>` |
//!
//! 프래그먼트에 토큰이 있으면 그 토큰으로 세션을 새로 만들고, 없으면 쿠키의
//! 세션을 씁니다. 새 세션이 쿠키의 세션을 대체하면 이전 세션은 저장소에서 지웁니다.
//! 세션 확인 실패는 "세션 없음"으로 이어지며 재시도하지 않습니다.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::models::{CallbackEvent, ResolvedSession, Route, SessionId};
use crate::services::auth::linkage::{LinkDecision, LinkageEvaluator};
use crate::services::auth::session_resolver::SessionResolver;

/// 해석 결과
#[derive(Debug, Clone, PartialEq)]
pub struct CallbackOutcome {
    pub route: Route,
    /// 프래그먼트 토큰으로 새로 만든 세션 (쿠키로 내려보내야 함)
    pub established: Option<SessionId>,
}

pub struct CallbackInterpreter {
    sessions: Arc<SessionResolver>,
    linkage: LinkageEvaluator,
}

impl CallbackInterpreter {
    pub fn new(sessions: Arc<SessionResolver>, linkage: LinkageEvaluator) -> Self {
        Self { sessions, linkage }
    }

    pub async fn interpret(&self, event: &CallbackEvent, ambient: Option<&SessionId>) -> CallbackOutcome {
        if let Some(failure) = event.failure() {
            log::info!("인증 콜백 실패: reason={:?}", failure.reason);
            return CallbackOutcome {
                route: Route::VerificationFailed {
                    reason: failure.reason,
                    message: failure.message,
                },
                established: None,
            };
        }

        let session = match event.tokens() {
            Some((access_token, refresh_token)) => {
                match self.sessions.set_session(access_token, refresh_token).await {
                    Ok(resolved) => {
                        self.sessions.supersede(ambient, &resolved).await;
                        Some(resolved)
                    }
                    Err(e) => {
                        log::warn!("콜백 토큰으로 세션 설정 실패: {}", e);
                        None
                    }
                }
            }
            None => self.sessions.current(ambient).await,
        };

        let established = match (event.tokens(), &session) {
            (Some(_), Some(resolved)) => Some(resolved.id.clone()),
            _ => None,
        };

        CallbackOutcome {
            route: self.route_for(event, session.as_ref()),
            established,
        }
    }

    /// 실패 여부를 뺀 나머지 분기. 세션은 이미 확인된 상태로 받습니다.
    pub fn route_for(&self, event: &CallbackEvent, session: Option<&ResolvedSession>) -> Route {
        if let Some(failure) = event.failure() {
            return Route::VerificationFailed {
                reason: failure.reason,
                message: failure.message,
            };
        }

        if event.is_recovery() {
            return match session {
                Some(_) => Route::ResetPassword,
                None => Route::InvalidRecoveryLink,
            };
        }

        match session {
            Some(resolved) => match self.linkage.evaluate(resolved.user(), Utc::now()) {
                LinkDecision::Pending(link) => {
                    log::info!("계정 연결 확인 필요: provider={}", link.provider.as_str());
                    Route::LinkAccount {
                        provider: link.provider,
                        email: link.email,
                        identity_id: link.identity_id,
                    }
                }
                LinkDecision::NoPendingLink => Route::Landing,
            },
            None => Route::EmailVerified {
                kind: event.kind().to_string(),
            },
        }
    }
}
