//! # Identity Linkage Evaluator
//!
//! 세션 사용자의 identity 목록을 보고, 방금 소셜 계정 연결이 일어났는지
//! (이메일 계정에 소셜 identity가 몇 초 전에 추가되었는지) 판단합니다.
//!
//! 판단 조건:
//!
//! 1. identity가 2개 이상
//! 2. `email` identity와 `email`이 아닌 identity가 모두 존재
//! 3. 가장 최근에 생성된 비이메일 identity의 생성 시각이 현재와 시간 창 이내
//!
//! 생성 시각이 없거나 해석되지 않으면 epoch 0으로 봅니다. 부수 효과 없는 순수 함수입니다.

use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::config::IdentityProvider;
use crate::domain::models::{AuthUser, Identity};

/// 연결 확인이 필요한 identity
#[derive(Debug, Clone, PartialEq)]
pub struct PendingLink {
    pub provider: IdentityProvider,
    pub email: String,
    pub identity_id: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LinkDecision {
    Pending(PendingLink),
    NoPendingLink,
}

#[derive(Debug, Clone)]
pub struct LinkageEvaluator {
    window: Duration,
}

impl LinkageEvaluator {
    pub fn new(window: Duration) -> Self {
        Self { window }
    }

    pub fn evaluate(&self, user: &AuthUser, now: DateTime<Utc>) -> LinkDecision {
        let identities = &user.identities;
        if identities.len() < 2 {
            return LinkDecision::NoPendingLink;
        }

        let has_email = identities.iter().any(|i| i.provider.is_email());
        if !has_email {
            return LinkDecision::NoPendingLink;
        }

        // max_by_key는 동률일 때 뒤쪽 원소를 돌려준다
        let Some(newest) = identities
            .iter()
            .filter(|i| !i.provider.is_email())
            .max_by_key(|i| created_or_epoch(i))
        else {
            return LinkDecision::NoPendingLink;
        };

        let age_ms = (now - created_or_epoch(newest)).num_milliseconds().unsigned_abs();
        if u128::from(age_ms) >= self.window.as_millis() {
            return LinkDecision::NoPendingLink;
        }

        LinkDecision::Pending(PendingLink {
            provider: newest.provider.clone(),
            email: user.email_or_empty().to_string(),
            identity_id: newest.id.clone(),
        })
    }
}

fn created_or_epoch(identity: &Identity) -> DateTime<Utc> {
    identity.created_at_utc().unwrap_or(DateTime::UNIX_EPOCH)
}
