//! PKCE (RFC 7636) verifier / S256 challenge

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// 소셜 로그인 한 번에 쓰이는 verifier와 challenge 쌍
///
/// verifier는 쿠키로 브라우저에 보관했다가 코드 교환 시 돌려받습니다.
#[derive(Debug, Clone, PartialEq)]
pub struct PkceChallenge {
    pub verifier: String,
    pub challenge: String,
}

impl PkceChallenge {
    pub const METHOD: &'static str = "s256";

    pub fn generate() -> Self {
        // 64자 hex: RFC 7636의 43-128자 unreserved 문자 조건을 만족
        let verifier = format!(
            "{}{}",
            Uuid::new_v4().simple(),
            Uuid::new_v4().simple()
        );
        Self::from_verifier(verifier)
    }

    pub fn from_verifier(verifier: String) -> Self {
        let challenge = URL_SAFE_NO_PAD.encode(Sha256::digest(verifier.as_bytes()));
        Self {
            verifier,
            challenge,
        }
    }
}
