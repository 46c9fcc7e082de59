//! 캐싱 계층 모듈
//!
//! Redis 연결과 JSON 직렬화를 담당합니다. 세션 저장소
//! ([`crate::repositories::sessions`])가 이 위에 구현됩니다.
//!
//! # 환경 설정
//!
//! ```bash
//! REDIS_URL=redis://localhost:6379  # 기본값
//! ```

pub mod redis;
