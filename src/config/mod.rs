//! # Configuration Module
//!
//! 인증 백엔드의 설정 관리를 담당하는 모듈입니다.
//! 모든 설정값은 환경 변수에서 읽으며, `main`에서 `PROFILE`에 맞는 `.env`
//! 파일을 먼저 로드합니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 실행 환경, 서버, 요청 제한, CORS 설정
//! - [`auth_config`] - 인증 게이트웨이, 사이트 주소, 세션 쿠키, 계정 연결 감지 설정
//!
//! ## 환경 변수 설정 가이드
//!
//! ```bash
//! # 서버
//! export HOST="0.0.0.0"
//! export PORT="8080"
//! export ENVIRONMENT="production"  # development, test, staging, production
//!
//! # 저장소
//! export MONGODB_URI="mongodb://localhost:27017"
//! export DATABASE_NAME="noti"
//! export REDIS_URL="redis://localhost:6379"
//!
//! # 인증 게이트웨이
//! export AUTH_GATEWAY_URL="https://project.supabase.co/auth/v1"
//! export AUTH_GATEWAY_ANON_KEY="..."
//! export AUTH_GATEWAY_SERVICE_ROLE_KEY="..."
//! export SITE_URL="https://noti.app"
//! ```

pub mod data_config;
pub mod auth_config;

pub use data_config::*;
pub use auth_config::*;
