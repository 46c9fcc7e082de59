//! # Application Context
//!
//! 서비스 객체를 한 번 조립해 `web::Data<AppContext>`로 모든 핸들러에 공유합니다.
//! 각 서비스는 생성 시점에 게이트웨이, 세션 저장소, 프로필 디렉터리를 주입받으며
//! 전역 싱글톤은 사용하지 않습니다.
//!
//! ```rust,ignore
//! let context = AppContext::assemble(gateway, store, profiles, AppSettings::from_env());
//!
//! HttpServer::new(move || {
//!     App::new()
//!         .app_data(web::Data::new(context.clone()))
//!         .configure(configure_all_routes)
//! })
//! ```

use std::sync::Arc;
use std::time::Duration;

use crate::config::{join_url, LinkingConfig, SessionConfig, SiteConfig};
use crate::repositories::profiles::ProfileDirectory;
use crate::repositories::sessions::SessionStore;
use crate::services::auth::{
    CallbackInterpreter, CredentialService, LinkAccountFlow, LinkageEvaluator, SessionResolver,
};
use crate::services::gateway::IdentityGateway;
use crate::services::recovery::RecoveryService;

/// 실행 중 바뀌지 않는 설정 묶음
#[derive(Debug, Clone)]
pub struct AppSettings {
    /// 메일 링크와 OAuth 콜백에 쓰는 사이트 기준 URL
    pub site_url: String,
    /// 계정 연결 판단 시간 창
    pub link_window: Duration,
    pub session: SessionConfig,
}

impl AppSettings {
    pub fn from_env() -> Self {
        Self {
            site_url: SiteConfig::base_url(),
            link_window: LinkingConfig::freshness_window(),
            session: SessionConfig::from_env(),
        }
    }

    pub fn site_url_for(&self, path: &str) -> String {
        join_url(&self.site_url, path)
    }

    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self {
            site_url: "https://noti.test".to_string(),
            link_window: Duration::from_secs(10),
            session: SessionConfig::default(),
        }
    }
}

/// 핸들러가 사용하는 서비스 묶음
#[derive(Clone)]
pub struct AppContext {
    pub settings: Arc<AppSettings>,
    pub sessions: Arc<SessionResolver>,
    pub callbacks: Arc<CallbackInterpreter>,
    pub linking: Arc<LinkAccountFlow>,
    pub credentials: Arc<CredentialService>,
    pub recovery: Arc<RecoveryService>,
}

impl AppContext {
    pub fn assemble(
        gateway: Arc<dyn IdentityGateway>,
        store: Arc<dyn SessionStore>,
        profiles: Arc<dyn ProfileDirectory>,
        settings: AppSettings,
    ) -> Self {
        let settings = Arc::new(settings);
        let sessions = Arc::new(SessionResolver::new(gateway.clone(), store));

        let callbacks = Arc::new(CallbackInterpreter::new(
            sessions.clone(),
            LinkageEvaluator::new(settings.link_window),
        ));
        let linking = Arc::new(LinkAccountFlow::new(gateway.clone(), sessions.clone()));
        let credentials = Arc::new(CredentialService::new(
            gateway.clone(),
            sessions.clone(),
            profiles.clone(),
            settings.site_url.clone(),
        ));
        let recovery = Arc::new(RecoveryService::new(gateway, profiles, settings.site_url.clone()));

        log::info!("✅ 애플리케이션 컨텍스트 조립 완료 (site: {})", settings.site_url);

        Self {
            settings,
            sessions,
            callbacks,
            linking,
            credentials,
            recovery,
        }
    }
}
