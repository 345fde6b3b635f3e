use std::sync::Arc;

use folio_api_rest::RestServerConfig;
use folio_config::Config;
use folio_core_contact_impl::{ContactServiceConfig, ContactServiceImpl};
use folio_core_health_impl::{HealthServiceConfig, HealthServiceImpl};
use types::{ContactFeature, Email, HealthFeature, RestServer};

pub mod types;

/// Builds the services from the SMTP transport and the configuration.
pub struct Provider {
    email: Email,
    config: ConfigProvider,
}

impl Provider {
    pub fn new(config: ConfigProvider, email: Email) -> Self {
        Self { email, config }
    }

    pub fn rest_server(&self) -> RestServer {
        RestServer::new(
            self.health_feature(),
            self.contact_feature(),
            self.config.rest_server_config.clone(),
        )
    }

    fn contact_feature(&self) -> ContactFeature {
        ContactServiceImpl::new(
            self.email.clone(),
            self.config.contact_service_config.clone(),
        )
    }

    fn health_feature(&self) -> HealthFeature {
        HealthServiceImpl::new(
            self.email.clone(),
            self.config.health_service_config.clone(),
        )
    }
}

/// Service configurations derived from the loaded config.
#[derive(Debug, Clone)]
pub struct ConfigProvider {
    rest_server_config: RestServerConfig,
    contact_service_config: ContactServiceConfig,
    health_service_config: HealthServiceConfig,
}

impl ConfigProvider {
    pub fn new(config: &Config) -> Self {
        // API
        let rest_server_config = RestServerConfig {
            static_dir: config.http.static_dir.clone().into(),
        };

        // Core
        let contact_service_config = ContactServiceConfig {
            email: Arc::new(config.contact.email.clone().into()),
        };

        let health_service_config = HealthServiceConfig {
            cache_ttl: config.health.cache_ttl.into(),
        };

        Self {
            rest_server_config,
            contact_service_config,
            health_service_config,
        }
    }
}
