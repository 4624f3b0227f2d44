//! Module wiring and lifecycle: CRM selection, router assembly, serving

use crate::config::{Config, CrmProviderKind};
use crate::contract::ContactsApi;
use crate::domain::{CrmProvider, Service};
use crate::infra::crm::{HttpCrmProvider, InMemoryCrm};
use anyhow::Result;
use axum::Router;
use parking_lot::RwLock;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;

/// Contacts service module
pub struct ContactsServiceModule {
    config: RwLock<Config>,
    service: RwLock<Option<Arc<Service>>>,
}

impl Default for ContactsServiceModule {
    fn default() -> Self {
        Self {
            config: RwLock::new(Config::default()),
            service: RwLock::new(None),
        }
    }
}

impl ContactsServiceModule {
    /// Build the CRM provider named by the configuration and the domain service
    pub fn init(&self, cfg: Config) -> Result<()> {
        let crm: Arc<dyn CrmProvider> = match cfg.crm.provider {
            CrmProviderKind::Http => {
                if cfg.crm.api_key.is_none() {
                    tracing::warn!("no CRM API key configured");
                }
                Arc::new(HttpCrmProvider::new(
                    &cfg.crm.base_url,
                    cfg.crm.api_key.clone(),
                )?)
            }
            CrmProviderKind::Memory => {
                tracing::warn!("using in-memory CRM, contacts are not persisted");
                Arc::new(InMemoryCrm::new())
            }
        };
        self.init_with_crm(cfg, crm)
    }

    /// Same as `init` with an explicit CRM provider
    pub fn init_with_crm(&self, cfg: Config, crm: Arc<dyn CrmProvider>) -> Result<()> {
        let service = Arc::new(Service::new(crm).with_missing_revision(cfg.missing_revision));
        *self.service.write() = Some(service);

        tracing::info!(
            provider = ?cfg.crm.provider,
            missing_revision = ?cfg.missing_revision,
            "Contacts service initialized"
        );
        *self.config.write() = cfg;
        Ok(())
    }

    /// In-process client over the domain service
    pub fn client(&self) -> Result<Arc<dyn ContactsApi>> {
        let service = self
            .service
            .read()
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("Service not initialized"))?
            .clone();
        Ok(Arc::new(crate::api::native::NativeClient::new(service)))
    }

    /// Add the contacts REST routes to an existing router
    pub fn register_rest(&self, router: Router) -> Result<Router> {
        tracing::info!("Registering contacts service REST routes");
        crate::api::rest::routes::register_routes(router, self.client()?)
    }

    /// Complete application router with request tracing
    pub fn router(&self) -> Result<Router> {
        Ok(self
            .register_rest(Router::new())?
            .layer(TraceLayer::new_for_http()))
    }

    /// Bind the configured address and serve until `cancel` fires
    pub async fn serve(self: Arc<Self>, cancel: CancellationToken) -> Result<()> {
        let bind_addr = self.config.read().bind_addr.clone();
        let listener = TcpListener::bind(&bind_addr).await?;
        self.serve_on(listener, cancel).await
    }

    /// Serve on an already bound listener until `cancel` fires
    pub async fn serve_on(
        self: Arc<Self>,
        listener: TcpListener,
        cancel: CancellationToken,
    ) -> Result<()> {
        let router = self.router()?;
        tracing::info!(addr = %listener.local_addr()?, "Contacts service listening");

        axum::serve(listener, router)
            .with_graceful_shutdown(async move { cancel.cancelled().await })
            .await?;

        tracing::info!("Contacts service stopped");
        Ok(())
    }
}
