use std::sync::Arc;

use anyhow::Context;
use otd_caption::CaptionClient;
use otd_catalog::CatalogClient;
use otd_config::OtdConfig;
use otd_core::session::QuerySession;

/// Query session over the live catalog and caption service.
pub type Session = QuerySession<CatalogClient, CaptionClient>;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub config: OtdConfig,
    pub session: Arc<Session>,
}

impl AppContext {
    /// Build the HTTP clients and an empty session. No network traffic.
    pub fn init(config: OtdConfig) -> anyhow::Result<Self> {
        let catalog =
            CatalogClient::new(&config.catalog).context("failed to build photo catalog client")?;
        let captioner =
            CaptionClient::new(&config.caption).context("failed to build caption client")?;

        Ok(Self {
            config,
            session: Arc::new(QuerySession::new(catalog, captioner)),
        })
    }
}
