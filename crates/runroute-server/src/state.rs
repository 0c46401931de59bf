//! Shared application state.

use runroute_client::{FetchError, RoutingClient};

use crate::cache::MemoryRouteCache;
use crate::config::Config;
use crate::service::RouteFetchService;

/// State handed to every API handler.
pub struct AppState {
    config: Config,
    service: RouteFetchService<RoutingClient, MemoryRouteCache>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, FetchError> {
        let service = RouteFetchService::from_config(&config)?;
        Ok(Self { config, service })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn service(&self) -> &RouteFetchService<RoutingClient, MemoryRouteCache> {
        &self.service
    }

    /// Service view whose upstream calls carry the given request id.
    pub fn service_for_request(
        &self,
        request_id: Option<String>,
    ) -> RouteFetchService<RoutingClient, MemoryRouteCache> {
        let client = self.service.source().with_request_id(request_id);
        self.service.with_source(client)
    }
}
