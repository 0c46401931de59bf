//! Routing API HTTP client.

use std::future::Future;

use reqwest::{Client, Url};
use runroute_core::{ExternalRouteResponse, RouteRequest};

use crate::error::FetchError;

/// Anything that can turn a [`RouteRequest`] into a raw routing payload.
pub trait RouteSource: Send + Sync {
    fn fetch(
        &self,
        request: &RouteRequest,
    ) -> impl Future<Output = Result<ExternalRouteResponse, FetchError>> + Send;
}

/// HTTP client for the upstream routing API.
///
/// Issues one GET per call and never retries. No timeout is applied; drop the
/// returned future to abandon an in-flight request.
#[derive(Debug, Clone)]
pub struct RoutingClient {
    pub(crate) client: Client,
    pub(crate) base_url: Url,
    pub(crate) request_id: Option<String>,
}

impl RoutingClient {
    /// Create a client for the given base URL.
    pub fn new(base_url: &str) -> Result<Self, FetchError> {
        Self::with_client(Client::new(), base_url)
    }

    /// Create a client that reuses an existing `reqwest::Client`.
    pub fn with_client(client: Client, base_url: &str) -> Result<Self, FetchError> {
        let base_url = Url::parse(base_url.trim()).map_err(|err| FetchError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: err.to_string(),
        })?;
        Ok(Self {
            client,
            base_url,
            request_id: None,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Request id forwarded as `X-Request-ID` on outbound calls.
    pub fn set_request_id(&mut self, request_id: Option<String>) {
        self.request_id = request_id
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());
    }

    /// Copy of this client tagged with a request id.
    pub fn with_request_id(&self, request_id: Option<String>) -> Self {
        let mut client = self.clone();
        client.set_request_id(request_id);
        client
    }

    /// Full upstream URL for a request, query appended to the base URL.
    pub fn request_url(&self, request: &RouteRequest) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut().extend_pairs(request.query_pairs());
        url
    }

    fn apply_request_id(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.request_id.as_deref() {
            Some(value) if !value.is_empty() => request.header("X-Request-ID", value),
            _ => request,
        }
    }

    /// Fetch and parse a route for the given request.
    pub async fn fetch_route(
        &self,
        request: &RouteRequest,
    ) -> Result<ExternalRouteResponse, FetchError> {
        let url = self.request_url(request);
        tracing::debug!("Fetching route from {}", url);

        let response = self
            .apply_request_id(self.client.get(url))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("Routing API returned {}", status);
            return Err(FetchError::Status { status, body });
        }

        let bytes = response.bytes().await?;
        let payload = serde_json::from_slice::<ExternalRouteResponse>(&bytes).map_err(|err| {
            tracing::warn!("Failed to parse routing response: {}", err);
            err
        })?;

        tracing::debug!("Routing API returned {} route(s)", payload.routes().len());
        Ok(payload)
    }
}

impl RouteSource for RoutingClient {
    fn fetch(
        &self,
        request: &RouteRequest,
    ) -> impl Future<Output = Result<ExternalRouteResponse, FetchError>> + Send {
        self.fetch_route(request)
    }
}
