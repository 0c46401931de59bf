//! Route fetch service: cache lookup, upstream fetch, normalization.

use std::sync::Arc;

use runroute_client::{FetchError, RouteSource, RoutingClient};
use runroute_core::{
    normalize, CacheKey, LocationKey, MalformedResponseError, NormalizedRoute, RouteDefaults,
    RouteRequest,
};
use thiserror::Error;

use crate::cache::{MemoryRouteCache, RouteCache};
use crate::config::Config;

/// Errors surfaced by [`RouteFetchService`], passed through unchanged.
#[derive(Debug, Error)]
pub enum RouteServiceError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Malformed(#[from] MalformedResponseError),
}

/// Turns user route requests into normalized routes.
///
/// Each call is one pipeline: derive the cache key, return the cached payload
/// on a hit, otherwise fetch, store and normalize. Concurrent misses on the
/// same key are not de-duplicated.
pub struct RouteFetchService<S, C = MemoryRouteCache> {
    source: S,
    cache: Arc<C>,
    defaults: RouteDefaults,
}

impl RouteFetchService<RoutingClient, MemoryRouteCache> {
    /// Wire the HTTP client and in-memory cache from configuration.
    pub fn from_config(config: &Config) -> Result<Self, FetchError> {
        let client = RoutingClient::new(&config.route_api)?;
        let cache = MemoryRouteCache::new(config.enable_cache)
            .with_max_entries(config.cache_max_entries);
        Ok(Self::new(client, cache, config.route_defaults))
    }
}

impl<S, C> RouteFetchService<S, C>
where
    S: RouteSource,
    C: RouteCache,
{
    pub fn new(source: S, cache: C, defaults: RouteDefaults) -> Self {
        Self {
            source,
            cache: Arc::new(cache),
            defaults,
        }
    }

    /// Same cache and defaults, different upstream source.
    pub fn with_source<T: RouteSource>(&self, source: T) -> RouteFetchService<T, C> {
        RouteFetchService {
            source,
            cache: Arc::clone(&self.cache),
            defaults: self.defaults,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    pub fn defaults(&self) -> &RouteDefaults {
        &self.defaults
    }

    /// Fetch a route of `distance_km` kilometers.
    ///
    /// `random_seed` falls back to the configured default seed.
    pub async fn fetch_route(
        &self,
        distance_km: f64,
        route_type_id: i64,
        location: impl Into<LocationKey>,
        random_seed: Option<i64>,
    ) -> Result<NormalizedRoute, RouteServiceError> {
        let request = RouteRequest::from_km(
            distance_km,
            route_type_id,
            location,
            random_seed,
            &self.defaults,
        );
        self.fetch_request(request).await
    }

    /// Run the pipeline for an already populated request.
    pub async fn fetch_request(
        &self,
        request: RouteRequest,
    ) -> Result<NormalizedRoute, RouteServiceError> {
        let key = CacheKey::for_request(&request);

        if let Some(cached) = self.cache.get(&key) {
            tracing::debug!("Route cache hit for {}", key);
            return Ok(normalize(&cached)?);
        }

        tracing::debug!("Route cache miss for {}", key);
        let response = self.source.fetch(&request).await.map_err(|err| {
            tracing::warn!("Route fetch failed for {}: {}", key, err);
            err
        })?;

        let response = Arc::new(response);
        self.cache.put(key.clone(), Arc::clone(&response));

        normalize(&response).map_err(|err| {
            tracing::warn!("Route response for {} unusable: {}", key, err);
            err.into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use runroute_core::{
        ExternalRoute, ExternalRouteResponse, LatLong, RouteGeometry, RouteSegment,
        SegmentSection,
    };
    use std::future::Future;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    /// Upstream stand-in that counts calls and records requests.
    #[derive(Default)]
    struct FakeSource {
        calls: AtomicUsize,
        requests: Mutex<Vec<RouteRequest>>,
        empty: bool,
        delay: Option<Duration>,
    }

    impl FakeSource {
        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    fn sample_response() -> ExternalRouteResponse {
        ExternalRouteResponse::from_routes(vec![ExternalRoute {
            routetime: 3000.0,
            routelength: 10000.0,
            routesegments: vec![
                RouteSegment {
                    segmentsections: vec![SegmentSection {
                        geometry: RouteGeometry {
                            coordinates: vec![[1.0, 2.0], [3.0, 4.0]],
                        },
                    }],
                },
                RouteSegment {
                    segmentsections: vec![SegmentSection {
                        geometry: RouteGeometry {
                            coordinates: vec![[5.0, 6.0]],
                        },
                    }],
                },
            ],
        }])
    }

    impl RouteSource for FakeSource {
        fn fetch(
            &self,
            request: &RouteRequest,
        ) -> impl Future<Output = Result<ExternalRouteResponse, FetchError>> + Send {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.requests.lock().unwrap().push(request.clone());
            let empty = self.empty;
            let delay = self.delay;
            async move {
                if let Some(delay) = delay {
                    tokio::time::sleep(delay).await;
                }
                if empty {
                    Ok(ExternalRouteResponse::from_routes(Vec::new()))
                } else {
                    Ok(sample_response())
                }
            }
        }
    }

    fn service(source: FakeSource, cache_enabled: bool) -> RouteFetchService<FakeSource> {
        RouteFetchService::new(
            source,
            MemoryRouteCache::new(cache_enabled),
            RouteDefaults::default(),
        )
    }

    #[tokio::test]
    async fn converts_km_and_applies_defaults() {
        let service = service(FakeSource::default(), false);
        service.fetch_route(10.0, 65, "home", None).await.unwrap();

        let requests = service.source().requests.lock().unwrap();
        let request = &requests[0];
        assert_eq!(request.distance_meters, 10000.0);
        assert_eq!(request.route_type_id, 65);
        assert_eq!(request.speed, 12);
        assert_eq!(request.preferences_mask, 63);
        assert_eq!(request.random_seed, 800);
        assert_eq!(request.location_key, LocationKey::from("home"));
    }

    #[tokio::test]
    async fn explicit_seed_overrides_default() {
        let service = service(FakeSource::default(), false);
        service.fetch_route(5.0, 69, "home", Some(42)).await.unwrap();

        assert_eq!(service.source().requests.lock().unwrap()[0].random_seed, 42);
    }

    #[tokio::test]
    async fn returns_normalized_route() {
        let service = service(FakeSource::default(), false);
        let route = service.fetch_route(10.0, 69, "home", None).await.unwrap();

        assert_eq!(route.duration_seconds, 3000.0);
        assert_eq!(route.length_meters, 10000.0);
        assert_eq!(
            route.coordinates,
            vec![LatLong(2.0, 1.0), LatLong(4.0, 3.0), LatLong(6.0, 5.0)]
        );
    }

    #[tokio::test]
    async fn cache_hit_skips_upstream() {
        let service = service(FakeSource::default(), true);
        let first = service.fetch_route(10.0, 69, "home", None).await.unwrap();
        let second = service.fetch_route(10.0, 69, "home", None).await.unwrap();

        assert_eq!(service.source().calls(), 1);
        assert_eq!(first, second);
        assert_eq!(service.cache().len(), 1);
    }

    #[tokio::test]
    async fn different_parameters_miss() {
        let service = service(FakeSource::default(), true);
        service.fetch_route(10.0, 69, "home", None).await.unwrap();
        service.fetch_route(10.0, 69, "home", Some(801)).await.unwrap();

        assert_eq!(service.source().calls(), 2);
    }

    #[tokio::test]
    async fn disabled_cache_fetches_every_time() {
        let service = service(FakeSource::default(), false);
        service.fetch_route(10.0, 69, "home", None).await.unwrap();
        service.fetch_route(10.0, 69, "home", None).await.unwrap();

        assert_eq!(service.source().calls(), 2);
        assert!(service.cache().is_empty());
    }

    #[tokio::test]
    async fn empty_route_list_is_malformed() {
        let source = FakeSource {
            empty: true,
            ..FakeSource::default()
        };
        let service = service(source, true);

        let err = service.fetch_route(10.0, 69, "home", None).await.unwrap_err();
        assert!(matches!(
            err,
            RouteServiceError::Malformed(MalformedResponseError::NoRoutes)
        ));
    }

    #[tokio::test]
    async fn concurrent_misses_both_complete() {
        let source = FakeSource {
            delay: Some(Duration::from_millis(20)),
            ..FakeSource::default()
        };
        let service = service(source, true);

        let (a, b) = tokio::join!(
            service.fetch_route(10.0, 69, "home", None),
            service.fetch_route(10.0, 69, "home", None)
        );

        assert_eq!(a.unwrap(), b.unwrap());
        assert_eq!(service.source().calls(), 2);
        assert_eq!(service.cache().len(), 1);

        service.fetch_route(10.0, 69, "home", None).await.unwrap();
        assert_eq!(service.source().calls(), 2);
    }

    #[tokio::test]
    async fn abandoned_fetch_leaves_cache_empty() {
        let source = FakeSource {
            delay: Some(Duration::from_secs(5)),
            ..FakeSource::default()
        };
        let service = service(source, true);

        let result = tokio::time::timeout(
            Duration::from_millis(10),
            service.fetch_route(10.0, 69, "home", None),
        )
        .await;

        assert!(result.is_err());
        assert!(service.cache().is_empty());
    }

    #[tokio::test]
    async fn with_source_shares_cache() {
        let service = service(FakeSource::default(), true);
        service.fetch_route(10.0, 69, "home", None).await.unwrap();

        let other = service.with_source(FakeSource::default());
        other.fetch_route(10.0, 69, "home", None).await.unwrap();
        assert_eq!(other.source().calls(), 0);
    }
}
