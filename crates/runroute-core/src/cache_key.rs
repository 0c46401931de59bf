//! Canonical cache keys for route requests.

use std::fmt;

use url::form_urlencoded;

use crate::models::RouteRequest;

/// Deterministic signature of a [`RouteRequest`].
///
/// The key is the URL-encoded upstream query string, so it depends only on
/// field values and never on how the request was assembled.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn for_request(request: &RouteRequest) -> Self {
        let query = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(request.query_pairs())
            .finish();
        Self(query)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&RouteRequest> for CacheKey {
    fn from(request: &RouteRequest) -> Self {
        Self::for_request(request)
    }
}
