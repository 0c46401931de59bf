use thiserror::Error;

/// The upstream answered with a well-formed payload that holds no usable route.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedResponseError {
    #[error("routing response contained no route candidates")]
    NoRoutes,
}
