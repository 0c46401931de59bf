//! runroute CLI - command line tools for the route service.
//!
//! This crate provides the CLI binaries:
//! - fetch_route: generate one route against the configured routing API

pub mod logging;

pub use logging::init_logging;
