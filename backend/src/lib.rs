//! Event marketplace backend: customers book vendors, vendors manage leads,
//! quotes and a portfolio.
//!
//! The crate is laid out as ports and adapters. [`domain`] holds the types,
//! rules and services; [`inbound`] exposes them over HTTP; [`outbound`]
//! implements the storage and credential ports.

pub mod config;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
