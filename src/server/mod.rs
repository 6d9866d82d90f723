//! Server module for building the HTTP server
//!
//! This module provides a `ServerBuilder` that registers:
//! - the routes of every entity descriptor, under `/v1`
//! - health check routes
//! - request tracing and CORS layers

pub mod builder;
pub mod entity_registry;
pub mod exposure;
pub mod host;

pub use builder::ServerBuilder;
pub use entity_registry::{EntityDescriptor, EntityRegistry};
pub use exposure::RestExposure;
pub use host::AppState;
