//! API exposure
//!
//! Each exposure consumes the shared [`AppState`](super::AppState) and the
//! entity registry and produces a Router for its protocol. REST is the only one.

pub mod rest;

pub use rest::RestExposure;
