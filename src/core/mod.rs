//! Core module containing fundamental traits and types of the API

pub mod auth;
pub mod entity;
pub mod error;
pub mod query;
pub mod repository;
pub mod store;
pub mod validation;

pub use auth::{AuthContext, AuthPolicy, Role, TokenIssuer};
pub use entity::{Record, UniqueKey};
pub use error::{ApiError, ApiResult, StorageError, ValidationError};
pub use repository::{Predicate, Repository};
pub use store::Store;
