//! # yamdb
//!
//! REST API backend for a content-review platform: titles, categories,
//! genres, reviews, comments and users.
//!
//! ## Features
//!
//! - **Validation at the boundary**: `validator` derives on request DTOs plus
//!   storage-aware rules (one review per title, idempotent signup)
//! - **Read/write split**: titles are written with slugs and read with nested objects
//! - **Typed repositories**: one [`Repository`](core::Repository) per entity, in memory
//! - **Token authentication**: confirmation code exchanged for an opaque bearer token
//! - **Role policies**: public reads, author/moderator/admin writes
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use yamdb::prelude::*;
//!
//! let config = AppConfig::load(Some("config.yaml"))?;
//! ServerBuilder::new()
//!     .with_config(config)
//!     .register_defaults()
//!     .serve()
//!     .await?;
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        ApiError, ApiResult, AuthContext, AuthPolicy, Record, Repository, Role, Store,
        StorageError, TokenIssuer, ValidationError,
        auth::{CodeSender, ConfirmationCodes, InMemoryTokenIssuer, LogCodeSender},
        query::{PageParams, PaginatedResponse},
        validation::{Operation, ValidatedJson},
    };

    // === Entities ===
    pub use crate::entities::{Category, Comment, Genre, Review, Title, User};

    // === Storage ===
    pub use crate::storage::InMemoryRepository;

    // === Config ===
    pub use crate::config::AppConfig;

    // === Server ===
    pub use crate::server::{AppState, EntityDescriptor, EntityRegistry, ServerBuilder};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
}
