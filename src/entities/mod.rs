//! Entities of the review platform
//!
//! Each entity module follows the same layout:
//! - `model`: the stored record
//! - `serializer`: request/response DTOs and the validators that need storage
//! - `handlers`: axum handlers
//! - `descriptor`: the [`EntityDescriptor`](crate::server::EntityDescriptor) wiring routes

pub mod macros;

pub mod comment;
pub mod review;
pub mod taxonomy;
pub mod title;
pub mod user;

pub use comment::{Comment, CommentDescriptor};
pub use review::{Review, ReviewDescriptor};
pub use taxonomy::{Category, Genre, Taxon, TaxonDescriptor};
pub use title::{Title, TitleDescriptor};
pub use user::{AuthDescriptor, User, UserDescriptor, bootstrap_admin};
