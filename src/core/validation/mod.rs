//! Validation at the serialization boundary
//!
//! Field rules are declared with the `validator` derive on request DTOs and
//! enforced by the [`ValidatedJson`] extractor. Rules that need storage or
//! request context live next to each entity's serializer.

pub mod extractor;
pub mod validators;

pub use extractor::ValidatedJson;
pub use validators::{ReservedNameCheck, SLUG_RE, USERNAME_RE};

/// Kind of write a validator is checking
///
/// Some rules only apply on creation (e.g., one review per title).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Update,
}
