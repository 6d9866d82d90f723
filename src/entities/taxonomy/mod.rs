//! Category and Genre entities

pub mod descriptor;
pub mod handlers;
pub mod model;
pub mod serializer;

pub use descriptor::TaxonDescriptor;
pub use model::{Category, Genre, Taxon};
pub use serializer::{TaxonOut, resolve_slug};
