//! Review entity module

pub mod descriptor;
pub mod handlers;
pub mod model;
pub mod serializer;

pub use descriptor::ReviewDescriptor;
pub use model::Review;
pub use serializer::find_review;
