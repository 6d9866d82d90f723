//! Title entity module

pub mod descriptor;
pub mod handlers;
pub mod model;
pub mod serializer;

pub use descriptor::TitleDescriptor;
pub use model::Title;
pub use serializer::find_title;
