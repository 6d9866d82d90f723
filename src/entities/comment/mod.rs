//! Comment entity module

pub mod descriptor;
pub mod handlers;
pub mod model;
pub mod serializer;

pub use descriptor::CommentDescriptor;
pub use model::Comment;
