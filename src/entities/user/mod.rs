//! User entity module

pub mod descriptor;
pub mod handlers;
pub mod model;
pub mod serializer;

pub use descriptor::{AuthDescriptor, UserDescriptor};
pub use handlers::bootstrap_admin;
pub use model::User;
