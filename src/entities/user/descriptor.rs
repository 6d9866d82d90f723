//! Entity descriptors for users and the auth endpoints

use super::handlers::{
    create_user, delete_user, get_me, get_user, list_users, obtain_token, signup, update_me,
    update_user,
};
use crate::server::{AppState, EntityDescriptor};
use axum::{
    Router,
    routing::{get, post},
};

/// Descriptor for the User entity
pub struct UserDescriptor;

impl EntityDescriptor for UserDescriptor {
    fn entity_type(&self) -> &str {
        "user"
    }

    fn plural(&self) -> &str {
        "users"
    }

    fn build_routes(&self) -> Router<AppState> {
        Router::new()
            .route("/users", get(list_users).post(create_user))
            .route("/users/me", get(get_me).patch(update_me))
            .route(
                "/users/{username}",
                get(get_user).patch(update_user).delete(delete_user),
            )
    }
}

/// Descriptor for signup and token issuance
pub struct AuthDescriptor;

impl EntityDescriptor for AuthDescriptor {
    fn entity_type(&self) -> &str {
        "auth"
    }

    fn plural(&self) -> &str {
        "auth"
    }

    fn build_routes(&self) -> Router<AppState> {
        Router::new()
            .route("/auth/signup", post(signup))
            .route("/auth/token", post(obtain_token))
    }
}
