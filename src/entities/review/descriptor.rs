//! Entity descriptor for Review

use super::handlers::{create_review, delete_review, get_review, list_reviews, update_review};
use crate::server::{AppState, EntityDescriptor};
use axum::{Router, routing::get};

/// Descriptor for the Review entity
pub struct ReviewDescriptor;

impl EntityDescriptor for ReviewDescriptor {
    fn entity_type(&self) -> &str {
        "review"
    }

    fn plural(&self) -> &str {
        "reviews"
    }

    fn build_routes(&self) -> Router<AppState> {
        Router::new()
            .route(
                "/titles/{title_id}/reviews",
                get(list_reviews).post(create_review),
            )
            .route(
                "/titles/{title_id}/reviews/{review_id}",
                get(get_review).patch(update_review).delete(delete_review),
            )
    }
}
