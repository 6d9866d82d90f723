//! Entity descriptor for Comment

use super::handlers::{
    create_comment, delete_comment, get_comment, list_comments, update_comment,
};
use crate::server::{AppState, EntityDescriptor};
use axum::{Router, routing::get};

/// Descriptor for the Comment entity
pub struct CommentDescriptor;

impl EntityDescriptor for CommentDescriptor {
    fn entity_type(&self) -> &str {
        "comment"
    }

    fn plural(&self) -> &str {
        "comments"
    }

    fn build_routes(&self) -> Router<AppState> {
        Router::new()
            .route(
                "/titles/{title_id}/reviews/{review_id}/comments",
                get(list_comments).post(create_comment),
            )
            .route(
                "/titles/{title_id}/reviews/{review_id}/comments/{comment_id}",
                get(get_comment).patch(update_comment).delete(delete_comment),
            )
    }
}
