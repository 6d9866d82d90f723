//! Entity descriptor for Title

use super::handlers::{create_title, delete_title, get_title, list_titles, update_title};
use crate::server::{AppState, EntityDescriptor};
use axum::{Router, routing::get};

/// Descriptor for the Title entity
pub struct TitleDescriptor;

impl EntityDescriptor for TitleDescriptor {
    fn entity_type(&self) -> &str {
        "title"
    }

    fn plural(&self) -> &str {
        "titles"
    }

    fn build_routes(&self) -> Router<AppState> {
        Router::new()
            .route("/titles", get(list_titles).post(create_title))
            .route(
                "/titles/{title_id}",
                get(get_title).patch(update_title).delete(delete_title),
            )
    }
}
