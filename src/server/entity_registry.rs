//! Entity registry for managing entity descriptors and their routes

use super::host::AppState;
use axum::Router;
use std::collections::BTreeMap;

/// Trait that describes how to build routes for an entity
///
/// Each entity (Title, Review, User, etc.) implements this trait to provide
/// its routes, relative to the API prefix.
pub trait EntityDescriptor: Send + Sync {
    /// The entity type name (singular, e.g., "review")
    fn entity_type(&self) -> &str;

    /// The plural form (e.g., "reviews")
    fn plural(&self) -> &str;

    /// Build the routes for this entity
    fn build_routes(&self) -> Router<AppState>;
}

/// Registry for all entities exposed by the API
#[derive(Default)]
pub struct EntityRegistry {
    descriptors: BTreeMap<String, Box<dyn EntityDescriptor>>,
}

impl EntityRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            descriptors: BTreeMap::new(),
        }
    }

    /// Register an entity descriptor
    ///
    /// The entity type name is the key; registering it again replaces it.
    pub fn register(&mut self, descriptor: Box<dyn EntityDescriptor>) {
        let entity_type = descriptor.entity_type().to_string();
        self.descriptors.insert(entity_type, descriptor);
    }

    /// Build a router with all registered entity routes
    pub fn build_routes(&self) -> Router<AppState> {
        self.descriptors
            .values()
            .fold(Router::new(), |router, descriptor| {
                router.merge(descriptor.build_routes())
            })
    }

    /// Get all registered entity types, in name order
    pub fn entity_types(&self) -> Vec<&str> {
        self.descriptors.keys().map(|s| s.as_str()).collect()
    }
}
