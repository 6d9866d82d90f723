//! The set of repositories the API works against

use crate::core::repository::Repository;
use crate::entities::{Category, Comment, Genre, Review, Title, User};
use crate::storage::InMemoryRepository;
use std::sync::Arc;

/// One repository per entity type
///
/// Cloning is cheap: every field is an `Arc`.
#[derive(Clone)]
pub struct Store {
    pub users: Arc<dyn Repository<User>>,
    pub categories: Arc<dyn Repository<Category>>,
    pub genres: Arc<dyn Repository<Genre>>,
    pub titles: Arc<dyn Repository<Title>>,
    pub reviews: Arc<dyn Repository<Review>>,
    pub comments: Arc<dyn Repository<Comment>>,
}

impl Store {
    /// A store backed entirely by in-memory repositories
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(InMemoryRepository::<User>::new()),
            categories: Arc::new(InMemoryRepository::<Category>::new()),
            genres: Arc::new(InMemoryRepository::<Genre>::new()),
            titles: Arc::new(InMemoryRepository::<Title>::new()),
            reviews: Arc::new(InMemoryRepository::<Review>::new()),
            comments: Arc::new(InMemoryRepository::<Comment>::new()),
        }
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::in_memory()
    }
}
