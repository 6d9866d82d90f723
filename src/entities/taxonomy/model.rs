//! Category and Genre records
//!
//! Both are a `(name, slug)` pair keyed by slug on the wire; the [`Taxon`]
//! trait lets one set of handlers serve both.

use crate::core::error::ApiResult;
use crate::core::repository::Repository;
use crate::core::store::Store;
use crate::entities::Title;
use crate::impl_record;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genre {
    pub id: i64,
    pub name: String,
    pub slug: String,
}

impl_record!(Category, "category", unique: [slug]);
impl_record!(Genre, "genre", unique: [slug]);

/// A slug-keyed classification that titles refer to
#[async_trait]
pub trait Taxon: crate::core::entity::Record {
    /// Collection segment in URLs (e.g., "categories")
    const PLURAL: &'static str;

    fn new(name: String, slug: String) -> Self;
    fn name(&self) -> &str;
    fn slug(&self) -> &str;
    fn set_name(&mut self, name: String);
    fn set_slug(&mut self, slug: String);

    /// The repository holding this taxon
    fn repository(store: &Store) -> &Arc<dyn Repository<Self>>;

    /// Drop title references to the taxon with `id`; returns how many titles changed
    async fn detach(store: &Store, id: i64) -> ApiResult<usize>;
}

macro_rules! taxon_accessors {
    () => {
        fn new(name: String, slug: String) -> Self {
            Self { id: 0, name, slug }
        }

        fn name(&self) -> &str {
            &self.name
        }

        fn slug(&self) -> &str {
            &self.slug
        }

        fn set_name(&mut self, name: String) {
            self.name = name;
        }

        fn set_slug(&mut self, slug: String) {
            self.slug = slug;
        }
    };
}

#[async_trait]
impl Taxon for Category {
    const PLURAL: &'static str = "categories";

    taxon_accessors!();

    fn repository(store: &Store) -> &Arc<dyn Repository<Self>> {
        &store.categories
    }

    async fn detach(store: &Store, id: i64) -> ApiResult<usize> {
        let titles = store
            .titles
            .find(&|t: &Title| t.category_id == Some(id))
            .await?;
        let count = titles.len();
        for mut title in titles {
            title.category_id = None;
            store.titles.update(title).await?;
        }
        Ok(count)
    }
}

#[async_trait]
impl Taxon for Genre {
    const PLURAL: &'static str = "genres";

    taxon_accessors!();

    fn repository(store: &Store) -> &Arc<dyn Repository<Self>> {
        &store.genres
    }

    async fn detach(store: &Store, id: i64) -> ApiResult<usize> {
        let titles = store
            .titles
            .find(&|t: &Title| t.genre_ids.contains(&id))
            .await?;
        let count = titles.len();
        for mut title in titles {
            title.genre_ids.retain(|g| *g != id);
            store.titles.update(title).await?;
        }
        Ok(count)
    }
}
