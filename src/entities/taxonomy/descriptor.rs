//! Route descriptor for categories and genres

use super::handlers::{create, delete, get, list, update};
use super::model::Taxon;
use crate::server::{AppState, EntityDescriptor};
use axum::{Router, routing};
use std::marker::PhantomData;

/// Descriptor serving `/{plural}` and `/{plural}/{slug}` for one taxon type
pub struct TaxonDescriptor<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> TaxonDescriptor<T> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for TaxonDescriptor<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Taxon> EntityDescriptor for TaxonDescriptor<T> {
    fn entity_type(&self) -> &str {
        T::KIND
    }

    fn plural(&self) -> &str {
        T::PLURAL
    }

    fn build_routes(&self) -> Router<AppState> {
        let collection = format!("/{}", T::PLURAL);
        let item = format!("/{}/{{slug}}", T::PLURAL);

        Router::new()
            .route(&collection, routing::get(list::<T>).post(create::<T>))
            .route(&item, routing::get(get::<T>).patch(update::<T>).delete(delete::<T>))
    }
}
