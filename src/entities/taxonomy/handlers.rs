//! HTTP handlers shared by categories and genres
//!
//! Reads are public, writes are admin-only. Every handler is generic over
//! the [`Taxon`] it serves.

use super::model::Taxon;
use super::serializer::{TaxonCreate, TaxonOut, TaxonPatch, find_by_slug};
use crate::core::auth::{AuthContext, AuthPolicy};
use crate::core::error::ApiResult;
use crate::core::query::{PageParams, PaginatedResponse, SearchParams};
use crate::core::validation::ValidatedJson;
use crate::server::AppState;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

pub async fn list<T: Taxon>(
    State(state): State<AppState>,
    Query(page): Query<PageParams>,
    Query(search): Query<SearchParams>,
) -> ApiResult<Json<PaginatedResponse<TaxonOut>>> {
    let items = T::repository(&state.store)
        .find(&|t: &T| search.matches(t.name()))
        .await?;

    Ok(Json(
        page.paginate(items, &state.config.pagination)
            .map(|t| TaxonOut::from_taxon(&t)),
    ))
}

pub async fn create<T: Taxon>(
    State(state): State<AppState>,
    auth: AuthContext,
    ValidatedJson(payload): ValidatedJson<TaxonCreate>,
) -> ApiResult<(StatusCode, Json<TaxonOut>)> {
    AuthPolicy::AdminOnly.enforce(&auth)?;

    let taxon = T::repository(&state.store)
        .create(payload.into_taxon::<T>())
        .await?;

    tracing::info!(kind = T::KIND, slug = %taxon.slug(), "Created");
    Ok((StatusCode::CREATED, Json(TaxonOut::from_taxon(&taxon))))
}

pub async fn get<T: Taxon>(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> ApiResult<Json<TaxonOut>> {
    let taxon = find_by_slug::<T>(&state.store, &slug).await?;
    Ok(Json(TaxonOut::from_taxon(&taxon)))
}

pub async fn update<T: Taxon>(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(slug): Path<String>,
    ValidatedJson(patch): ValidatedJson<TaxonPatch>,
) -> ApiResult<Json<TaxonOut>> {
    AuthPolicy::AdminOnly.enforce(&auth)?;

    let taxon = find_by_slug::<T>(&state.store, &slug).await?;
    let taxon = T::repository(&state.store).update(patch.apply(taxon)).await?;
    Ok(Json(TaxonOut::from_taxon(&taxon)))
}

pub async fn delete<T: Taxon>(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(slug): Path<String>,
) -> ApiResult<StatusCode> {
    AuthPolicy::AdminOnly.enforce(&auth)?;

    let taxon = find_by_slug::<T>(&state.store, &slug).await?;
    let detached = T::detach(&state.store, taxon.id()).await?;
    T::repository(&state.store).delete(taxon.id()).await?;

    tracing::info!(kind = T::KIND, %slug, detached, "Deleted");
    Ok(StatusCode::NO_CONTENT)
}
