//! Title HTTP handlers

use super::model::Title;
use super::serializer::{TitlePatch, TitleRead, TitleWrite, find_title, to_read};
use crate::core::auth::{AuthContext, AuthPolicy};
use crate::core::error::ApiResult;
use crate::core::query::{PageParams, PaginatedResponse};
use crate::core::store::Store;
use crate::core::validation::ValidatedJson;
use crate::entities::taxonomy::{Category, Genre};
use crate::entities::{Comment, Review};
use crate::server::AppState;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use std::collections::HashSet;

/// Filters accepted by `GET /titles`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TitleFilter {
    /// Category slug
    pub category: Option<String>,
    /// Genre slug
    pub genre: Option<String>,
    /// Substring of the name
    pub name: Option<String>,
    pub year: Option<i32>,
}

impl TitleFilter {
    /// Apply the filter; an unknown slug matches nothing
    async fn apply(&self, store: &Store) -> ApiResult<Vec<Title>> {
        let category_id = match &self.category {
            Some(slug) => match store.categories.find_one(&|c: &Category| &c.slug == slug).await? {
                Some(category) => Some(category.id),
                None => return Ok(Vec::new()),
            },
            None => None,
        };
        let genre_id = match &self.genre {
            Some(slug) => match store.genres.find_one(&|g: &Genre| &g.slug == slug).await? {
                Some(genre) => Some(genre.id),
                None => return Ok(Vec::new()),
            },
            None => None,
        };
        let name = self.name.as_deref().map(str::to_lowercase);

        store
            .titles
            .find(&|t: &Title| {
                category_id.is_none_or(|id| t.category_id == Some(id))
                    && genre_id.is_none_or(|id| t.genre_ids.contains(&id))
                    && self.year.is_none_or(|year| t.year == year)
                    && name
                        .as_deref()
                        .is_none_or(|needle| t.name.to_lowercase().contains(needle))
            })
            .await
            .map_err(Into::into)
    }
}

pub async fn list_titles(
    State(state): State<AppState>,
    Query(page): Query<PageParams>,
    Query(filter): Query<TitleFilter>,
) -> ApiResult<Json<PaginatedResponse<TitleRead>>> {
    let titles = filter.apply(&state.store).await?;
    let page = page.paginate(titles, &state.config.pagination);

    let mut data = Vec::with_capacity(page.data.len());
    for title in page.data {
        data.push(to_read(&state.store, title).await?);
    }

    Ok(Json(PaginatedResponse {
        data,
        pagination: page.pagination,
    }))
}

pub async fn create_title(
    State(state): State<AppState>,
    auth: AuthContext,
    ValidatedJson(payload): ValidatedJson<TitleWrite>,
) -> ApiResult<(StatusCode, Json<TitleRead>)> {
    AuthPolicy::AdminOnly.enforce(&auth)?;

    let title = payload.into_title(&state.store).await?;
    let title = state.store.titles.create(title).await?;

    tracing::info!(title_id = title.id, name = %title.name, "Title created");
    Ok((StatusCode::CREATED, Json(to_read(&state.store, title).await?)))
}

pub async fn get_title(
    State(state): State<AppState>,
    Path(title_id): Path<i64>,
) -> ApiResult<Json<TitleRead>> {
    let title = find_title(&state.store, title_id).await?;
    Ok(Json(to_read(&state.store, title).await?))
}

pub async fn update_title(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(title_id): Path<i64>,
    ValidatedJson(patch): ValidatedJson<TitlePatch>,
) -> ApiResult<Json<TitleRead>> {
    AuthPolicy::AdminOnly.enforce(&auth)?;

    let title = find_title(&state.store, title_id).await?;
    let title = patch.apply(&state.store, title).await?;
    let title = state.store.titles.update(title).await?;
    Ok(Json(to_read(&state.store, title).await?))
}

pub async fn delete_title(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(title_id): Path<i64>,
) -> ApiResult<StatusCode> {
    AuthPolicy::AdminOnly.enforce(&auth)?;

    let title = find_title(&state.store, title_id).await?;
    let store = &state.store;

    let review_ids: HashSet<i64> = store
        .reviews
        .find(&|r: &Review| r.title_id == title.id)
        .await?
        .into_iter()
        .map(|r| r.id)
        .collect();
    let comments = store
        .comments
        .delete_where(&|c: &Comment| review_ids.contains(&c.review_id))
        .await?;
    let reviews = store
        .reviews
        .delete_where(&|r: &Review| r.title_id == title.id)
        .await?;
    store.titles.delete(title.id).await?;

    tracing::info!(title_id, reviews, comments, "Title deleted");
    Ok(StatusCode::NO_CONTENT)
}
