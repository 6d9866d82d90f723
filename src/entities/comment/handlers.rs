//! Comment HTTP handlers, nested under a review

use super::model::Comment;
use super::serializer::{CommentCreate, CommentOut, CommentPatch, render, resolve_review};
use crate::core::auth::{AuthContext, AuthPolicy};
use crate::core::error::{ApiError, ApiResult, StorageError};
use crate::core::query::{PageParams, PaginatedResponse};
use crate::core::store::Store;
use crate::core::validation::ValidatedJson;
use crate::server::AppState;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

async fn find_comment(
    store: &Store,
    title_id: i64,
    review_id: i64,
    comment_id: i64,
) -> ApiResult<Comment> {
    resolve_review(store, title_id, review_id).await?;
    store
        .comments
        .get(comment_id)
        .await?
        .filter(|c| c.review_id == review_id)
        .ok_or_else(|| ApiError::not_found("comment", comment_id))
}

async fn render_one(store: &Store, comment: Comment) -> ApiResult<CommentOut> {
    render(store, vec![comment])
        .await?
        .pop()
        .ok_or_else(|| ApiError::Storage(StorageError::Unavailable("comment vanished".into())))
}

pub async fn list_comments(
    State(state): State<AppState>,
    Path((title_id, review_id)): Path<(i64, i64)>,
    Query(page): Query<PageParams>,
) -> ApiResult<Json<PaginatedResponse<CommentOut>>> {
    let review = resolve_review(&state.store, title_id, review_id).await?;

    let comments = state
        .store
        .comments
        .find(&|c: &Comment| c.review_id == review.id)
        .await?;
    let page = page.paginate(comments, &state.config.pagination);

    Ok(Json(PaginatedResponse {
        data: render(&state.store, page.data).await?,
        pagination: page.pagination,
    }))
}

pub async fn create_comment(
    State(state): State<AppState>,
    auth: AuthContext,
    Path((title_id, review_id)): Path<(i64, i64)>,
    ValidatedJson(payload): ValidatedJson<CommentCreate>,
) -> ApiResult<(StatusCode, Json<CommentOut>)> {
    AuthPolicy::Authenticated.enforce(&auth)?;
    let author_id = auth.require_user()?;

    let review = resolve_review(&state.store, title_id, review_id).await?;
    let comment = state
        .store
        .comments
        .create(Comment::new(
            review.id,
            author_id,
            payload.text.unwrap_or_default().trim().to_string(),
        ))
        .await?;

    tracing::info!(comment_id = comment.id, review_id, author_id, "Comment created");
    Ok((
        StatusCode::CREATED,
        Json(render_one(&state.store, comment).await?),
    ))
}

pub async fn get_comment(
    State(state): State<AppState>,
    Path((title_id, review_id, comment_id)): Path<(i64, i64, i64)>,
) -> ApiResult<Json<CommentOut>> {
    let comment = find_comment(&state.store, title_id, review_id, comment_id).await?;
    Ok(Json(render_one(&state.store, comment).await?))
}

pub async fn update_comment(
    State(state): State<AppState>,
    auth: AuthContext,
    Path((title_id, review_id, comment_id)): Path<(i64, i64, i64)>,
    ValidatedJson(patch): ValidatedJson<CommentPatch>,
) -> ApiResult<Json<CommentOut>> {
    let comment = find_comment(&state.store, title_id, review_id, comment_id).await?;
    AuthPolicy::AuthorOrStaff {
        author_id: comment.author_id,
    }
    .enforce(&auth)?;

    let comment = state.store.comments.update(patch.apply(comment)).await?;
    Ok(Json(render_one(&state.store, comment).await?))
}

pub async fn delete_comment(
    State(state): State<AppState>,
    auth: AuthContext,
    Path((title_id, review_id, comment_id)): Path<(i64, i64, i64)>,
) -> ApiResult<StatusCode> {
    let comment = find_comment(&state.store, title_id, review_id, comment_id).await?;
    AuthPolicy::AuthorOrStaff {
        author_id: comment.author_id,
    }
    .enforce(&auth)?;

    state.store.comments.delete(comment.id).await?;
    tracing::info!(comment_id, review_id, "Comment deleted");
    Ok(StatusCode::NO_CONTENT)
}
