//! Review HTTP handlers, nested under a title

use super::model::Review;
use super::serializer::{
    ReviewCreate, ReviewOut, ReviewPatch, find_review, render, validate_review,
};
use crate::core::auth::{AuthContext, AuthPolicy};
use crate::core::error::{ApiError, ApiResult, StorageError, ValidationError};
use crate::core::query::{PageParams, PaginatedResponse};
use crate::core::validation::{Operation, ValidatedJson};
use crate::entities::Comment;
use crate::entities::title::find_title;
use crate::server::AppState;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

async fn render_one(state: &AppState, review: Review) -> ApiResult<ReviewOut> {
    render(&state.store, vec![review])
        .await?
        .pop()
        .ok_or_else(|| ApiError::Storage(StorageError::Unavailable("review vanished".into())))
}

pub async fn list_reviews(
    State(state): State<AppState>,
    Path(title_id): Path<i64>,
    Query(page): Query<PageParams>,
) -> ApiResult<Json<PaginatedResponse<ReviewOut>>> {
    find_title(&state.store, title_id).await?;

    let reviews = state
        .store
        .reviews
        .find(&|r: &Review| r.title_id == title_id)
        .await?;
    let page = page.paginate(reviews, &state.config.pagination);

    Ok(Json(PaginatedResponse {
        data: render(&state.store, page.data).await?,
        pagination: page.pagination,
    }))
}

pub async fn create_review(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(title_id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<ReviewCreate>,
) -> ApiResult<(StatusCode, Json<ReviewOut>)> {
    AuthPolicy::Authenticated.enforce(&auth)?;
    let author_id = auth.require_user()?;

    let title = validate_review(&state.store, Operation::Create, title_id, author_id).await?;
    let review = Review::new(
        title.id,
        author_id,
        payload.text.unwrap_or_default().trim().to_string(),
        payload.score.unwrap_or_default(),
    );

    // A concurrent request may have slipped in after the check above
    let review = state.store.reviews.create(review).await.map_err(|e| match e {
        StorageError::UniqueViolation { .. } => ApiError::from(ValidationError::DuplicateReview),
        other => ApiError::from(other),
    })?;

    tracing::info!(review_id = review.id, title_id, author_id, score = review.score, "Review created");
    Ok((StatusCode::CREATED, Json(render_one(&state, review).await?)))
}

pub async fn get_review(
    State(state): State<AppState>,
    Path((title_id, review_id)): Path<(i64, i64)>,
) -> ApiResult<Json<ReviewOut>> {
    let review = find_review(&state.store, title_id, review_id).await?;
    Ok(Json(render_one(&state, review).await?))
}

pub async fn update_review(
    State(state): State<AppState>,
    auth: AuthContext,
    Path((title_id, review_id)): Path<(i64, i64)>,
    ValidatedJson(patch): ValidatedJson<ReviewPatch>,
) -> ApiResult<Json<ReviewOut>> {
    let review = find_review(&state.store, title_id, review_id).await?;
    AuthPolicy::AuthorOrStaff {
        author_id: review.author_id,
    }
    .enforce(&auth)?;

    validate_review(&state.store, Operation::Update, title_id, review.author_id).await?;
    let review = state.store.reviews.update(patch.apply(review)).await?;
    Ok(Json(render_one(&state, review).await?))
}

pub async fn delete_review(
    State(state): State<AppState>,
    auth: AuthContext,
    Path((title_id, review_id)): Path<(i64, i64)>,
) -> ApiResult<StatusCode> {
    let review = find_review(&state.store, title_id, review_id).await?;
    AuthPolicy::AuthorOrStaff {
        author_id: review.author_id,
    }
    .enforce(&auth)?;

    let comments = state
        .store
        .comments
        .delete_where(&|c: &Comment| c.review_id == review.id)
        .await?;
    state.store.reviews.delete(review.id).await?;

    tracing::info!(review_id, comments, "Review deleted");
    Ok(StatusCode::NO_CONTENT)
}
