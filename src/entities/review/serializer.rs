//! Review DTOs and the one-review-per-title rule

use super::model::Review;
use crate::core::error::{ApiError, ApiResult, ValidationError};
use crate::core::store::Store;
use crate::core::validation::Operation;
use crate::core::validation::validators::not_blank;
use crate::entities::title::{Title, find_title};
use crate::entities::user::handlers::usernames;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ReviewCreate {
    #[validate(
        required(message = "Обязательное поле."),
        length(min = 1, message = "Текст отзыва не может быть пустым."),
        custom(function = "not_blank")
    )]
    pub text: Option<String>,

    #[validate(
        required(message = "Обязательное поле."),
        range(min = 1, max = 10, message = "Оценка должна быть от 1 до 10.")
    )]
    pub score: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ReviewPatch {
    #[validate(
        length(min = 1, message = "Текст отзыва не может быть пустым."),
        custom(function = "not_blank")
    )]
    pub text: Option<String>,

    #[validate(range(min = 1, max = 10, message = "Оценка должна быть от 1 до 10."))]
    pub score: Option<i64>,
}

impl ReviewPatch {
    pub fn apply(self, mut review: Review) -> Review {
        if let Some(text) = self.text {
            review.text = text.trim().to_string();
        }
        if let Some(score) = self.score {
            review.score = score;
        }
        review
    }
}

/// Review as returned to clients; `author` is the username
#[derive(Debug, Clone, Serialize)]
pub struct ReviewOut {
    pub id: i64,
    pub text: String,
    pub author: String,
    pub score: i64,
    pub pub_date: DateTime<Utc>,
}

impl ReviewOut {
    pub fn new(review: Review, author: String) -> Self {
        Self {
            id: review.id,
            text: review.text,
            author,
            score: review.score,
            pub_date: review.pub_date,
        }
    }
}

/// Resolve the target title and, on create, reject a second review by the same author
pub async fn validate_review(
    store: &Store,
    operation: Operation,
    title_id: i64,
    author_id: i64,
) -> ApiResult<Title> {
    let title = find_title(store, title_id).await?;

    if operation == Operation::Create
        && store
            .reviews
            .exists(&|r: &Review| r.title_id == title_id && r.author_id == author_id)
            .await?
    {
        tracing::debug!(title_id, author_id, "Duplicate review rejected");
        return Err(ValidationError::DuplicateReview.into());
    }

    Ok(title)
}

/// Look a review up under its title, or 404
pub async fn find_review(store: &Store, title_id: i64, review_id: i64) -> ApiResult<Review> {
    find_title(store, title_id).await?;
    store
        .reviews
        .get(review_id)
        .await?
        .filter(|r| r.title_id == title_id)
        .ok_or_else(|| ApiError::not_found("review", review_id))
}

/// Render reviews with their authors' usernames
pub async fn render(store: &Store, reviews: Vec<Review>) -> ApiResult<Vec<ReviewOut>> {
    let names = usernames(store, reviews.iter().map(|r| r.author_id)).await?;
    Ok(reviews
        .into_iter()
        .map(|r| {
            let author = names.get(&r.author_id).cloned().unwrap_or_default();
            ReviewOut::new(r, author)
        })
        .collect())
}
