//! Comment DTOs
//!
//! Only `text` is client-settable; the review comes from the URL.

use super::model::Comment;
use crate::core::error::ApiResult;
use crate::core::store::Store;
use crate::core::validation::validators::not_blank;
use crate::entities::review::{Review, find_review};
use crate::entities::user::handlers::usernames;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CommentCreate {
    #[validate(
        required(message = "Обязательное поле."),
        length(min = 1, message = "Текст комментария не может быть пустым."),
        custom(function = "not_blank")
    )]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CommentPatch {
    #[validate(
        length(min = 1, message = "Текст комментария не может быть пустым."),
        custom(function = "not_blank")
    )]
    pub text: Option<String>,
}

impl CommentPatch {
    pub fn apply(self, mut comment: Comment) -> Comment {
        if let Some(text) = self.text {
            comment.text = text.trim().to_string();
        }
        comment
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CommentOut {
    pub id: i64,
    pub text: String,
    pub author: String,
    pub pub_date: DateTime<Utc>,
}

/// The review a comment hangs off; it must exist and belong to the title
pub async fn resolve_review(store: &Store, title_id: i64, review_id: i64) -> ApiResult<Review> {
    find_review(store, title_id, review_id).await
}

/// Render comments with their authors' usernames
pub async fn render(store: &Store, comments: Vec<Comment>) -> ApiResult<Vec<CommentOut>> {
    let names = usernames(store, comments.iter().map(|c| c.author_id)).await?;
    Ok(comments
        .into_iter()
        .map(|c| CommentOut {
            author: names.get(&c.author_id).cloned().unwrap_or_default(),
            id: c.id,
            text: c.text,
            pub_date: c.pub_date,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Title, User};

    #[test]
    fn test_text_required() {
        assert!(CommentCreate { text: None }.validate().is_err());
        assert!(CommentCreate { text: Some(String::new()) }.validate().is_err());
        assert!(CommentCreate { text: Some("  ".into()) }.validate().is_err());
        assert!(CommentCreate { text: Some("Agreed".into()) }.validate().is_ok());
        assert!(CommentPatch { text: Some(" \t ".into()) }.validate().is_err());
    }

    #[tokio::test]
    async fn test_render_uses_username() {
        let store = Store::in_memory();
        let user = store.users.create(User::new("alice", "a@example.com")).await.unwrap();
        let title = store
            .titles
            .create(Title {
                id: 0,
                name: "Stalker".into(),
                year: 1979,
                description: None,
                category_id: None,
                genre_ids: vec![],
            })
            .await
            .unwrap();
        let review = store
            .reviews
            .create(Review::new(title.id, user.id, "Slow".into(), 8))
            .await
            .unwrap();

        assert!(resolve_review(&store, title.id, review.id).await.is_ok());
        assert!(resolve_review(&store, title.id, review.id + 1).await.is_err());

        let comment = store
            .comments
            .create(Comment::new(review.id, user.id, "Agreed".into()))
            .await
            .unwrap();
        let out = render(&store, vec![comment]).await.unwrap();
        assert_eq!(out[0].author, "alice");
        assert_eq!(out[0].text, "Agreed");
    }
}
