//! Comment record

use crate::impl_record;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A comment on a review
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub review_id: i64,
    pub author_id: i64,
    pub text: String,
    pub pub_date: DateTime<Utc>,
}

impl Comment {
    pub fn new(review_id: i64, author_id: i64, text: String) -> Self {
        Self {
            id: 0,
            review_id,
            author_id,
            text,
            pub_date: Utc::now(),
        }
    }
}

impl_record!(Comment, "comment");
