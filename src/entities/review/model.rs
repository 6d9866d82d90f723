//! Review record

use crate::core::entity::{Record, UniqueKey};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A scored review of a title
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: i64,
    pub title_id: i64,
    pub author_id: i64,
    pub text: String,
    pub score: i64,
    pub pub_date: DateTime<Utc>,
}

impl Review {
    pub fn new(title_id: i64, author_id: i64, text: String, score: i64) -> Self {
        Self {
            id: 0,
            title_id,
            author_id,
            text,
            score,
            pub_date: Utc::now(),
        }
    }
}

impl Record for Review {
    const KIND: &'static str = "review";

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    // One review per (author, title)
    fn unique_keys(&self) -> Vec<UniqueKey> {
        vec![UniqueKey::new(
            "author_title",
            format!("{}:{}", self.author_id, self.title_id),
        )]
    }
}
