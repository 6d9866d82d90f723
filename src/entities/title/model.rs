//! Title record

use crate::impl_record;
use serde::{Deserialize, Serialize};

/// A work that can be reviewed
///
/// Category and genres are stored as ids; the wire format refers to them by slug.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Title {
    pub id: i64,
    pub name: String,
    pub year: i32,
    pub description: Option<String>,
    pub category_id: Option<i64>,
    pub genre_ids: Vec<i64>,
}

impl_record!(Title, "title");
