//! Reusable field rules
//!
//! Patterns for the `validator` derive and the handful of rules that need
//! runtime context (current year, reserved usernames).

use crate::core::error::{FieldValidationError, ValidationError};
use chrono::{Datelike, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::sync::LazyLock;

/// Allowed username characters: word characters plus `.@+-`
pub static USERNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w.@+-]+$").expect("username pattern is valid"));

/// Allowed slug characters
pub static SLUG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-a-zA-Z0-9_]+$").expect("slug pattern is valid"));

/// Username that would shadow the `/users/me` route
pub const RESERVED_USERNAME: &str = "me";

/// How the profile endpoint tests for the reserved username
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReservedNameCheck {
    /// `username == "me"`
    #[default]
    Exact,

    /// `username` is a substring of `"me"`, which also rejects `"m"` and `"e"`.
    /// Kept for deployments that depend on the historical behaviour.
    LegacySubstring,
}

impl ReservedNameCheck {
    pub fn is_reserved(&self, username: &str) -> bool {
        match self {
            ReservedNameCheck::Exact => is_reserved_username(username),
            ReservedNameCheck::LegacySubstring => RESERVED_USERNAME.contains(username),
        }
    }
}

pub fn is_reserved_username(username: &str) -> bool {
    username == RESERVED_USERNAME
}

/// Reject text made of whitespace only; `length(min = 1)` alone lets `"   "` through
pub fn not_blank(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        Err(validator::ValidationError::new("blank")
            .with_message(Cow::Borrowed("Это поле не может быть пустым.")))
    } else {
        Ok(())
    }
}

/// Reject years later than the current one
pub fn check_year(year: i32) -> Result<(), ValidationError> {
    let current = Utc::now().year();
    if year > current {
        Err(ValidationError::Fields(vec![FieldValidationError::new(
            "year",
            format!("Год выпуска не может быть больше текущего ({})", current),
        )]))
    } else {
        Ok(())
    }
}
