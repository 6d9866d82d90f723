//! Title DTOs: slugs on the way in, nested objects on the way out

use super::model::Title;
use crate::core::error::{ApiError, ApiResult};
use crate::core::store::Store;
use crate::core::validation::validators::{check_year, not_blank};
use crate::entities::taxonomy::{Category, Genre, TaxonOut, resolve_slug};
use crate::entities::Review;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Title creation payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TitleWrite {
    #[validate(
        required(message = "Обязательное поле."),
        length(min = 1, max = 256, message = "Длина названия должна быть от 1 до 256 символов."),
        custom(function = "not_blank")
    )]
    pub name: Option<String>,

    #[validate(required(message = "Обязательное поле."))]
    pub year: Option<i32>,

    pub description: Option<String>,

    /// Category slug
    #[validate(required(message = "Обязательное поле."))]
    pub category: Option<String>,

    /// Genre slugs
    #[validate(required(message = "Обязательное поле."))]
    pub genre: Option<Vec<String>>,
}

/// Partial title update; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct TitlePatch {
    #[validate(
        length(min = 1, max = 256, message = "Длина названия должна быть от 1 до 256 символов."),
        custom(function = "not_blank")
    )]
    pub name: Option<String>,

    pub year: Option<i32>,

    /// `Some(None)` when the client sends `null`, which clears the field
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,

    pub category: Option<String>,

    pub genre: Option<Vec<String>>,
}

/// Tell an explicit `null` apart from an absent key
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Title as returned to clients
#[derive(Debug, Clone, Serialize)]
pub struct TitleRead {
    pub id: i64,
    pub name: String,
    pub year: i32,
    pub description: Option<String>,
    pub category: Option<TaxonOut>,
    pub genre: Vec<TaxonOut>,
    pub rating: Option<i64>,
}

/// Resolve genre slugs in request order, ignoring repeats
async fn resolve_genres(store: &Store, slugs: &[String]) -> ApiResult<Vec<i64>> {
    let mut ids = Vec::with_capacity(slugs.len());
    for slug in slugs {
        let genre: Genre = resolve_slug(store, "genre", slug).await?;
        if !ids.contains(&genre.id) {
            ids.push(genre.id);
        }
    }
    Ok(ids)
}

impl TitleWrite {
    /// Resolve slugs and build the record to store
    pub async fn into_title(self, store: &Store) -> ApiResult<Title> {
        let year = self.year.unwrap_or_default();
        check_year(year)?;

        let category: Category =
            resolve_slug(store, "category", &self.category.unwrap_or_default()).await?;
        let genre_ids = resolve_genres(store, &self.genre.unwrap_or_default()).await?;

        Ok(Title {
            id: 0,
            name: self.name.unwrap_or_default().trim().to_string(),
            year,
            description: self.description,
            category_id: Some(category.id),
            genre_ids,
        })
    }
}

impl TitlePatch {
    pub async fn apply(self, store: &Store, mut title: Title) -> ApiResult<Title> {
        if let Some(year) = self.year {
            check_year(year)?;
            title.year = year;
        }
        if let Some(slug) = self.category {
            let category: Category = resolve_slug(store, "category", &slug).await?;
            title.category_id = Some(category.id);
        }
        if let Some(slugs) = self.genre {
            title.genre_ids = resolve_genres(store, &slugs).await?;
        }
        if let Some(name) = self.name {
            title.name = name.trim().to_string();
        }
        if let Some(description) = self.description {
            title.description = description;
        }
        Ok(title)
    }
}

/// Integer part of the mean score, `None` without scores
pub fn rating(scores: &[i64]) -> Option<i64> {
    if scores.is_empty() {
        return None;
    }
    let sum: i64 = scores.iter().sum();
    Some(sum / scores.len() as i64)
}

/// Build the read representation of a title
pub async fn to_read(store: &Store, title: Title) -> ApiResult<TitleRead> {
    let category = match title.category_id {
        Some(id) => store.categories.get(id).await?,
        None => None,
    };

    let mut genres = store
        .genres
        .find(&|g: &Genre| title.genre_ids.contains(&g.id))
        .await?;
    genres.sort_by_key(|g| title.genre_ids.iter().position(|id| *id == g.id));

    let title_id = title.id;
    let scores: Vec<i64> = store
        .reviews
        .find(&|r: &Review| r.title_id == title_id)
        .await?
        .into_iter()
        .map(|r| r.score)
        .collect();

    Ok(TitleRead {
        id: title.id,
        name: title.name,
        year: title.year,
        description: title.description,
        category: category.as_ref().map(TaxonOut::from_taxon),
        genre: genres.iter().map(TaxonOut::from_taxon).collect(),
        rating: rating(&scores),
    })
}

/// Look a title up by id, or 404
pub async fn find_title(store: &Store, title_id: i64) -> ApiResult<Title> {
    store
        .titles
        .get(title_id)
        .await?
        .ok_or_else(|| ApiError::not_found("title", title_id))
}
