//! Category / Genre DTOs
//!
//! The internal id never leaves the service: the wire shape is `{name, slug}`.

use super::model::Taxon;
use crate::core::error::{ApiError, ApiResult, ValidationError};
use crate::core::store::Store;
use crate::core::validation::SLUG_RE;
use crate::core::validation::validators::not_blank;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Wire representation of a category or genre
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonOut {
    pub name: String,
    pub slug: String,
}

impl TaxonOut {
    pub fn from_taxon<T: Taxon>(taxon: &T) -> Self {
        Self {
            name: taxon.name().to_string(),
            slug: taxon.slug().to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TaxonCreate {
    #[validate(
        required(message = "Обязательное поле."),
        length(min = 1, max = 256, message = "Длина названия должна быть от 1 до 256 символов."),
        custom(function = "not_blank")
    )]
    pub name: Option<String>,

    #[validate(
        required(message = "Обязательное поле."),
        length(min = 1, max = 50, message = "Длина slug должна быть от 1 до 50 символов."),
        regex(path = *SLUG_RE, message = "Slug может содержать только латинские буквы, цифры, дефис и подчёркивание.")
    )]
    pub slug: Option<String>,
}

impl TaxonCreate {
    pub fn into_taxon<T: Taxon>(self) -> T {
        T::new(
            self.name.unwrap_or_default().trim().to_string(),
            self.slug.unwrap_or_default(),
        )
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct TaxonPatch {
    #[validate(
        length(min = 1, max = 256, message = "Длина названия должна быть от 1 до 256 символов."),
        custom(function = "not_blank")
    )]
    pub name: Option<String>,

    #[validate(
        length(min = 1, max = 50, message = "Длина slug должна быть от 1 до 50 символов."),
        regex(path = *SLUG_RE, message = "Slug может содержать только латинские буквы, цифры, дефис и подчёркивание.")
    )]
    pub slug: Option<String>,
}

impl TaxonPatch {
    pub fn apply<T: Taxon>(self, mut taxon: T) -> T {
        if let Some(name) = self.name {
            taxon.set_name(name.trim().to_string());
        }
        if let Some(slug) = self.slug {
            taxon.set_slug(slug);
        }
        taxon
    }
}

/// Look a taxon up by its slug in a URL path, or 404
pub async fn find_by_slug<T: Taxon>(store: &Store, slug: &str) -> ApiResult<T> {
    T::repository(store)
        .find_one(&|t: &T| t.slug() == slug)
        .await?
        .ok_or_else(|| ApiError::not_found(T::KIND, slug))
}

/// Resolve a slug reference in a request body; unknown slugs are a validation error
pub async fn resolve_slug<T: Taxon>(store: &Store, field: &'static str, slug: &str) -> ApiResult<T> {
    T::repository(store)
        .find_one(&|t: &T| t.slug() == slug)
        .await?
        .ok_or_else(|| {
            ApiError::Validation(ValidationError::UnknownSlug {
                field,
                slug: slug.to_string(),
            })
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Category, Genre};

    #[test]
    fn test_create_rules() {
        let ok = TaxonCreate {
            name: Some("Фильмы".into()),
            slug: Some("films".into()),
        };
        assert!(ok.validate().is_ok());

        let bad_slug = TaxonCreate {
            name: Some("Films".into()),
            slug: Some("no spaces".into()),
        };
        assert!(bad_slug.validate().is_err());

        let long_slug = TaxonCreate {
            name: Some("Films".into()),
            slug: Some("a".repeat(51)),
        };
        assert!(long_slug.validate().is_err());

        let missing = TaxonCreate {
            name: None,
            slug: Some("films".into()),
        };
        assert!(missing.validate().is_err());

        let blank = TaxonCreate {
            name: Some("   ".into()),
            slug: Some("films".into()),
        };
        assert!(blank.validate().is_err());
    }

    #[test]
    fn test_output_hides_id() {
        let genre: Genre = TaxonCreate {
            name: Some("Drama".into()),
            slug: Some("drama".into()),
        }
        .into_taxon();

        let value = serde_json::to_value(TaxonOut::from_taxon(&genre)).unwrap();
        assert_eq!(value, serde_json::json!({"name": "Drama", "slug": "drama"}));
    }

    #[tokio::test]
    async fn test_resolve_slug_unknown_is_validation_error() {
        let store = Store::in_memory();
        store
            .categories
            .create(Category::new("Films".into(), "films".into()))
            .await
            .unwrap();

        let found: Category = resolve_slug(&store, "category", "films").await.unwrap();
        assert_eq!(found.name, "Films");

        let err = resolve_slug::<Category>(&store, "category", "books")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ApiError::Validation(ValidationError::UnknownSlug { .. })
        ));

        let err = find_by_slug::<Genre>(&store, "books").await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound { .. }));
    }

    #[test]
    fn test_patch_applies_present_fields() {
        let category = Category::new("Films".into(), "films".into());
        let patched = TaxonPatch {
            name: Some("Movies".into()),
            slug: None,
        }
        .apply(category);
        assert_eq!(patched.name, "Movies");
        assert_eq!(patched.slug, "films");
    }
}
