use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{resolve_slug, validate_name, CatalogError};

pub const CATEGORY_NAME_MAX_LEN: usize = 55;
pub const BRAND_NAME_MAX_LEN: usize = 255;

fn default_active() -> bool { true }

/// Product category shown in the storefront navigation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a category. Leave `slug` empty to derive it from the name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryDraft {
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl CategoryDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slug: None,
            is_active: true,
        }
    }

    /// Disable slug auto-derivation and use `slug` as given
    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }
}

/// Partial update. Renaming never touches the slug.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub is_active: Option<bool>,
}

impl Category {
    pub fn create(draft: CategoryDraft) -> Result<Self, CatalogError> {
        validate_name("Category name", &draft.name, CATEGORY_NAME_MAX_LEN)?;
        let slug = resolve_slug(&draft.name, draft.slug.as_deref())?;
        let now = Utc::now();

        Ok(Self {
            id: Uuid::new_v4(),
            name: draft.name.trim().to_string(),
            slug,
            is_active: draft.is_active,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn apply(&mut self, patch: CategoryPatch) -> Result<(), CatalogError> {
        if let Some(name) = &patch.name {
            validate_name("Category name", name, CATEGORY_NAME_MAX_LEN)?;
        }
        let slug = match &patch.slug {
            Some(slug) => Some(resolve_slug(&self.name, Some(slug))?),
            None => None,
        };

        if let Some(name) = patch.name {
            self.name = name.trim().to_string();
        }
        if let Some(slug) = slug {
            self.slug = slug;
        }
        if let Some(is_active) = patch.is_active {
            self.is_active = is_active;
        }
        self.updated_at = Utc::now();
        Ok(())
    }
}

/// Manufacturer a product is filed under
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Brand {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrandDraft {
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl BrandDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slug: None,
            is_active: true,
        }
    }
}

impl Brand {
    pub fn create(draft: BrandDraft) -> Result<Self, CatalogError> {
        validate_name("Brand name", &draft.name, BRAND_NAME_MAX_LEN)?;
        let slug = resolve_slug(&draft.name, draft.slug.as_deref())?;
        let now = Utc::now();

        Ok(Self {
            id: Uuid::new_v4(),
            name: draft.name.trim().to_string(),
            slug,
            is_active: draft.is_active,
            created_at: now,
            updated_at: now,
        })
    }
}
