use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{resolve_slug, validate_name, CatalogError};

pub const PRODUCT_NAME_MAX_LEN: usize = 255;

fn default_true() -> bool { true }

/// Core product structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: Uuid,
    pub category_id: Uuid,
    pub brand_id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    /// Unit price in the store currency; `None` prices at zero
    pub price: Option<Decimal>,
    pub in_stock: bool,
    pub is_active: bool,
    pub is_featured: bool,
    pub on_sale: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a product
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductDraft {
    pub category_id: Uuid,
    pub brand_id: Uuid,
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default = "default_true")]
    pub in_stock: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub on_sale: bool,
}

impl ProductDraft {
    pub fn new(category_id: Uuid, brand_id: Uuid, name: impl Into<String>, price: Decimal) -> Self {
        Self {
            category_id,
            brand_id,
            name: name.into(),
            slug: None,
            description: None,
            price: Some(price),
            in_stock: true,
            is_active: true,
            is_featured: false,
            on_sale: false,
        }
    }
}

/// Partial update for a product. Renaming never touches the slug.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductPatch {
    pub category_id: Option<Uuid>,
    pub brand_id: Option<Uuid>,
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<Option<String>>,
    pub price: Option<Option<Decimal>>,
    pub in_stock: Option<bool>,
    pub is_active: Option<bool>,
    pub is_featured: Option<bool>,
    pub on_sale: Option<bool>,
}

fn validate_price(price: Option<Decimal>) -> Result<(), CatalogError> {
    match price {
        Some(p) if p.is_sign_negative() && !p.is_zero() => Err(CatalogError::Validation(format!(
            "price may not be negative: {}",
            p
        ))),
        _ => Ok(()),
    }
}

impl Product {
    pub fn create(draft: ProductDraft) -> Result<Self, CatalogError> {
        validate_name("Product name", &draft.name, PRODUCT_NAME_MAX_LEN)?;
        validate_price(draft.price)?;
        let slug = resolve_slug(&draft.name, draft.slug.as_deref())?;
        let now = Utc::now();

        Ok(Self {
            id: Uuid::new_v4(),
            category_id: draft.category_id,
            brand_id: draft.brand_id,
            name: draft.name.trim().to_string(),
            slug,
            description: draft.description,
            price: draft.price,
            in_stock: draft.in_stock,
            is_active: draft.is_active,
            is_featured: draft.is_featured,
            on_sale: draft.on_sale,
            created_at: now,
            updated_at: now,
        })
    }

    /// Apply a patch atomically: either every field is updated or none is
    pub fn apply(&mut self, patch: ProductPatch) -> Result<(), CatalogError> {
        if let Some(name) = &patch.name {
            validate_name("Product name", name, PRODUCT_NAME_MAX_LEN)?;
        }
        if let Some(price) = patch.price {
            validate_price(price)?;
        }
        let slug = match &patch.slug {
            Some(slug) => Some(resolve_slug(&self.name, Some(slug))?),
            None => None,
        };

        if let Some(category_id) = patch.category_id {
            self.category_id = category_id;
        }
        if let Some(brand_id) = patch.brand_id {
            self.brand_id = brand_id;
        }
        if let Some(name) = patch.name {
            self.name = name.trim().to_string();
        }
        if let Some(slug) = slug {
            self.slug = slug;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(in_stock) = patch.in_stock {
            self.in_stock = in_stock;
        }
        if let Some(is_active) = patch.is_active {
            self.is_active = is_active;
        }
        if let Some(is_featured) = patch.is_featured {
            self.is_featured = is_featured;
        }
        if let Some(on_sale) = patch.on_sale {
            self.on_sale = on_sale;
        }
        self.updated_at = Utc::now();
        Ok(())
    }
}
