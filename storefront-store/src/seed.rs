use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use storefront_catalog::{BrandDraft, CategoryDraft, ProductDraft};
use storefront_core::repository::{BrandRepository, CategoryRepository, ProductRepository, StoreError};
use tracing::info;
use uuid::Uuid;

fn default_true() -> bool { true }

/// Catalog document loaded at startup. Products refer to categories and brands by slug.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct CatalogSeed {
    #[serde(default)]
    pub categories: Vec<CategoryDraft>,
    #[serde(default)]
    pub brands: Vec<BrandDraft>,
    #[serde(default)]
    pub products: Vec<SeedProduct>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedProduct {
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    pub category: String,
    pub brand: String,
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

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub categories: usize,
    pub brands: usize,
    pub products: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Failed to read seed file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed seed document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Unknown category slug: {0}")]
    UnknownCategory(String),

    #[error("Unknown brand slug: {0}")]
    UnknownBrand(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl CatalogSeed {
    pub fn from_json(json: &str) -> Result<Self, SeedError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SeedError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// Create every record through the repositories. Slugs may also point at
    /// categories and brands that already exist.
    pub async fn load_into(
        &self,
        categories: &dyn CategoryRepository,
        brands: &dyn BrandRepository,
        products: &dyn ProductRepository,
    ) -> Result<SeedSummary, SeedError> {
        let mut summary = SeedSummary::default();

        for draft in &self.categories {
            categories.create(draft.clone()).await?;
            summary.categories += 1;
        }
        for draft in &self.brands {
            brands.create(draft.clone()).await?;
            summary.brands += 1;
        }

        // Resolve slugs against everything stored, not just this document
        let category_ids: HashMap<String, Uuid> =
            categories.list().await?.into_iter().map(|c| (c.slug, c.id)).collect();
        let brand_ids: HashMap<String, Uuid> = brands.list().await?.into_iter().map(|b| (b.slug, b.id)).collect();

        for seed in &self.products {
            let category_id = *category_ids
                .get(&seed.category)
                .ok_or_else(|| SeedError::UnknownCategory(seed.category.clone()))?;
            let brand_id = *brand_ids
                .get(&seed.brand)
                .ok_or_else(|| SeedError::UnknownBrand(seed.brand.clone()))?;

            products
                .create(ProductDraft {
                    category_id,
                    brand_id,
                    name: seed.name.clone(),
                    slug: seed.slug.clone(),
                    description: seed.description.clone(),
                    price: seed.price,
                    in_stock: seed.in_stock,
                    is_active: seed.is_active,
                    is_featured: seed.is_featured,
                    on_sale: seed.on_sale,
                })
                .await?;
            summary.products += 1;
        }

        info!(
            "Catalog seeded: {} categories, {} brands, {} products",
            summary.categories, summary.brands, summary.products
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;
    use rust_decimal_macros::dec;

    const SEED: &str = r#"{
        "categories": [{ "name": "Men's Shoes" }, { "name": "Lamps", "is_active": false }],
        "brands": [{ "name": "Acme" }],
        "products": [
            { "name": "Trail Runner", "category": "mens-shoes", "brand": "acme", "price": "499.00" },
            { "name": "Desk Lamp", "category": "lamps", "brand": "acme", "price": "250.50", "on_sale": true },
            { "name": "Gift Wrap", "category": "lamps", "brand": "acme" }
        ]
    }"#;

    #[tokio::test]
    async fn test_load_seed() {
        let store = MemoryStore::new();
        let seed = CatalogSeed::from_json(SEED).unwrap();

        let summary = seed
            .load_into(&store.categories(), &store.brands(), &store.products())
            .await
            .unwrap();
        assert_eq!(summary, SeedSummary { categories: 2, brands: 1, products: 3 });

        let lamp = store.products().get_by_slug("desk-lamp").await.unwrap().unwrap();
        assert_eq!(lamp.price, Some(dec!(250.50)));
        assert!(lamp.on_sale);

        let wrap = store.products().get_by_slug("gift-wrap").await.unwrap().unwrap();
        assert_eq!(wrap.price, None);
    }

    #[tokio::test]
    async fn test_unknown_category() {
        let store = MemoryStore::new();
        let seed = CatalogSeed::from_json(
            r#"{ "brands": [{ "name": "Acme" }],
                 "products": [{ "name": "Orphan", "category": "nowhere", "brand": "acme" }] }"#,
        )
        .unwrap();

        let result = seed
            .load_into(&store.categories(), &store.brands(), &store.products())
            .await;
        assert!(matches!(result, Err(SeedError::UnknownCategory(slug)) if slug == "nowhere"));
    }

    #[test]
    fn test_malformed_seed() {
        assert!(matches!(CatalogSeed::from_json("{ not json"), Err(SeedError::Parse(_))));
    }
}
