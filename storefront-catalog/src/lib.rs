pub mod category;
pub mod product;
pub mod catalog;

pub use category::{Brand, BrandDraft, Category, CategoryDraft, CategoryPatch};
pub use product::{Product, ProductDraft, ProductPatch};
pub use catalog::{CatalogEntry, InMemoryCatalog, ProductCatalog};

/// Catalog-related errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("Product not found: {0}")]
    NotFound(String),

    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Maximum length of any stored slug
pub const SLUG_MAX_LEN: usize = 255;

/// Check a required display name against its length limit
pub(crate) fn validate_name(field: &str, name: &str, max_len: usize) -> Result<(), CatalogError> {
    if name.trim().is_empty() {
        return Err(CatalogError::Validation(format!("{} is required", field)));
    }
    if name.chars().count() > max_len {
        return Err(CatalogError::Validation(format!(
            "{} may not be longer than {} characters",
            field, max_len
        )));
    }
    Ok(())
}

/// Slug for a new record: the explicit one when auto-derivation is off,
/// otherwise derived from the name.
pub(crate) fn resolve_slug(name: &str, explicit: Option<&str>) -> Result<String, CatalogError> {
    let slug = match explicit {
        Some(slug) => {
            if !storefront_shared::is_slug(slug) {
                return Err(CatalogError::Validation(format!("Invalid slug: {:?}", slug)));
            }
            slug.to_string()
        }
        None => storefront_shared::derive_slug(name),
    };

    if slug.is_empty() {
        return Err(CatalogError::Validation("slug is required".to_string()));
    }
    if slug.len() > SLUG_MAX_LEN {
        return Err(CatalogError::Validation(format!(
            "slug may not be longer than {} characters",
            SLUG_MAX_LEN
        )));
    }
    Ok(slug)
}
