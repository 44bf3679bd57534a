pub mod repository;

use storefront_order::ChangeError;

pub use repository::{
    BrandRepository, CategoryRepository, OrderRepository, ProductFilter, ProductRepository, StoreError,
};

/// Errors surfaced to whoever drives the back-office layers
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Change(#[from] ChangeError),
}

pub type CoreResult<T> = Result<T, CoreError>;
