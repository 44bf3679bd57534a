use async_trait::async_trait;
use storefront_catalog::{
    Brand, BrandDraft, CatalogError, Category, CategoryDraft, CategoryPatch, Product, ProductDraft, ProductPatch,
};
use storefront_order::{Order, OrderTab};
use uuid::Uuid;

/// Persistence failures: missing rows, uniqueness and foreign-key violations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Slug already taken: {0}")]
    DuplicateSlug(String),

    #[error("Referenced {entity} does not exist: {id}")]
    MissingReference { entity: &'static str, id: Uuid },

    #[error("{entity} {id} is still referenced by {dependents} record(s)")]
    StillReferenced { entity: &'static str, id: Uuid, dependents: usize },

    #[error("Validation failed: {0}")]
    Validation(String),
}

impl From<CatalogError> for StoreError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound(id) => StoreError::NotFound { entity: "Product", id },
            CatalogError::Validation(msg) => StoreError::Validation(msg),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Repository trait for categories
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn create(&self, draft: CategoryDraft) -> StoreResult<Category>;

    async fn get(&self, id: Uuid) -> StoreResult<Option<Category>>;

    async fn update(&self, id: Uuid, patch: CategoryPatch) -> StoreResult<Category>;

    async fn delete(&self, id: Uuid) -> StoreResult<()>;

    async fn list(&self) -> StoreResult<Vec<Category>>;
}

/// Repository trait for brands
#[async_trait]
pub trait BrandRepository: Send + Sync {
    async fn create(&self, draft: BrandDraft) -> StoreResult<Brand>;

    async fn get(&self, id: Uuid) -> StoreResult<Option<Brand>>;

    async fn list(&self) -> StoreResult<Vec<Brand>>;
}

/// Narrows a product listing by association
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductFilter {
    pub category_id: Option<Uuid>,
    pub brand_id: Option<Uuid>,
}

impl ProductFilter {
    pub fn matches(&self, product: &Product) -> bool {
        self.category_id.map_or(true, |id| product.category_id == id)
            && self.brand_id.map_or(true, |id| product.brand_id == id)
    }
}

/// Repository trait for product catalog access
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn create(&self, draft: ProductDraft) -> StoreResult<Product>;

    async fn get(&self, id: Uuid) -> StoreResult<Option<Product>>;

    async fn get_by_slug(&self, slug: &str) -> StoreResult<Option<Product>>;

    async fn update(&self, id: Uuid, patch: ProductPatch) -> StoreResult<Product>;

    async fn delete(&self, id: Uuid) -> StoreResult<()>;

    async fn list(&self, filter: ProductFilter) -> StoreResult<Vec<Product>>;
}

/// Repository trait for orders. Lines are owned by their order and go with it.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Insert or replace
    async fn save(&self, order: &Order) -> StoreResult<()>;

    async fn get(&self, id: Uuid) -> StoreResult<Option<Order>>;

    async fn delete(&self, id: Uuid) -> StoreResult<()>;

    /// Orders on a status tab, oldest first
    async fn list(&self, tab: OrderTab) -> StoreResult<Vec<Order>>;

    async fn count(&self) -> StoreResult<usize>;
}
