pub mod app_config;
pub mod catalog_repo;
pub mod order_repo;
pub mod seed;

use std::collections::HashMap;
use std::sync::Arc;

use storefront_catalog::{Brand, Category, Product};
use storefront_order::Order;
use tokio::sync::RwLock;
use uuid::Uuid;

pub use catalog_repo::{MemoryBrandRepository, MemoryCategoryRepository, MemoryProductRepository};
pub use order_repo::MemoryOrderRepository;
pub use seed::{CatalogSeed, SeedError, SeedSummary};

/// All records, kept together so cross-table constraints see one consistent view
#[derive(Debug, Default)]
pub(crate) struct Tables {
    pub(crate) categories: HashMap<Uuid, Category>,
    pub(crate) brands: HashMap<Uuid, Brand>,
    pub(crate) products: HashMap<Uuid, Product>,
    pub(crate) orders: HashMap<Uuid, Order>,
}

/// In-memory persistence. Repository handles share the same tables.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn categories(&self) -> MemoryCategoryRepository {
        MemoryCategoryRepository::new(self.tables.clone())
    }

    pub fn brands(&self) -> MemoryBrandRepository {
        MemoryBrandRepository::new(self.tables.clone())
    }

    pub fn products(&self) -> MemoryProductRepository {
        MemoryProductRepository::new(self.tables.clone())
    }

    pub fn orders(&self) -> MemoryOrderRepository {
        MemoryOrderRepository::new(self.tables.clone())
    }
}
