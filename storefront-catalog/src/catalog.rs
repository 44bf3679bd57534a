use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::{CatalogError, Product};

/// What an order needs to know about a product at selection time
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogEntry {
    pub id: Uuid,
    pub name: String,
    pub price: Option<Decimal>,
}

impl From<&Product> for CatalogEntry {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            price: product.price,
        }
    }
}

/// Product lookup used when pricing order lines
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    /// Fails with `CatalogError::NotFound` when the id does not resolve
    async fn find_by_id(&self, id: &Uuid) -> Result<CatalogEntry, CatalogError>;
}

#[async_trait]
impl<T: ProductCatalog + ?Sized> ProductCatalog for Arc<T> {
    async fn find_by_id(&self, id: &Uuid) -> Result<CatalogEntry, CatalogError> {
        (**self).find_by_id(id).await
    }
}

#[async_trait]
impl<T: ProductCatalog + ?Sized> ProductCatalog for &T {
    async fn find_by_id(&self, id: &Uuid) -> Result<CatalogEntry, CatalogError> {
        (**self).find_by_id(id).await
    }
}

/// HashMap-backed catalog
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    entries: HashMap<Uuid, CatalogEntry>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Register or replace an entry
    pub fn insert(&mut self, entry: CatalogEntry) {
        self.entries.insert(entry.id, entry);
    }

    /// Register a product under a fresh id and return that id
    pub fn add(&mut self, name: impl Into<String>, price: Option<Decimal>) -> Uuid {
        let id = Uuid::new_v4();
        self.insert(CatalogEntry {
            id,
            name: name.into(),
            price,
        });
        id
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<Product> for InMemoryCatalog {
    fn from_iter<I: IntoIterator<Item = Product>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for product in iter {
            catalog.insert(CatalogEntry::from(&product));
        }
        catalog
    }
}

#[async_trait]
impl ProductCatalog for InMemoryCatalog {
    async fn find_by_id(&self, id: &Uuid) -> Result<CatalogEntry, CatalogError> {
        self.entries
            .get(id)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }
}
