use async_trait::async_trait;
use std::sync::Arc;
use storefront_catalog::{
    Brand, BrandDraft, CatalogEntry, CatalogError, Category, CategoryDraft, CategoryPatch, Product, ProductCatalog,
    ProductDraft, ProductPatch,
};
use storefront_core::repository::{
    BrandRepository, CategoryRepository, ProductFilter, ProductRepository, StoreError, StoreResult,
};
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::Tables;

fn ensure_unique_slug<'a, I>(existing: I, slug: &str, own_id: Option<Uuid>) -> StoreResult<()>
where
    I: IntoIterator<Item = (&'a Uuid, &'a str)>,
{
    let taken = existing
        .into_iter()
        .any(|(id, other)| Some(*id) != own_id && other == slug);
    if taken {
        return Err(StoreError::DuplicateSlug(slug.to_string()));
    }
    Ok(())
}

fn ensure_references(tables: &Tables, category_id: Uuid, brand_id: Uuid) -> StoreResult<()> {
    if !tables.categories.contains_key(&category_id) {
        return Err(StoreError::MissingReference { entity: "Category", id: category_id });
    }
    if !tables.brands.contains_key(&brand_id) {
        return Err(StoreError::MissingReference { entity: "Brand", id: brand_id });
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct MemoryCategoryRepository {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryCategoryRepository {
    pub(crate) fn new(tables: Arc<RwLock<Tables>>) -> Self {
        Self { tables }
    }
}

#[async_trait]
impl CategoryRepository for MemoryCategoryRepository {
    async fn create(&self, draft: CategoryDraft) -> StoreResult<Category> {
        let category = Category::create(draft)?;
        let mut tables = self.tables.write().await;
        ensure_unique_slug(
            tables.categories.iter().map(|(id, c)| (id, c.slug.as_str())),
            &category.slug,
            None,
        )?;

        tables.categories.insert(category.id, category.clone());
        info!("Category created: {} ({})", category.slug, category.id);
        Ok(category)
    }

    async fn get(&self, id: Uuid) -> StoreResult<Option<Category>> {
        Ok(self.tables.read().await.categories.get(&id).cloned())
    }

    async fn update(&self, id: Uuid, patch: CategoryPatch) -> StoreResult<Category> {
        let mut tables = self.tables.write().await;
        let mut category = tables
            .categories
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound { entity: "Category", id: id.to_string() })?;

        // Validate on a copy, the stored row changes only on success
        category.apply(patch)?;
        ensure_unique_slug(
            tables.categories.iter().map(|(id, c)| (id, c.slug.as_str())),
            &category.slug,
            Some(id),
        )?;

        tables.categories.insert(id, category.clone());
        info!("Category updated: {}", id);
        Ok(category)
    }

    async fn delete(&self, id: Uuid) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        if !tables.categories.contains_key(&id) {
            return Err(StoreError::NotFound { entity: "Category", id: id.to_string() });
        }

        // Products keep their category
        let dependents = tables.products.values().filter(|p| p.category_id == id).count();
        if dependents > 0 {
            return Err(StoreError::StillReferenced { entity: "Category", id, dependents });
        }

        tables.categories.remove(&id);
        info!("Category deleted: {}", id);
        Ok(())
    }

    async fn list(&self) -> StoreResult<Vec<Category>> {
        let tables = self.tables.read().await;
        let mut categories: Vec<Category> = tables.categories.values().cloned().collect();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }
}

#[derive(Debug, Clone)]
pub struct MemoryBrandRepository {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryBrandRepository {
    pub(crate) fn new(tables: Arc<RwLock<Tables>>) -> Self {
        Self { tables }
    }
}

#[async_trait]
impl BrandRepository for MemoryBrandRepository {
    async fn create(&self, draft: BrandDraft) -> StoreResult<Brand> {
        let brand = Brand::create(draft)?;
        let mut tables = self.tables.write().await;
        ensure_unique_slug(tables.brands.iter().map(|(id, b)| (id, b.slug.as_str())), &brand.slug, None)?;

        tables.brands.insert(brand.id, brand.clone());
        info!("Brand created: {} ({})", brand.slug, brand.id);
        Ok(brand)
    }

    async fn get(&self, id: Uuid) -> StoreResult<Option<Brand>> {
        Ok(self.tables.read().await.brands.get(&id).cloned())
    }

    async fn list(&self) -> StoreResult<Vec<Brand>> {
        let tables = self.tables.read().await;
        let mut brands: Vec<Brand> = tables.brands.values().cloned().collect();
        brands.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(brands)
    }
}

/// Product table; also serves as the catalog orders are priced from
#[derive(Debug, Clone)]
pub struct MemoryProductRepository {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryProductRepository {
    pub(crate) fn new(tables: Arc<RwLock<Tables>>) -> Self {
        Self { tables }
    }
}

#[async_trait]
impl ProductRepository for MemoryProductRepository {
    async fn create(&self, draft: ProductDraft) -> StoreResult<Product> {
        let product = Product::create(draft)?;
        let mut tables = self.tables.write().await;
        // Check foreign keys
        ensure_references(&tables, product.category_id, product.brand_id)?;
        ensure_unique_slug(
            tables.products.iter().map(|(id, p)| (id, p.slug.as_str())),
            &product.slug,
            None,
        )?;

        tables.products.insert(product.id, product.clone());
        info!("Product created: {} ({})", product.slug, product.id);
        Ok(product)
    }

    async fn get(&self, id: Uuid) -> StoreResult<Option<Product>> {
        Ok(self.tables.read().await.products.get(&id).cloned())
    }

    async fn get_by_slug(&self, slug: &str) -> StoreResult<Option<Product>> {
        let tables = self.tables.read().await;
        Ok(tables.products.values().find(|p| p.slug == slug).cloned())
    }

    async fn update(&self, id: Uuid, patch: ProductPatch) -> StoreResult<Product> {
        let mut tables = self.tables.write().await;
        let mut product = tables
            .products
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound { entity: "Product", id: id.to_string() })?;

        product.apply(patch)?;
        ensure_references(&tables, product.category_id, product.brand_id)?;
        ensure_unique_slug(
            tables.products.iter().map(|(id, p)| (id, p.slug.as_str())),
            &product.slug,
            Some(id),
        )?;

        tables.products.insert(id, product.clone());
        info!("Product updated: {}", id);
        Ok(product)
    }

    async fn delete(&self, id: Uuid) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        if !tables.products.contains_key(&id) {
            return Err(StoreError::NotFound { entity: "Product", id: id.to_string() });
        }

        // Ordered products stay until the orders go
        let dependents = tables
            .orders
            .values()
            .flat_map(|o| o.lines())
            .filter(|l| l.product_id() == Some(id))
            .count();
        if dependents > 0 {
            return Err(StoreError::StillReferenced { entity: "Product", id, dependents });
        }

        tables.products.remove(&id);
        info!("Product deleted: {}", id);
        Ok(())
    }

    async fn list(&self, filter: ProductFilter) -> StoreResult<Vec<Product>> {
        let tables = self.tables.read().await;
        let mut products: Vec<Product> = tables.products.values().filter(|p| filter.matches(p)).cloned().collect();
        products.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(products)
    }
}

#[async_trait]
impl ProductCatalog for MemoryProductRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<CatalogEntry, CatalogError> {
        let tables = self.tables.read().await;
        tables
            .products
            .get(id)
            .map(CatalogEntry::from)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;
    use rust_decimal_macros::dec;

    async fn seeded() -> (MemoryStore, Category, Brand) {
        let store = MemoryStore::new();
        let category = store.categories().create(CategoryDraft::new("Men's Shoes")).await.unwrap();
        let brand = store.brands().create(BrandDraft::new("Acme")).await.unwrap();
        (store, category, brand)
    }

    #[tokio::test]
    async fn test_duplicate_category_slug_rejected() {
        let (store, _, _) = seeded().await;

        let result = store.categories().create(CategoryDraft::new("Mens Shoes")).await;
        assert_eq!(result, Err(StoreError::DuplicateSlug("mens-shoes".to_string())));
    }

    #[tokio::test]
    async fn test_product_requires_existing_references() {
        let (store, category, _) = seeded().await;
        let missing_brand = Uuid::new_v4();

        let result = store
            .products()
            .create(ProductDraft::new(category.id, missing_brand, "Runner", dec!(10)))
            .await;
        assert_eq!(result, Err(StoreError::MissingReference { entity: "Brand", id: missing_brand }));
    }

    #[tokio::test]
    async fn test_product_slug_unique_on_update() {
        let (store, category, brand) = seeded().await;
        let products = store.products();
        products
            .create(ProductDraft::new(category.id, brand.id, "Runner", dec!(10)))
            .await
            .unwrap();
        let other = products
            .create(ProductDraft::new(category.id, brand.id, "Walker", dec!(20)))
            .await
            .unwrap();

        let result = products
            .update(other.id, ProductPatch { slug: Some("runner".to_string()), ..Default::default() })
            .await;
        assert_eq!(result, Err(StoreError::DuplicateSlug("runner".to_string())));
        assert_eq!(products.get(other.id).await.unwrap().unwrap().slug, "walker");
    }

    #[tokio::test]
    async fn test_category_with_products_cannot_be_deleted() {
        let (store, category, brand) = seeded().await;
        let product = store
            .products()
            .create(ProductDraft::new(category.id, brand.id, "Runner", dec!(10)))
            .await
            .unwrap();

        let result = store.categories().delete(category.id).await;
        assert!(matches!(result, Err(StoreError::StillReferenced { dependents: 1, .. })));

        store.products().delete(product.id).await.unwrap();
        store.categories().delete(category.id).await.unwrap();
        assert!(store.categories().get(category.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_filters_by_category() {
        let (store, shoes, brand) = seeded().await;
        let lamps = store.categories().create(CategoryDraft::new("Lamps")).await.unwrap();
        let products = store.products();
        products.create(ProductDraft::new(shoes.id, brand.id, "Runner", dec!(10))).await.unwrap();
        products.create(ProductDraft::new(lamps.id, brand.id, "Desk Lamp", dec!(20))).await.unwrap();

        let filtered = products
            .list(ProductFilter { category_id: Some(lamps.id), brand_id: None })
            .await
            .unwrap();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].slug, "desk-lamp");
        assert_eq!(products.list(ProductFilter::default()).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_repository_is_a_catalog() {
        let (store, category, brand) = seeded().await;
        let products = store.products();
        let product = products
            .create(ProductDraft::new(category.id, brand.id, "Runner", dec!(499.00)))
            .await
            .unwrap();

        let entry = products.find_by_id(&product.id).await.unwrap();
        assert_eq!(entry.price, Some(dec!(499.00)));

        let missing = Uuid::new_v4();
        assert_eq!(
            products.find_by_id(&missing).await,
            Err(CatalogError::NotFound(missing.to_string()))
        );
    }
}
