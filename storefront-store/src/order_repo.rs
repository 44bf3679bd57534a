use async_trait::async_trait;
use std::sync::Arc;
use storefront_core::repository::{OrderRepository, StoreError, StoreResult};
use storefront_order::{Order, OrderTab};
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::Tables;

#[derive(Debug, Clone)]
pub struct MemoryOrderRepository {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryOrderRepository {
    pub(crate) fn new(tables: Arc<RwLock<Tables>>) -> Self {
        Self { tables }
    }
}

#[async_trait]
impl OrderRepository for MemoryOrderRepository {
    async fn save(&self, order: &Order) -> StoreResult<()> {
        let mut tables = self.tables.write().await;

        // Every line must point at a stored product
        for line in order.lines() {
            match line.product_id() {
                Some(product_id) if !tables.products.contains_key(&product_id) => {
                    return Err(StoreError::MissingReference { entity: "Product", id: product_id });
                }
                Some(_) => {}
                None => {
                    return Err(StoreError::Validation(format!("line {} has no product", line.id())));
                }
            }
        }

        // Insert or replace
        tables.orders.insert(order.id, order.clone());
        info!(
            "Order saved: {} ({} lines, {})",
            order.id,
            order.lines().len(),
            order.grand_total_display()
        );
        Ok(())
    }

    async fn get(&self, id: Uuid) -> StoreResult<Option<Order>> {
        Ok(self.tables.read().await.orders.get(&id).cloned())
    }

    async fn delete(&self, id: Uuid) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        // Lines live inside the order and go with it
        let order = tables
            .orders
            .remove(&id)
            .ok_or_else(|| StoreError::NotFound { entity: "Order", id: id.to_string() })?;

        info!("Order deleted: {} ({} lines removed)", id, order.lines().len());
        Ok(())
    }

    async fn list(&self, tab: OrderTab) -> StoreResult<Vec<Order>> {
        let tables = self.tables.read().await;
        let mut orders: Vec<Order> = tables.orders.values().filter(|o| tab.matches(o)).cloned().collect();
        orders.sort_by_key(|o| o.created_at);
        Ok(orders)
    }

    async fn count(&self) -> StoreResult<usize> {
        Ok(self.tables.read().await.orders.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;
    use rust_decimal_macros::dec;
    use storefront_catalog::{BrandDraft, CategoryDraft, ProductDraft};
    use storefront_core::repository::{BrandRepository, CategoryRepository, ProductRepository};
    use storefront_order::{ChangeHandler, OrderStatus, PaymentMethod, PricingEngine};
    use storefront_shared::Currency;

    async fn priced_order(store: &MemoryStore) -> Order {
        let category = store.categories().create(CategoryDraft::new("Footwear")).await.unwrap();
        let brand = store.brands().create(BrandDraft::new("Acme")).await.unwrap();
        let product = store
            .products()
            .create(ProductDraft::new(category.id, brand.id, "Runner", dec!(499.00)))
            .await
            .unwrap();

        let engine = PricingEngine::new(store.products());
        let mut order = Order::new(Uuid::new_v4(), PaymentMethod::Stripe, Currency::Inr);
        let line = ChangeHandler::add_line(&mut order);
        ChangeHandler::select_product(&engine, &mut order, line, product.id).await.unwrap();
        order
    }

    #[tokio::test]
    async fn test_save_and_get() {
        let store = MemoryStore::new();
        let order = priced_order(&store).await;
        let orders = store.orders();

        orders.save(&order).await.unwrap();
        let loaded = orders.get(order.id).await.unwrap().unwrap();
        assert_eq!(loaded, order);
        assert_eq!(loaded.grand_total_display(), "499.00 INR");
    }

    #[tokio::test]
    async fn test_line_without_product_rejected() {
        let store = MemoryStore::new();
        let mut order = Order::new(Uuid::new_v4(), PaymentMethod::Cod, Currency::Usd);
        ChangeHandler::add_line(&mut order);

        let result = store.orders().save(&order).await;
        assert!(matches!(result, Err(StoreError::Validation(_))));
    }

    #[tokio::test]
    async fn test_delete_removes_lines() {
        let store = MemoryStore::new();
        let order = priced_order(&store).await;
        let product_id = order.lines()[0].product_id().unwrap();
        let orders = store.orders();
        orders.save(&order).await.unwrap();

        // the product is pinned while an order line points at it
        assert!(store.products().delete(product_id).await.is_err());

        orders.delete(order.id).await.unwrap();
        assert!(orders.get(order.id).await.unwrap().is_none());
        assert_eq!(orders.count().await.unwrap(), 0);
        store.products().delete(product_id).await.unwrap();

        assert_eq!(
            orders.delete(order.id).await,
            Err(StoreError::NotFound { entity: "Order", id: order.id.to_string() })
        );
    }

    #[tokio::test]
    async fn test_list_by_tab() {
        let store = MemoryStore::new();
        let mut order = priced_order(&store).await;
        let orders = store.orders();
        orders.save(&order).await.unwrap();

        assert_eq!(orders.list(OrderTab::New).await.unwrap().len(), 1);
        assert!(orders.list(OrderTab::Shipped).await.unwrap().is_empty());

        order.set_status(OrderStatus::Shipped);
        orders.save(&order).await.unwrap();

        assert!(orders.list(OrderTab::New).await.unwrap().is_empty());
        assert_eq!(orders.list(OrderTab::Shipped).await.unwrap().len(), 1);
        assert_eq!(orders.list(OrderTab::All).await.unwrap().len(), 1);
    }
}
