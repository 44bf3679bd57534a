use serde::Deserialize;
use std::path::Path;
use storefront_catalog::ProductCatalog;
use storefront_core::repository::{ProductRepository, StoreError};
use storefront_core::CoreResult;
use storefront_order::{ChangeHandler, Order, OrderStatus, PaymentMethod, PaymentStatus, PricingEngine, ShippingMethod};
use storefront_shared::Currency;
use uuid::Uuid;

fn default_quantity() -> i64 { 1 }

/// One line of an order draft; the product is referenced by slug
#[derive(Debug, Clone, Deserialize)]
pub struct LineDraft {
    pub product_slug: String,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
}

/// Order as handed in by an operator, before pricing
#[derive(Debug, Clone, Deserialize)]
pub struct OrderDraft {
    #[serde(default)]
    pub customer_id: Option<Uuid>,
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub currency: Option<Currency>,
    #[serde(default)]
    pub shipping_method: Option<ShippingMethod>,
    #[serde(default)]
    pub notes: Option<String>,
    pub lines: Vec<LineDraft>,
}

impl OrderDraft {
    pub fn list_from_path(path: impl AsRef<Path>) -> anyhow::Result<Vec<Self>> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Build and price the order line by line, as an operator would
    pub async fn compose<C, P>(
        &self,
        engine: &PricingEngine<C>,
        products: &P,
        default_currency: Currency,
    ) -> CoreResult<Order>
    where
        C: ProductCatalog,
        P: ProductRepository,
    {
        let mut order = Order::new(
            self.customer_id.unwrap_or_else(Uuid::new_v4),
            self.payment_method,
            self.currency.unwrap_or(default_currency),
        );
        order.shipping_method = self.shipping_method;
        order.notes = self.notes.clone();
        order.set_status(self.status);
        order.set_payment_status(self.payment_status);

        for line in &self.lines {
            // Resolve slug
            let product = products
                .get_by_slug(&line.product_slug)
                .await?
                .ok_or_else(|| StoreError::NotFound { entity: "Product", id: line.product_slug.clone() })?;

            // Price line
            let line_id = ChangeHandler::add_line(&mut order);
            ChangeHandler::select_product(engine, &mut order, line_id, product.id).await?;
            ChangeHandler::set_quantity(&mut order, line_id, line.quantity)?;
        }

        Ok(order)
    }
}
