use rust_decimal::Decimal;
use storefront_catalog::{CatalogError, ProductCatalog};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::models::{Order, OrderLine, Quantity};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PricingError {
    #[error("Product not found: {0}")]
    ProductNotFound(Uuid),

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),

    #[error("Catalog lookup failed: {0}")]
    Catalog(CatalogError),

    #[error("Amount out of range")]
    AmountOverflow,
}

/// `quantity * unit_amount`, exact for whole quantities
pub fn line_total(quantity: Quantity, unit_amount: Decimal) -> Result<Decimal, PricingError> {
    Decimal::from(quantity.get())
        .checked_mul(unit_amount)
        .ok_or(PricingError::AmountOverflow)
}

/// Sum of amounts, failing instead of wrapping past `Decimal::MAX`
pub fn checked_sum<I>(amounts: I) -> Result<Decimal, PricingError>
where
    I: IntoIterator<Item = Decimal>,
{
    amounts
        .into_iter()
        .try_fold(Decimal::ZERO, |sum, amount| sum.checked_add(amount))
        .ok_or(PricingError::AmountOverflow)
}

/// Keeps line and order totals consistent while an order is being edited.
///
/// The catalog is only consulted when a product is picked; the price is
/// copied onto the line so later catalog changes do not reprice it.
pub struct PricingEngine<C> {
    catalog: C,
}

impl<C: ProductCatalog> PricingEngine<C> {
    pub fn new(catalog: C) -> Self {
        Self { catalog }
    }

    /// Snapshot the catalog price of `product_id` onto `line` and reprice it.
    ///
    /// On any error the line is left exactly as it was.
    pub async fn select_product(&self, line: &mut OrderLine, product_id: Uuid) -> Result<(), PricingError> {
        let entry = match self.catalog.find_by_id(&product_id).await {
            Ok(entry) => entry,
            Err(CatalogError::NotFound(_)) => {
                warn!("Product {} not found, line {} unchanged", product_id, line.id());
                return Err(PricingError::ProductNotFound(product_id));
            }
            Err(e) => return Err(PricingError::Catalog(e)),
        };

        // unpriced products sell at zero
        let unit_amount = entry.price.unwrap_or(Decimal::ZERO);
        let total_amount = line_total(line.quantity(), unit_amount).map_err(|e| {
            warn!("Line {} total out of range for product {}", line.id(), product_id);
            e
        })?;
        line.set_product(product_id, unit_amount, total_amount);

        debug!(
            "Line {} priced from {} ({}): {} x {} = {}",
            line.id(),
            entry.name,
            product_id,
            line.quantity().get(),
            unit_amount,
            total_amount
        );
        Ok(())
    }
}

/// Change the quantity of a line and reprice it. Non-positive quantities are rejected.
pub fn set_quantity(line: &mut OrderLine, quantity: i64) -> Result<(), PricingError> {
    let quantity = Quantity::new(quantity).ok_or_else(|| {
        warn!("Rejected quantity {} for line {}", quantity, line.id());
        PricingError::InvalidQuantity(quantity.to_string())
    })?;
    apply_quantity(line, quantity)
}

/// Same policy as [`set_quantity`] for raw operator input
pub fn set_quantity_input(line: &mut OrderLine, input: &str) -> Result<(), PricingError> {
    let quantity = Quantity::parse(input).ok_or_else(|| {
        warn!("Rejected quantity input {:?} for line {}", input, line.id());
        PricingError::InvalidQuantity(input.to_string())
    })?;
    apply_quantity(line, quantity)
}

fn apply_quantity(line: &mut OrderLine, quantity: Quantity) -> Result<(), PricingError> {
    let total_amount = line_total(quantity, line.unit_amount()).map_err(|e| {
        warn!("Line {} total out of range at quantity {}", line.id(), quantity.get());
        e
    })?;
    line.set_quantity(quantity, total_amount);
    debug!("Line {} quantity set to {}: total {}", line.id(), quantity.get(), total_amount);
    Ok(())
}

/// Set the grand total to the sum of line totals and return its display form.
///
/// On overflow the order keeps its previous grand total.
pub fn recompute_grand_total(order: &mut Order) -> Result<String, PricingError> {
    let grand_total = checked_sum(order.lines.iter().map(OrderLine::total_amount))?;
    order.grand_total = grand_total;
    order.updated_at = chrono::Utc::now();

    let shown = order.grand_total_display();
    debug!("Order {} grand total {}", order.id, shown);
    Ok(shown)
}
