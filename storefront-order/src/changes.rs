use chrono::Utc;
use storefront_catalog::ProductCatalog;
use tracing::warn;
use uuid::Uuid;

use crate::models::{Order, OrderLine};
use crate::pricing::{self, PricingEngine, PricingError};

/// Applies line edits to an order and keeps its grand total in step
pub struct ChangeHandler;

impl ChangeHandler {
    /// Append an empty line and return its id
    pub fn add_line(order: &mut Order) -> Uuid {
        let line = OrderLine::new();
        let line_id = line.id();
        order.lines.push(line);
        // an empty line carries no amount, the grand total stands
        order.updated_at = Utc::now();
        line_id
    }

    pub fn remove_line(order: &mut Order, line_id: Uuid) -> Result<(), ChangeError> {
        let index = Self::position(order, line_id)?;
        let removed = order.lines.remove(index);

        if let Err(e) = pricing::recompute_grand_total(order) {
            order.lines.insert(index, removed);
            return Err(e.into());
        }
        Ok(())
    }

    /// Pick the product for a line. A product may appear on only one line of an order.
    pub async fn select_product<C: ProductCatalog>(
        engine: &PricingEngine<C>,
        order: &mut Order,
        line_id: Uuid,
        product_id: Uuid,
    ) -> Result<(), ChangeError> {
        let index = Self::position(order, line_id)?;

        let taken = order
            .lines
            .iter()
            .any(|line| line.id() != line_id && line.product_id() == Some(product_id));
        if taken {
            warn!("Product {} already on order {}", product_id, order.id);
            return Err(ChangeError::DuplicateProduct(product_id));
        }

        // Price a copy so a failure anywhere leaves the order as it was
        let mut line = order.lines[index].clone();
        engine.select_product(&mut line, product_id).await?;
        Self::commit(order, index, line)
    }

    pub fn set_quantity(order: &mut Order, line_id: Uuid, quantity: i64) -> Result<(), ChangeError> {
        let index = Self::position(order, line_id)?;
        let mut line = order.lines[index].clone();
        pricing::set_quantity(&mut line, quantity)?;
        Self::commit(order, index, line)
    }

    pub fn set_quantity_input(order: &mut Order, line_id: Uuid, input: &str) -> Result<(), ChangeError> {
        let index = Self::position(order, line_id)?;
        let mut line = order.lines[index].clone();
        pricing::set_quantity_input(&mut line, input)?;
        Self::commit(order, index, line)
    }

    /// Swap in the repriced line, rolling back if the grand total no longer fits
    fn commit(order: &mut Order, index: usize, line: OrderLine) -> Result<(), ChangeError> {
        let previous = std::mem::replace(&mut order.lines[index], line);

        // Recalculate order total
        if let Err(e) = pricing::recompute_grand_total(order) {
            order.lines[index] = previous;
            return Err(e.into());
        }
        Ok(())
    }

    fn position(order: &Order, line_id: Uuid) -> Result<usize, ChangeError> {
        order
            .lines
            .iter()
            .position(|line| line.id() == line_id)
            .ok_or(ChangeError::LineNotFound(line_id))
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ChangeError {
    #[error("Line not found: {0}")]
    LineNotFound(Uuid),

    #[error("Product already on this order: {0}")]
    DuplicateProduct(Uuid),

    #[error(transparent)]
    Pricing(#[from] PricingError),
}
