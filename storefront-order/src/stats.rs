use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use storefront_shared::{format_currency, Currency};

use crate::models::{Order, OrderStatus};
use crate::pricing::{checked_sum, PricingError};

/// Figures shown above the order list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderStats {
    pub new_orders: usize,
    pub processing_orders: usize,
    pub shipped_orders: usize,
    pub average_grand_total: Decimal,
    pub currency: Currency,
}

impl OrderStats {
    /// Count orders by status and average their grand totals (zero when empty).
    ///
    /// Fails with `AmountOverflow` if the grand totals cannot be summed.
    pub fn collect(orders: &[Order], currency: Currency) -> Result<Self, PricingError> {
        let count = |status: OrderStatus| orders.iter().filter(|o| o.status == status).count();

        let average_grand_total = if orders.is_empty() {
            Decimal::ZERO
        } else {
            let sum = checked_sum(orders.iter().map(Order::grand_total))?;
            sum / Decimal::from(orders.len())
        };

        Ok(Self {
            new_orders: count(OrderStatus::New),
            processing_orders: count(OrderStatus::Processing),
            shipped_orders: count(OrderStatus::Shipped),
            average_grand_total,
            currency,
        })
    }

    /// Average grand total, e.g. `"₹1,998.00"`
    pub fn average_display(&self) -> String {
        format_currency(self.average_grand_total, self.currency)
    }
}

/// Status tabs on the order list
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OrderTab {
    #[default]
    All,
    New,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderTab {
    pub fn matches(&self, order: &Order) -> bool {
        match self {
            OrderTab::All => true,
            OrderTab::New => order.status == OrderStatus::New,
            OrderTab::Processing => order.status == OrderStatus::Processing,
            OrderTab::Shipped => order.status == OrderStatus::Shipped,
            OrderTab::Delivered => order.status == OrderStatus::Delivered,
            OrderTab::Cancelled => order.status == OrderStatus::Cancelled,
        }
    }
}
