use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use storefront_shared::{format_amount, Currency};
use uuid::Uuid;

use crate::pricing::{checked_sum, line_total};

/// Fulfilment status of an order.
///
/// Operators may set any value at any time; there is no transition table.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    New,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    Failed,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Stripe,
    /// Cash on delivery
    Cod,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ShippingMethod {
    #[serde(rename = "FedEx")]
    FedEx,
    #[serde(rename = "UPS")]
    Ups,
    #[serde(rename = "DHL")]
    Dhl,
    #[serde(rename = "USPS")]
    Usps,
}

/// Number of units on a line. Always at least one.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(try_from = "i64", into = "u32")]
pub struct Quantity(u32);

impl Quantity {
    /// `None` for zero, negative or out-of-range values
    pub fn new(value: i64) -> Option<Self> {
        u32::try_from(value).ok().filter(|v| *v > 0).map(Quantity)
    }

    /// Parse operator input; `None` when it is not a positive whole number
    pub fn parse(input: &str) -> Option<Self> {
        input.trim().parse::<i64>().ok().and_then(Self::new)
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Quantity(1)
    }
}

impl TryFrom<i64> for Quantity {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Quantity::new(value).ok_or_else(|| format!("quantity must be a positive integer, got {}", value))
    }
}

impl From<Quantity> for u32 {
    fn from(quantity: Quantity) -> Self {
        quantity.0
    }
}

/// One product-and-quantity entry within an order.
///
/// Amounts are only written by the pricing functions, which keep
/// `total_amount == quantity * unit_amount`; deserialising a line that
/// breaks this fails.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "OrderLineRecord")]
pub struct OrderLine {
    id: Uuid,
    product_id: Option<Uuid>,
    quantity: Quantity,
    unit_amount: Decimal,
    total_amount: Decimal,
}

impl OrderLine {
    /// Empty line: no product, quantity 1, zero amounts
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            product_id: None,
            quantity: Quantity::default(),
            unit_amount: Decimal::ZERO,
            total_amount: Decimal::ZERO,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn product_id(&self) -> Option<Uuid> {
        self.product_id
    }

    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// Catalog price snapshotted when the product was selected
    pub fn unit_amount(&self) -> Decimal {
        self.unit_amount
    }

    pub fn total_amount(&self) -> Decimal {
        self.total_amount
    }

    pub(crate) fn set_product(&mut self, product_id: Uuid, unit_amount: Decimal, total_amount: Decimal) {
        self.product_id = Some(product_id);
        self.unit_amount = unit_amount;
        self.total_amount = total_amount;
    }

    pub(crate) fn set_quantity(&mut self, quantity: Quantity, total_amount: Decimal) {
        self.quantity = quantity;
        self.total_amount = total_amount;
    }
}

impl Default for OrderLine {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Deserialize)]
struct OrderLineRecord {
    id: Uuid,
    product_id: Option<Uuid>,
    quantity: Quantity,
    unit_amount: Decimal,
    total_amount: Decimal,
}

impl TryFrom<OrderLineRecord> for OrderLine {
    type Error = String;

    fn try_from(record: OrderLineRecord) -> Result<Self, Self::Error> {
        if record.unit_amount.is_sign_negative() && !record.unit_amount.is_zero() {
            return Err(format!("line {} has a negative unit amount", record.id));
        }
        let expected = line_total(record.quantity, record.unit_amount).map_err(|e| e.to_string())?;
        if record.total_amount != expected {
            return Err(format!(
                "line {} total {} does not match {} x {}",
                record.id,
                record.total_amount,
                record.quantity.get(),
                record.unit_amount
            ));
        }

        Ok(Self {
            id: record.id,
            product_id: record.product_id,
            quantity: record.quantity,
            unit_amount: record.unit_amount,
            total_amount: record.total_amount,
        })
    }
}

/// A customer order as composed in the back-office
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "OrderRecord")]
pub struct Order {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub status: OrderStatus,
    pub currency: Currency,
    pub shipping_method: Option<ShippingMethod>,
    pub notes: Option<String>,
    pub(crate) lines: Vec<OrderLine>,
    pub(crate) grand_total: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    pub fn new(customer_id: Uuid, payment_method: PaymentMethod, currency: Currency) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            customer_id,
            payment_method,
            payment_status: PaymentStatus::default(),
            status: OrderStatus::default(),
            currency,
            shipping_method: None,
            notes: None,
            lines: Vec::new(),
            grand_total: Decimal::ZERO,
            created_at: now,
            updated_at: now,
        }
    }

    /// Lines in insertion order
    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    pub fn line(&self, line_id: Uuid) -> Option<&OrderLine> {
        self.lines.iter().find(|line| line.id == line_id)
    }

    pub fn grand_total(&self) -> Decimal {
        self.grand_total
    }

    /// Grand total as shown to operators, e.g. `"1998.00 INR"`
    pub fn grand_total_display(&self) -> String {
        format_amount(self.grand_total, self.currency)
    }

    /// Update order status. Any status may follow any other.
    pub fn set_status(&mut self, status: OrderStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }

    pub fn set_payment_status(&mut self, payment_status: PaymentStatus) {
        self.payment_status = payment_status;
        self.updated_at = Utc::now();
    }
}

#[derive(Deserialize)]
struct OrderRecord {
    id: Uuid,
    customer_id: Uuid,
    payment_method: PaymentMethod,
    payment_status: PaymentStatus,
    status: OrderStatus,
    currency: Currency,
    shipping_method: Option<ShippingMethod>,
    notes: Option<String>,
    lines: Vec<OrderLine>,
    grand_total: Decimal,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<OrderRecord> for Order {
    type Error = String;

    fn try_from(record: OrderRecord) -> Result<Self, Self::Error> {
        // lines were already checked one by one
        let expected = checked_sum(record.lines.iter().map(OrderLine::total_amount)).map_err(|e| e.to_string())?;
        if record.grand_total != expected {
            return Err(format!(
                "order {} grand total {} does not match its lines ({})",
                record.id, record.grand_total, expected
            ));
        }

        Ok(Self {
            id: record.id,
            customer_id: record.customer_id,
            payment_method: record.payment_method,
            payment_status: record.payment_status,
            status: record.status,
            currency: record.currency,
            shipping_method: record.shipping_method,
            notes: record.notes,
            lines: record.lines,
            grand_total: record.grand_total,
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }
}
