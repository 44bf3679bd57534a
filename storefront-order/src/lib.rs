pub mod models;
pub mod pricing;
pub mod changes;
pub mod stats;

pub use models::{Order, OrderLine, OrderStatus, PaymentMethod, PaymentStatus, Quantity, ShippingMethod};
pub use pricing::{checked_sum, line_total, recompute_grand_total, set_quantity, set_quantity_input, PricingEngine, PricingError};
pub use changes::{ChangeError, ChangeHandler};
pub use stats::{OrderStats, OrderTab};
