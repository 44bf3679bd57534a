pub mod money;
pub mod slug;

pub use money::{format_amount, format_currency, Currency, MoneyError};
pub use slug::{derive_slug, is_slug};
