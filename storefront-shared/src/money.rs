use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Currencies an order can be denominated in.
///
/// Serialised as the upper-case code; any casing is accepted when reading,
/// so `STOREFRONT__PRICING__DEFAULT_CURRENCY=usd` works.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE", try_from = "String")]
pub enum Currency {
    #[default]
    Inr,
    Usd,
    Eur,
    Gbp,
}

impl Currency {
    /// ISO 4217 code
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Inr => "INR",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Inr => "₹",
            Currency::Usd => "$",
            Currency::Eur => "€",
            Currency::Gbp => "£",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "INR" => Ok(Currency::Inr),
            "USD" => Ok(Currency::Usd),
            "EUR" => Ok(Currency::Eur),
            "GBP" => Ok(Currency::Gbp),
            _ => Err(MoneyError::UnsupportedCurrency(s.to_string())),
        }
    }
}

impl TryFrom<String> for Currency {
    type Error = MoneyError;

    fn try_from(code: String) -> Result<Self, Self::Error> {
        code.parse()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoneyError {
    #[error("Unsupported currency: {0}")]
    UnsupportedCurrency(String),
}

fn to_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Render an amount as `"<amount to 2 decimals> <CODE>"`, e.g. `"1998.00 INR"`
pub fn format_amount(amount: Decimal, currency: Currency) -> String {
    format!("{:.2} {}", to_cents(amount), currency.code())
}

/// Render an amount with the currency symbol and thousands grouping, e.g. `"₹1,998.00"`
pub fn format_currency(amount: Decimal, currency: Currency) -> String {
    let rounded = to_cents(amount);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    let plain = format!("{:.2}", rounded.abs());
    let (whole, fraction) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

    format!("{}{}{}.{}", sign, currency.symbol(), group_thousands(whole), fraction)
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_amount_two_decimals() {
        assert_eq!(format_amount(dec!(1998), Currency::Inr), "1998.00 INR");
        assert_eq!(format_amount(dec!(1234.5), Currency::Inr), "1234.50 INR");
        assert_eq!(format_amount(dec!(0), Currency::Usd), "0.00 USD");
    }

    #[test]
    fn test_format_amount_rounds_half_away_from_zero() {
        assert_eq!(format_amount(dec!(10.005), Currency::Eur), "10.01 EUR");
        assert_eq!(format_amount(dec!(10.004), Currency::Eur), "10.00 EUR");
    }

    #[test]
    fn test_format_currency_groups_thousands() {
        assert_eq!(format_currency(dec!(1998), Currency::Inr), "₹1,998.00");
        assert_eq!(format_currency(dec!(1234567.891), Currency::Usd), "$1,234,567.89");
        assert_eq!(format_currency(dec!(12.5), Currency::Gbp), "£12.50");
        assert_eq!(format_currency(dec!(-3), Currency::Eur), "-€3.00");
        assert_eq!(format_currency(dec!(0), Currency::Inr), "₹0.00");
    }

    #[test]
    fn test_currency_parsing() {
        assert_eq!("inr".parse::<Currency>().unwrap(), Currency::Inr);
        assert_eq!(" GBP ".parse::<Currency>().unwrap(), Currency::Gbp);
        assert_eq!(
            "JPY".parse::<Currency>(),
            Err(MoneyError::UnsupportedCurrency("JPY".to_string()))
        );
    }

    #[test]
    fn test_currency_serializes_as_code() {
        assert_eq!(serde_json::to_string(&Currency::Usd).unwrap(), "\"USD\"");
        let parsed: Currency = serde_json::from_str("\"EUR\"").unwrap();
        assert_eq!(parsed, Currency::Eur);
        let parsed: Currency = serde_json::from_str("\"usd\"").unwrap();
        assert_eq!(parsed, Currency::Usd);
        assert!(serde_json::from_str::<Currency>("\"JPY\"").is_err());
        assert_eq!(Currency::default(), Currency::Inr);
    }
}
