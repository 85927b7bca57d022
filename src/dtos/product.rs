// src/dtos/product.rs
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::str::FromStr;

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: Option<String>,
    pub sku: Option<String>,
    pub price: Option<PriceInput>,
    pub warehouse_id: Option<i64>,
    pub initial_quantity: Option<QuantityInput>,
}

/// Price as sent by the client: a JSON number or a numeric string. Any
/// other JSON value still deserializes (last variant) so it fails price
/// validation rather than body parsing.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum PriceInput {
    Number(Number),
    Text(String),
    Other(serde_json::Value),
}

impl PriceInput {
    /// Parses into a non-negative decimal quantized to two fractional
    /// digits (half-even). None when the value is not a usable price.
    pub fn to_price(&self) -> Option<Decimal> {
        let raw = match self {
            PriceInput::Number(n) => Decimal::from_str(&n.to_string()).ok()?,
            PriceInput::Text(s) => Decimal::from_str(s.trim()).ok()?,
            PriceInput::Other(_) => return None,
        };
        if raw < Decimal::ZERO {
            return None;
        }
        Some(raw.round_dp(2))
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum QuantityInput {
    Number(Number),
    Text(String),
    Other(serde_json::Value),
}

impl QuantityInput {
    /// Parses into a non-negative integer; fractional numbers are rejected.
    pub fn to_quantity(&self) -> Option<i32> {
        let qty = match self {
            QuantityInput::Number(n) => n.as_i64()?,
            QuantityInput::Text(s) => s.trim().parse::<i64>().ok()?,
            QuantityInput::Other(_) => return None,
        };
        if qty < 0 {
            return None;
        }
        i32::try_from(qty).ok()
    }
}

#[derive(Debug, Serialize)]
pub struct CreateProductResponse {
    pub message: String,
    pub product_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn price_string_is_quantized_to_two_decimals() {
        let price = PriceInput::Text("19.999".into()).to_price();
        assert_eq!(price, Some(dec!(20.00)));
    }

    #[test]
    fn price_number_parses() {
        let n: Number = serde_json::from_str("10.5").unwrap();
        assert_eq!(PriceInput::Number(n).to_price(), Some(dec!(10.50)));
    }

    #[test]
    fn negative_price_is_rejected() {
        assert_eq!(PriceInput::Text("-1.00".into()).to_price(), None);
    }

    #[test]
    fn non_numeric_price_is_rejected() {
        assert_eq!(PriceInput::Text("free".into()).to_price(), None);
    }

    #[test]
    fn wrong_typed_price_fails_validation_not_body_parsing() {
        let input: PriceInput = serde_json::from_str("true").unwrap();
        assert_eq!(input.to_price(), None);
    }

    #[test]
    fn quantity_accepts_integers_and_numeric_strings() {
        assert_eq!(QuantityInput::Number(Number::from(5)).to_quantity(), Some(5));
        assert_eq!(QuantityInput::Text(" 7 ".into()).to_quantity(), Some(7));
    }

    #[test]
    fn fractional_quantity_is_rejected() {
        let n = Number::from_f64(2.5).unwrap();
        assert_eq!(QuantityInput::Number(n).to_quantity(), None);
    }

    #[test]
    fn negative_quantity_is_rejected() {
        assert_eq!(QuantityInput::Number(Number::from(-3)).to_quantity(), None);
        assert_eq!(QuantityInput::Text("-3".into()).to_quantity(), None);
    }

    #[test]
    fn wrong_typed_quantity_fails_validation_not_body_parsing() {
        let input: QuantityInput = serde_json::from_str("[1]").unwrap();
        assert_eq!(input.to_quantity(), None);
    }
}
