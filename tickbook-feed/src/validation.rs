//! Level pair validation.
//!
//! Feed levels arrive as `[price, quantity]` JSON arrays. Prices may be any
//! JSON number; quantities must be non-negative integers.

use serde_json::Value;
use tickbook_core::{Error, PriceLevel, Result};

/// Validates and converts every element of a level list.
///
/// # Arguments
/// * `name` - Field name of the list, used in error messages
/// * `value` - The JSON value held by that field
///
/// # Errors
/// Returns `Error::InvalidValue` if the value is not an array or any
/// element is not a valid `[price, quantity]` pair.
pub fn parse_levels(name: &str, value: &Value) -> Result<Vec<PriceLevel>> {
    let items = value
        .as_array()
        .ok_or_else(|| Error::invalid(format!("{name}: expected an array of levels")))?;

    items
        .iter()
        .enumerate()
        .map(|(index, item)| parse_level(name, index, item))
        .collect()
}

/// Validates and converts a single `[price, quantity]` pair.
///
/// # Errors
/// Returns `Error::InvalidValue` if the element is not a two-element array,
/// the price is not a number, or the quantity is not a non-negative integer.
pub fn parse_level(name: &str, index: usize, item: &Value) -> Result<PriceLevel> {
    let pair = match item.as_array() {
        Some(pair) if pair.len() == 2 => pair,
        _ => {
            return Err(Error::invalid(format!(
                "{name}[{index}]: expected a [price, quantity] pair, got {item}"
            )));
        }
    };

    let price = pair[0]
        .as_f64()
        .ok_or_else(|| Error::invalid(format!("{name}[{index}]: price is not a number")))?;
    // -0.0 and 0.0 are one level.
    let price = if price == 0.0 { 0.0 } else { price };

    let quantity = pair[1]
        .as_i64()
        .ok_or_else(|| Error::invalid(format!("{name}[{index}]: quantity is not an integer")))?;

    if quantity < 0 {
        return Err(Error::invalid(format!(
            "{name}[{index}]: quantity {quantity} is negative"
        )));
    }

    Ok(PriceLevel::new(price, quantity))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_levels_valid() {
        let levels = parse_levels("asks", &json!([[100.5, 3], [101, 0]])).unwrap();
        assert_eq!(
            levels,
            vec![PriceLevel::new(100.5, 3), PriceLevel::new(101.0, 0)]
        );
    }

    #[test]
    fn test_parse_levels_empty() {
        assert!(parse_levels("bids", &json!([])).unwrap().is_empty());
    }

    #[test]
    fn test_parse_levels_not_array() {
        let err = parse_levels("asks", &json!({"price": 1})).unwrap_err();
        assert!(matches!(err, Error::InvalidValue(ref msg) if msg.starts_with("asks")));
    }

    #[test]
    fn test_parse_level_wrong_arity() {
        assert!(parse_level("asks", 0, &json!([100.0])).is_err());
        assert!(parse_level("asks", 0, &json!([100.0, 1, 2])).is_err());
        assert!(parse_level("asks", 0, &json!("100.0")).is_err());
    }

    #[test]
    fn test_parse_level_bad_types() {
        let err = parse_level("bids", 2, &json!(["100.0", 1])).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidValue("bids[2]: price is not a number".to_string())
        );

        let err = parse_level("bids", 1, &json!([100.0, 1.5])).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidValue("bids[1]: quantity is not an integer".to_string())
        );
    }

    #[test]
    fn test_parse_level_normalizes_negative_zero() {
        let level = parse_level("asks", 0, &json!([-0.0, 1])).unwrap();
        assert!(level.price.is_sign_positive());

        let levels = parse_levels("asks", &json!([[-0.0, 1], [0.0, 2]])).unwrap();
        assert_eq!(levels[0].price.to_bits(), levels[1].price.to_bits());
    }

    #[test]
    fn test_parse_level_negative_quantity() {
        let err = parse_level("asks", 0, &json!([100.0, -4])).unwrap_err();
        assert!(matches!(err, Error::InvalidValue(ref msg) if msg.contains("negative")));
    }
}
