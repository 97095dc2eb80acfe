use crate::error::{AppError, AppResult};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

fn default_currency() -> String {
    "EUR".to_string()
}

/// Price with an optional percentage discount.
///
/// `final_price` is derived and recomputed on every write; whatever a client
/// sends for it is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pricing {
    pub price: Decimal,
    #[serde(default)]
    pub discount_percent: Option<Decimal>,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub final_price: Decimal,
}

impl Pricing {
    pub fn new(price: Decimal, discount_percent: Option<Decimal>) -> Self {
        let mut pricing = Self {
            price,
            discount_percent,
            currency: default_currency(),
            final_price: Decimal::ZERO,
        };
        pricing.normalize();
        pricing
    }

    /// `price * (100 - discount) / 100`, two decimal places.
    /// `None` when the result does not fit in a `Decimal`.
    pub fn compute_final_price(&self) -> Option<Decimal> {
        let discount = self.discount_percent.unwrap_or(Decimal::ZERO);
        let mut value = self
            .price
            .checked_mul(HUNDRED.checked_sub(discount)?)?
            .checked_div(HUNDRED)?
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        value.rescale(2);
        Some(value)
    }

    pub fn normalize(&mut self) {
        self.currency = self.currency.trim().to_uppercase();
        if self.currency.is_empty() {
            self.currency = default_currency();
        }
        if self.discount_percent == Some(Decimal::ZERO) {
            self.discount_percent = None;
        }
        // Out-of-range amounts are reported by validate()
        self.final_price = self.compute_final_price().unwrap_or(Decimal::ZERO);
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.price.is_sign_negative() {
            return Err(AppError::Validation("price must not be negative".into()));
        }
        if let Some(discount) = self.discount_percent {
            validate_percent("discount_percent", discount)?;
        }
        if self.compute_final_price().is_none() {
            return Err(AppError::Validation("price out of range".into()));
        }
        if self.currency.len() != 3 || !self.currency.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(AppError::Validation("currency must be a 3-letter code".into()));
        }
        Ok(())
    }
}

/// Percentages (discounts, commissions, markups) live in 0..=100
pub fn validate_percent(field: &str, value: Decimal) -> AppResult<()> {
    if value < Decimal::ZERO || value > HUNDRED {
        return Err(AppError::Validation(format!(
            "{} must be between 0 and 100",
            field
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_final_price_without_discount() {
        let pricing = Pricing::new(dec("1200"), None);
        assert_eq!(pricing.final_price, dec("1200.00"));
        assert_eq!(pricing.final_price.to_string(), "1200.00");
    }

    #[test]
    fn test_final_price_with_discount() {
        let pricing = Pricing::new(dec("1200"), Some(dec("10")));
        assert_eq!(pricing.final_price, dec("1080"));
    }

    #[test]
    fn test_final_price_rounding() {
        // 99.99 * 0.85 = 84.9915
        let pricing = Pricing::new(dec("99.99"), Some(dec("15")));
        assert_eq!(pricing.final_price, dec("84.99"));

        // 10.01 * 0.5 = 5.005 rounds away from zero
        let pricing = Pricing::new(dec("10.01"), Some(dec("50")));
        assert_eq!(pricing.final_price, dec("5.01"));
    }

    #[test]
    fn test_zero_discount_is_dropped() {
        let pricing = Pricing::new(dec("50"), Some(Decimal::ZERO));
        assert_eq!(pricing.discount_percent, None);
    }

    #[test]
    fn test_validation() {
        assert!(Pricing::new(dec("-1"), None).validate().is_err());
        assert!(Pricing::new(dec("10"), Some(dec("101"))).validate().is_err());
        assert!(Pricing::new(dec("10"), Some(dec("100"))).validate().is_ok());

        let mut pricing = Pricing::new(dec("10"), None);
        pricing.currency = "euro".into();
        pricing.normalize();
        assert!(pricing.validate().is_err());
    }

    #[test]
    fn test_overflowing_price_is_a_validation_error() {
        let pricing = Pricing::new(Decimal::MAX, Some(dec("10")));
        assert_eq!(pricing.final_price, Decimal::ZERO);
        match pricing.validate() {
            Err(AppError::Validation(msg)) => assert_eq!(msg, "price out of range"),
            other => panic!("expected validation error, got {:?}", other),
        }

        // Huge discounts are rejected before any arithmetic blows up
        let pricing = Pricing::new(dec("10"), Some(Decimal::MAX));
        assert!(matches!(pricing.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_client_final_price_ignored() {
        let mut pricing: Pricing =
            serde_json::from_str(r#"{"price": "200", "discount_percent": 25, "final_price": "1"}"#)
                .unwrap();
        pricing.normalize();
        assert_eq!(pricing.final_price, dec("150"));
        assert_eq!(pricing.currency, "EUR");
    }
}
