use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

pub const DEFAULT_CURRENCY: &str = "EUR";

/// A price. Accepts `{"amount": 12.5, "currency": "usd"}` or a bare amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MoneyInput")]
pub struct Money {
    pub amount: f64,
    pub currency: String,
}

impl Money {
    /// Validated constructor. A blank currency falls back to [`DEFAULT_CURRENCY`].
    pub fn new(amount: f64, currency: Option<&str>) -> Result<Self, CatalogError> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(CatalogError::BadRequest(
                "Price amount must be a non-negative number".into(),
            ));
        }

        let currency = currency
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_CURRENCY)
            .to_ascii_uppercase();
        if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(CatalogError::BadRequest(
                "Currency must be a 3-letter ISO-4217 code".into(),
            ));
        }

        Ok(Self { amount, currency })
    }

    pub fn eur(amount: f64) -> Result<Self, CatalogError> {
        Self::new(amount, None)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MoneyInput {
    Amount(f64),
    Full {
        amount: f64,
        #[serde(default)]
        currency: Option<String>,
    },
}

impl TryFrom<MoneyInput> for Money {
    type Error = CatalogError;

    fn try_from(input: MoneyInput) -> Result<Self, Self::Error> {
        match input {
            MoneyInput::Amount(amount) => Money::new(amount, None),
            MoneyInput::Full { amount, currency } => Money::new(amount, currency.as_deref()),
        }
    }
}
