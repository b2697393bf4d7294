use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::helpers::deserialize_decimal_from_string;

/// Balance information from exchange
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Balance {
    pub asset: String,
    #[serde(deserialize_with = "deserialize_decimal_from_string")]
    pub free: Decimal,
    #[serde(deserialize_with = "deserialize_decimal_from_string")]
    pub locked: Decimal,
}

impl Balance {
    pub fn new(asset: impl Into<String>, free: Decimal, locked: Decimal) -> Self {
        Self {
            asset: asset.into(),
            free,
            locked,
        }
    }

    /// Free plus locked, `None` if the sum overflows
    pub fn total(&self) -> Option<Decimal> {
        self.free.checked_add(self.locked)
    }

    /// Nothing held, either free or locked
    pub fn is_empty(&self) -> bool {
        self.free.is_zero() && self.locked.is_zero()
    }
}
