use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::helpers::deserialize_decimal_from_string;

/// Latest price for a trading pair, e.g. "ETHBTC"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerPrice {
    pub symbol: String,
    #[serde(deserialize_with = "deserialize_decimal_from_string")]
    pub price: Decimal,
}
