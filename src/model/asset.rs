use std::fmt;

/// Intermediate accounting unit
pub const BASE_UNIT: &str = "BTC";
/// Reference currency the total is reported in
pub const STABLECOIN_UNIT: &str = "USDT";

/// How a held asset is converted into the base unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetKind {
    /// Already denominated in the base unit
    Base,
    /// Converted with the inverse of the base/stablecoin price
    Stablecoin,
    /// Converted with the asset/base pair price
    Other(String),
}

impl AssetKind {
    pub fn classify(asset: &str) -> Self {
        match asset {
            BASE_UNIT => AssetKind::Base,
            STABLECOIN_UNIT => AssetKind::Stablecoin,
            other => AssetKind::Other(other.to_string()),
        }
    }
}

/// A trading pair symbol such as "ETHBTC"
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TradingPair {
    pub base: String,
    pub quote: String,
}

impl TradingPair {
    pub fn new(base: impl Into<String>, quote: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            quote: quote.into(),
        }
    }

    /// Pair pricing `asset` in the base unit
    pub fn in_base_unit(asset: &str) -> Self {
        Self::new(asset, BASE_UNIT)
    }

    /// Pair pricing the base unit in the stablecoin unit ("BTCUSDT")
    pub fn reference() -> Self {
        Self::new(BASE_UNIT, STABLECOIN_UNIT)
    }

    pub fn symbol(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for TradingPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.base, self.quote)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(AssetKind::classify("BTC"), AssetKind::Base);
        assert_eq!(AssetKind::classify("USDT"), AssetKind::Stablecoin);
        assert_eq!(AssetKind::classify("ETH"), AssetKind::Other("ETH".to_string()));
    }

    #[test]
    fn test_pair_symbols() {
        assert_eq!(TradingPair::in_base_unit("ETH").symbol(), "ETHBTC");
        assert_eq!(TradingPair::reference().to_string(), "BTCUSDT");
    }
}
