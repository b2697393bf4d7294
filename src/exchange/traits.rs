use async_trait::async_trait;
use rust_decimal::Decimal;
use crate::error::ExchangeError;
use crate::model::{Balance, TradingPair};

/// Anything able to quote the latest price of a trading pair
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Latest price of `pair.base` expressed in `pair.quote`
    async fn get_price(&self, pair: &TradingPair) -> Result<Decimal, ExchangeError>;
}

/// Read-only operations on a spot exchange account
#[async_trait]
pub trait SpotExchange: PriceSource {
    /// Get the exchange name
    fn name(&self) -> &str;

    /// Check if the exchange is available and responsive
    async fn health_check(&self) -> Result<bool, ExchangeError>;

    /// Get every balance of the account, including empty ones
    async fn get_balances(&self) -> Result<Vec<Balance>, ExchangeError>;
}
