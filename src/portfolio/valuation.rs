//! Converts a spot account into a single reference-currency total.
//!
//! Every non-empty balance is first expressed in the base unit (BTC), then the
//! sum is multiplied by the BTCUSDT price. An asset whose conversion fails is
//! left out of the total and reported in [`Valuation::skipped`].

use rust_decimal::Decimal;

use crate::error::ExchangeError;
use crate::exchange::{PriceSource, SpotExchange};
use crate::model::{AssetKind, Balance, TradingPair, BASE_UNIT, STABLECOIN_UNIT};

/// An asset left out of the total, with the reason its conversion failed
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedAsset {
    pub asset: String,
    pub reason: String,
}

/// Result of valuing a set of balances
#[derive(Debug, Clone, PartialEq)]
pub struct Valuation {
    /// Sum of all convertible balances in the base unit
    pub total_base: Decimal,
    /// BTCUSDT price used for the final conversion
    pub reference_price: Decimal,
    /// `total_base * reference_price`
    pub total_reference: Decimal,
    pub skipped: Vec<SkippedAsset>,
}

impl Valuation {
    /// Total in the reference currency, rounded to 8 decimals without trailing zeros
    pub fn formatted_total(&self) -> String {
        self.total_reference.round_dp(8).normalize().to_string()
    }

    pub fn is_partial(&self) -> bool {
        !self.skipped.is_empty()
    }
}

/// Value `balances` in the reference currency.
///
/// Lookups run one after another. A failing per-asset lookup only drops that
/// asset; a failing terminal BTCUSDT lookup fails the whole valuation.
pub async fn compute_total_value<P>(balances: &[Balance], prices: &P) -> Result<Valuation, ExchangeError>
where
    P: PriceSource + ?Sized,
{
    let mut total_base = Decimal::ZERO;
    let mut skipped = Vec::new();

    for balance in balances.iter().filter(|b| !b.is_empty()) {
        let contribution = base_value(balance, prices)
            .await
            .and_then(|value| {
                total_base.checked_add(value).ok_or_else(|| {
                    ExchangeError::InvalidInput(format!("{} overflows the running total", balance.asset))
                })
            });

        match contribution {
            Ok(new_total) => total_base = new_total,
            Err(e) => {
                warn!("Skipping {} (free {}, locked {}): {}", balance.asset, balance.free, balance.locked, e);
                skipped.push(SkippedAsset {
                    asset: balance.asset.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    let reference = TradingPair::reference();
    let reference_price = prices.get_price(&reference).await?;
    let total_reference = total_base
        .checked_mul(reference_price)
        .ok_or_else(|| ExchangeError::InvalidPrice {
            symbol: reference.symbol(),
            price: reference_price,
        })?;

    info!(" * Spot => {:.8} {} == {:.8} {}", total_base, BASE_UNIT, total_reference, STABLECOIN_UNIT);

    Ok(Valuation {
        total_base,
        reference_price,
        total_reference,
        skipped,
    })
}

/// Fetch the account balances from `exchange` and value them
pub async fn value_account<E>(exchange: &E) -> Result<Valuation, ExchangeError>
where
    E: SpotExchange + ?Sized,
{
    let balances = exchange.get_balances().await?;
    debug!("{} returned {} balances", exchange.name(), balances.len());
    compute_total_value(&balances, exchange).await
}

/// Amount of `balance` expressed in the base unit
async fn base_value<P>(balance: &Balance, prices: &P) -> Result<Decimal, ExchangeError>
where
    P: PriceSource + ?Sized,
{
    let amount = balance
        .total()
        .ok_or_else(|| ExchangeError::InvalidInput(format!("{} free + locked overflows", balance.asset)))?;

    match AssetKind::classify(&balance.asset) {
        AssetKind::Base => Ok(amount),
        AssetKind::Stablecoin => {
            let pair = TradingPair::reference();
            let price = prices.get_price(&pair).await?;
            amount
                .checked_div(price)
                .ok_or_else(|| ExchangeError::InvalidPrice { symbol: pair.symbol(), price })
        }
        AssetKind::Other(asset) => {
            let pair = TradingPair::in_base_unit(&asset);
            let price = prices.get_price(&pair).await?;
            amount
                .checked_mul(price)
                .ok_or_else(|| ExchangeError::InvalidPrice { symbol: pair.symbol(), price })
        }
    }
}
