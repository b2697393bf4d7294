pub mod binance;
pub mod traits;

pub use traits::{PriceSource, SpotExchange};
