pub mod account;
pub mod asset;
pub mod balance;
pub mod sender;
pub mod ticker;

pub use account::AccountInfo;
pub use asset::{AssetKind, TradingPair, BASE_UNIT, STABLECOIN_UNIT};
pub use balance::Balance;
pub use sender::Sender;
pub use ticker::TickerPrice;
