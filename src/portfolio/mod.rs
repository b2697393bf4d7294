pub mod valuation;

pub use valuation::{compute_total_value, value_account, SkippedAsset, Valuation};
