use serde::{Deserialize, Serialize};

use super::balance::Balance;

/// Spot account snapshot as returned by the account endpoint.
/// Only the fields the bot reads are kept.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountInfo {
    #[serde(default)]
    pub account_type: Option<String>,
    #[serde(default)]
    pub can_trade: bool,
    #[serde(default)]
    pub update_time: Option<i64>,
    pub balances: Vec<Balance>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_info_from_exchange_json() {
        let json = r#"{
            "makerCommission": 10,
            "canTrade": true,
            "updateTime": 123456789,
            "accountType": "SPOT",
            "balances": [
                {"asset": "BTC", "free": "1.00000000", "locked": "0.00000000"},
                {"asset": "LTC", "free": "0.00000000", "locked": "0.00000000"}
            ],
            "permissions": ["SPOT"]
        }"#;
        let account: AccountInfo = serde_json::from_str(json).unwrap();

        assert!(account.can_trade);
        assert_eq!(account.account_type.as_deref(), Some("SPOT"));
        assert_eq!(account.balances.len(), 2);
        assert_eq!(account.balances.iter().filter(|b| !b.is_empty()).count(), 1);
    }
}
