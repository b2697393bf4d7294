/// Endpoint paths of the Binance spot REST API
pub const PING_PATH: &str = "/api/v3/ping";
pub const ACCOUNT_PATH: &str = "/api/v3/account";
pub const TICKER_PRICE_PATH: &str = "/api/v3/ticker/price";

/// Header carrying the API key on authenticated calls
pub const API_KEY_HEADER: &str = "X-MBX-APIKEY";

/// Error codes meaning the key, signature or permissions were rejected
pub const AUTH_ERROR_CODES: [i64; 4] = [-1022, -2008, -2014, -2015];
