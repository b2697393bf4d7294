use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Method;
use rust_decimal::Decimal;
use std::time::Duration;

use crate::config::{AppConfig, ExchangeCredentials};
use crate::error::{ExchangeError, RequestError};
use crate::exchange::binance::models::{ACCOUNT_PATH, API_KEY_HEADER, AUTH_ERROR_CODES, PING_PATH, TICKER_PRICE_PATH};
use crate::exchange::{PriceSource, SpotExchange};
use crate::helpers::sign;
use crate::model::{AccountInfo, Balance, TickerPrice, TradingPair};
use crate::request::Request;


/// Binance spot exchange client.
///
/// Every call goes through [`Request`] and is made once, without retries.
pub struct BinanceClient {
    api_key: String,
    api_secret: String,
    base_url: String,
    recv_window_ms: u64,
    request: Request,
}

impl BinanceClient {
    pub fn new(credentials: &ExchangeCredentials, timeout: Duration) -> Result<Self, ExchangeError> {
        let request = Request::new(timeout, credentials.proxy_url.as_deref())?;

        Ok(Self {
            api_key: credentials.api_key.clone(),
            api_secret: credentials.api_secret.clone(),
            base_url: credentials.base_url.trim_end_matches('/').to_string(),
            recv_window_ms: credentials.recv_window_ms,
            request,
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, ExchangeError> {
        Self::new(&config.binance, config.api_timeout())
    }

    /// Fetch the signed account snapshot
    pub async fn get_account(&self) -> Result<AccountInfo, ExchangeError> {
        let timestamp = chrono::Utc::now().timestamp_millis();
        let query = sign::build_query(&[
            ("recvWindow", self.recv_window_ms.to_string()),
            ("timestamp", timestamp.to_string()),
        ]);
        let query = sign::signed_query(&self.api_secret, &query)?;

        let mut headers = HeaderMap::new();
        let api_key = HeaderValue::from_str(&self.api_key)
            .map_err(|e| ExchangeError::InvalidInput(format!("API key is not a valid header value: {}", e)))?;
        headers.insert(API_KEY_HEADER, api_key);

        let url = format!("{}{}?{}", self.base_url, ACCOUNT_PATH, query);
        let value = self.get(url, Some(headers)).await.map_err(map_auth_error)?;
        let account: AccountInfo = serde_json::from_value(value)?;

        debug!(
            "Account {} | canTrade: {} | updateTime: {:?} | {} balances",
            account.account_type.as_deref().unwrap_or("UNKNOWN"),
            account.can_trade,
            account.update_time,
            account.balances.len()
        );

        Ok(account)
    }

    async fn get(&self, url: String, headers: Option<HeaderMap>) -> Result<serde_json::Value, RequestError> {
        self.request.process_request(Method::GET, url, headers).await
    }
}

/// Rejections caused by the key, signature or IP whitelist become `AuthenticationFailed`
fn map_auth_error(e: RequestError) -> ExchangeError {
    match e {
        RequestError::Rejected { status, code, message }
            if status == 401 || status == 403 || code.is_some_and(|c| AUTH_ERROR_CODES.contains(&c)) =>
        {
            ExchangeError::AuthenticationFailed(message)
        }
        other => ExchangeError::Request(other),
    }
}

#[async_trait]
impl PriceSource for BinanceClient {
    async fn get_price(&self, pair: &TradingPair) -> Result<Decimal, ExchangeError> {
        let symbol = pair.symbol();
        let query = sign::build_query(&[("symbol", symbol.clone())]);
        let url = format!("{}{}?{}", self.base_url, TICKER_PRICE_PATH, query);

        let ticker: TickerPrice = serde_json::from_value(self.get(url, None).await?)?;

        if ticker.price <= Decimal::ZERO {
            return Err(ExchangeError::InvalidPrice { symbol, price: ticker.price });
        }

        Ok(ticker.price)
    }
}

#[async_trait]
impl SpotExchange for BinanceClient {
    fn name(&self) -> &str {
        "Binance"
    }

    async fn health_check(&self) -> Result<bool, ExchangeError> {
        let url = format!("{}{}", self.base_url, PING_PATH);
        Ok(self.get(url, None).await.is_ok())
    }

    async fn get_balances(&self) -> Result<Vec<Balance>, ExchangeError> {
        Ok(self.get_account().await?.balances)
    }
}
