use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RequestError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Request timeout: {0}")]
    TimeoutError(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Method not supported: {0}")]
    MethodNotSupported(String),

    #[error("Can't process request: {0}")]
    CantProcessRequest(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Rejected with status {status}: {message}")]
    Rejected {
        status: u16,
        code: Option<i64>,
        message: String,
    },
}

/// Errors raised while talking to the exchange on behalf of a command
#[derive(Error, Debug)]
pub enum ExchangeError {
    #[error(transparent)]
    Request(#[from] RequestError),

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid price for {symbol}: {price}")]
    InvalidPrice { symbol: String, price: Decimal },
}

impl From<serde_json::Error> for ExchangeError {
    fn from(e: serde_json::Error) -> Self {
        ExchangeError::InvalidResponse(e.to_string())
    }
}
