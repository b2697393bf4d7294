use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::ExchangeError;

type HmacSha256 = Hmac<Sha256>;

/// Builds a query string from key/value pairs, percent-encoding the values
pub fn build_query(params: &[(&str, String)]) -> String {
    params
        .iter()
        .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Hex encoded HMAC-SHA256 of `payload` keyed with the API secret
pub fn sign_payload(secret: &str, payload: &str) -> Result<String, ExchangeError> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| ExchangeError::InvalidInput(format!("Invalid HMAC secret length: {}", e)))?;
    mac.update(payload.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Appends `signature=...` to an already built query string
pub fn signed_query(secret: &str, query: &str) -> Result<String, ExchangeError> {
    let signature = sign_payload(secret, query)?;
    Ok(format!("{}&signature={}", query, signature))
}

#[cfg(test)]
mod tests {
    use super::*;

    // Example request from the Binance SIGNED endpoint documentation
    const DOC_SECRET: &str = "NhqPtmdSJYdKjVHjA7PZj4Mge3R5YNiP1e3UZjInClVN65XAbvqqM6A7H5fATj0j";
    const DOC_QUERY: &str = "symbol=LTCBTC&side=BUY&type=LIMIT&timeInForce=GTC&quantity=1&price=0.1&recvWindow=5000&timestamp=1499827319559";

    #[test]
    fn test_sign_payload_matches_documented_signature() {
        let signature = sign_payload(DOC_SECRET, DOC_QUERY).unwrap();
        assert_eq!(signature, "c8db56825ae71d6d79447849e617115f4a920fa2acdcab2b053c4b2838bd6b71");
    }

    #[test]
    fn test_signed_query_appends_signature() {
        let query = signed_query("secret", "timestamp=1").unwrap();
        assert!(query.starts_with("timestamp=1&signature="));
        assert_eq!(query.len(), "timestamp=1&signature=".len() + 64);
    }

    #[test]
    fn test_build_query_encodes_values() {
        let query = build_query(&[("symbol", "ETHBTC".to_string()), ("note", "a b&c".to_string())]);
        assert_eq!(query, "symbol=ETHBTC&note=a%20b%26c");
    }
}
