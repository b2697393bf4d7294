use log::{debug, warn};
use reqwest::{header::HeaderMap, Client, Method, Proxy, StatusCode};
use serde_json::Value;
use std::time::Duration;
use crate::error::RequestError;

/// Thin wrapper over a `reqwest::Client` that maps exchange responses into `RequestError`
#[derive(Clone)]
pub struct Request {
    client: Client,
}

impl Request {
    /// Builds a client with the given timeout, optionally routed through a proxy
    pub fn new(timeout: Duration, proxy_url: Option<&str>) -> Result<Self, RequestError> {
        Ok(Self {
            client: Self::create_client(timeout, proxy_url)?,
        })
    }

    fn create_client(timeout: Duration, proxy_url: Option<&str>) -> Result<Client, RequestError> {
        let mut client_builder = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .pool_idle_timeout(Duration::from_secs(60))
            .tcp_keepalive(Duration::from_secs(30))
            .no_proxy();  // Disable system proxy detection, only use the configured one

        if let Some(proxy) = proxy_url {
            let formatted_proxy = format_proxy_url(proxy);

            let proxy = Proxy::all(&formatted_proxy)
                .map_err(|e| RequestError::ConnectionError(format!(
                    "Proxy string '{}' (parsed as '{}') error: {}",
                    proxy, formatted_proxy, e
                )))?;
            client_builder = client_builder.proxy(proxy);
        }

        client_builder.build().map_err(|e| RequestError::ConnectionError(e.to_string()))
    }

    /// Sends a single HTTP request and returns the JSON body.
    ///
    /// # Arguments
    ///
    /// * `method` - Only GET is supported, the exchange endpoints we use are all reads.
    /// * `url` - The full URL including the query string.
    /// * `headers` - Optional HTTP headers to include in the request.
    ///
    /// # Errors
    ///
    /// Non-200 responses are mapped to a `RequestError`. The request is never retried.
    pub async fn process_request<S: AsRef<str>>(
        &self,
        method: Method,
        url: S,
        headers: Option<HeaderMap>,
    ) -> Result<Value, RequestError> {
        if method != Method::GET {
            return Err(RequestError::MethodNotSupported(format!("The method <{}> is not supported.", method)));
        }

        let url = reqwest::Url::parse(url.as_ref()).map_err(|e| RequestError::ApiError(e.to_string()))?;
        let headers = headers.unwrap_or_default();

        debug!("{} {}", method, url.path());

        let res = self
            .client
            .request(method, url.clone())
            .headers(headers)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    RequestError::TimeoutError(format!("Request timeout for URL: {}", url.path()))
                } else if e.is_connect() {
                    RequestError::ConnectionError(format!("Connection failed for URL: {}: {}", url.path(), e))
                } else {
                    RequestError::ApiError(format!("Request failed for URL: {}: {}", url.path(), e))
                }
            })?;

        let status = res.status();
        let text = res.text().await.map_err(|e| RequestError::ApiError(e.to_string()))?;

        match status {
            StatusCode::OK => serde_json::from_str(&text).map_err(|e| RequestError::ApiError(e.to_string())),

            // 418 is what Binance answers once an IP keeps ignoring 429s
            StatusCode::TOO_MANY_REQUESTS | StatusCode::IM_A_TEAPOT => {
                warn!("URL: {} | Rate limited with status {}", url.path(), status);
                Err(RequestError::RateLimited(format!("Status: {} | {}", status, text)))
            }

            StatusCode::NOT_FOUND => Err(RequestError::CantProcessRequest(format!(
                "Status: {} | Can't process request. Text: {}",
                status, text
            ))),

            StatusCode::GATEWAY_TIMEOUT => Err(RequestError::TimeoutError(format!(
                "URL: {} Status: {} | Can't process request.",
                url.path(),
                status
            ))),

            _ => Err(rejection(status, &text)),
        }
    }
}

/// Converts "ip:port:user:pass" into "http://user:pass@ip:port", anything else into "http://{proxy}"
fn format_proxy_url(proxy: &str) -> String {
    if proxy.starts_with("http://") || proxy.starts_with("https://") || proxy.starts_with("socks5://") {
        return proxy.to_string();
    }

    let parts: Vec<_> = proxy.splitn(4, ':').collect();
    if parts.len() == 4 {
        let (ip, port, user, pass) = (parts[0], parts[1], parts[2], parts[3]);
        format!("http://{}:{}@{}:{}", user, pass, ip, port)
    } else {
        format!("http://{proxy}")
    }
}

/// Builds a `Rejected` error, pulling `code`/`msg` out of an exchange error body when present
fn rejection(status: StatusCode, text: &str) -> RequestError {
    let body: Option<Value> = serde_json::from_str(text).ok();
    let code = body.as_ref().and_then(|b| b["code"].as_i64());
    let message = body
        .as_ref()
        .and_then(|b| b["msg"].as_str())
        .map(str::to_string)
        .unwrap_or_else(|| text.to_string());

    RequestError::Rejected {
        status: status.as_u16(),
        code,
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_proxy_url() {
        assert_eq!(format_proxy_url("1.2.3.4:8080:bob:pw"), "http://bob:pw@1.2.3.4:8080");
        assert_eq!(format_proxy_url("proxy.local:3128"), "http://proxy.local:3128");
        assert_eq!(format_proxy_url("socks5://proxy.local:1080"), "socks5://proxy.local:1080");
    }

    #[test]
    fn test_invalid_proxy_is_rejected() {
        let result = Request::new(Duration::from_secs(1), Some("http://[::1"));
        assert!(matches!(result, Err(RequestError::ConnectionError(_))));
    }

    #[test]
    fn test_rejection_reads_exchange_error_body() {
        let err = rejection(StatusCode::BAD_REQUEST, r#"{"code":-1121,"msg":"Invalid symbol."}"#);
        match err {
            RequestError::Rejected { status, code, message } => {
                assert_eq!(status, 400);
                assert_eq!(code, Some(-1121));
                assert_eq!(message, "Invalid symbol.");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_rejection_keeps_plain_body() {
        let err = rejection(StatusCode::BAD_GATEWAY, "upstream down");
        match err {
            RequestError::Rejected { code, message, .. } => {
                assert_eq!(code, None);
                assert_eq!(message, "upstream down");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_process_request_maps_statuses() {
        let mut server = mockito::Server::new_async().await;
        let ok = server
            .mock("GET", "/ok")
            .with_status(200)
            .with_body(r#"{"value":1}"#)
            .create_async()
            .await;
        let limited = server
            .mock("GET", "/limited")
            .with_status(429)
            .create_async()
            .await;

        let request = Request::new(Duration::from_secs(5), None).unwrap();
        let value = request
            .process_request(Method::GET, format!("{}/ok", server.url()), None)
            .await
            .unwrap();
        assert_eq!(value["value"], 1);

        let err = request
            .process_request(Method::GET, format!("{}/limited", server.url()), None)
            .await
            .unwrap_err();
        assert!(matches!(err, RequestError::RateLimited(_)));

        let err = request
            .process_request(Method::POST, format!("{}/ok", server.url()), None)
            .await
            .unwrap_err();
        assert!(matches!(err, RequestError::MethodNotSupported(_)));

        ok.assert_async().await;
        limited.assert_async().await;
    }
}
