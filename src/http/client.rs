// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! reqwest-backed transport

use std::time::Instant;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::redirect::Policy;
use reqwest::Client;
use url::Url;

use super::response::Response;
use super::{RequestDescription, RequestOutcome, Transport};
use crate::config::ClientConfig;
use crate::error::{Error, Result};

/// HTTP client
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    config: ClientConfig,
}

impl HttpClient {
    /// Create a new HTTP client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let mut default_headers = HeaderMap::new();
        for (name, value) in &config.default_headers {
            let (name, value) = encode_header(name, value)
                .map_err(|e| Error::config(format!("Invalid default header: {}", e)))?;
            default_headers.append(name, value);
        }

        let mut builder = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .redirect(Policy::limited(config.max_redirects))
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .default_headers(default_headers);

        if let Some(ref proxy_url) = config.proxy {
            builder = builder.proxy(
                reqwest::Proxy::all(proxy_url)
                    .map_err(|e| Error::config(format!("Invalid proxy URL: {}", e)))?,
            );
        }

        let client = builder.build()?;

        Ok(Self { client, config })
    }

    /// Get client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Send a request and collect the whole response.
    ///
    /// Any status, including 4xx and 5xx, is a successful exchange.
    pub async fn send(&self, request: &RequestDescription) -> Result<Response> {
        let start = Instant::now();
        let url = Url::parse(request.url())?;

        let mut builder = self.client.request(request.method().into(), url.clone());

        // reqwest appends, so repeated names go out as repeated header lines
        for (name, value) in request.headers() {
            let (name, value) = encode_header(name, value)?;
            builder = builder.header(name, value);
        }

        if request.has_body() {
            builder = builder.body(request.body().to_owned());
        }

        let response = builder.send().await.map_err(|e| self.classify(e, &url))?;
        let final_url = response.url().clone();
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(|e| self.classify(e, &url))?;
        let response_time = start.elapsed().as_millis() as u64;
        let response = Response::new(status, headers, body, final_url, response_time);

        tracing::info!(
            method = %request.method(),
            url = %response.url,
            status = response.status_code(),
            content_type = response.header("content-type").unwrap_or("-"),
            bytes = response.body_len(),
            time_ms = response.response_time_ms,
            "Response"
        );

        Ok(response)
    }

    fn classify(&self, error: reqwest::Error, url: &Url) -> Error {
        if error.is_timeout() {
            Error::timeout(url.as_str(), self.config.timeout.as_millis() as u64)
        } else {
            Error::Http(error)
        }
    }
}

#[async_trait]
impl Transport for HttpClient {
    async fn execute(&self, request: &RequestDescription) -> RequestOutcome {
        match self.send(request).await {
            Ok(response) => response.into(),
            // The executor decides whether this is worth a warning: the
            // request may already be superseded.
            Err(e) => {
                let reason = e.describe();
                tracing::debug!(
                    method = %request.method(),
                    url = %request.url(),
                    error = %reason,
                    "Request failed"
                );
                RequestOutcome::failure(reason)
            }
        }
    }
}

fn encode_header(name: &str, value: &str) -> Result<(HeaderName, HeaderValue)> {
    let header_name =
        HeaderName::try_from(name.trim()).map_err(|e| Error::invalid_header(name, e))?;
    let header_value =
        HeaderValue::try_from(value.trim()).map_err(|e| Error::invalid_header(name, e))?;
    Ok((header_name, header_value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::Method;
    use std::time::Duration;
    use wiremock::matchers::{body_string, header, headers, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_client_creation() {
        let client = HttpClient::new().unwrap();
        assert_eq!(client.config().user_agent, crate::http::DEFAULT_USER_AGENT);
    }

    #[test]
    fn test_bad_proxy_is_config_error() {
        let result = HttpClient::with_config(ClientConfig::new().proxy("::not a proxy::"));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_bad_default_header_is_config_error() {
        let result = HttpClient::with_config(ClientConfig::new().header("bad name", "x"));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[tokio::test]
    async fn test_sends_method_headers_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/items"))
            .and(headers("x-dup", vec!["1", "2"]))
            .and(header("content-type", "application/json"))
            .and(body_string(r#"{"name":"widget"}"#))
            .respond_with(ResponseTemplate::new(201).set_body_string("created"))
            .expect(1)
            .mount(&server)
            .await;

        let request = RequestDescription::builder(Method::Post, format!("{}/items", server.uri()))
            .header("x-dup", "1")
            .header("content-type", "application/json")
            .header("x-dup", "2")
            .body(r#"{"name":"widget"}"#)
            .build()
            .unwrap();

        let outcome = HttpClient::new().unwrap().execute(&request).await;
        assert_eq!(outcome, RequestOutcome::success(201, "created"));
    }

    #[tokio::test]
    async fn test_error_status_is_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let request = RequestDescription::build(Method::Get, server.uri(), vec![], "").unwrap();
        let outcome = HttpClient::new().unwrap().execute(&request).await;
        assert_eq!(outcome, RequestOutcome::success(500, "boom"));
    }

    #[tokio::test]
    async fn test_default_headers_sent() {
        let server = MockServer::start().await;
        Mock::given(header("x-tool", "fetchpad"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpClient::with_config(ClientConfig::new().header("x-tool", "fetchpad"))
            .unwrap();
        let request = RequestDescription::build(Method::Delete, server.uri(), vec![], "").unwrap();
        assert_eq!(client.execute(&request).await.status_code(), Some(204));
    }

    #[tokio::test]
    async fn test_connection_refused_is_failure() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let request =
            RequestDescription::build(Method::Get, format!("http://{}/", addr), vec![], "").unwrap();
        let outcome = HttpClient::new().unwrap().execute(&request).await;
        assert!(outcome.is_failure());
        assert!(!outcome.reason().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_timeout_is_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
            .mount(&server)
            .await;

        let client =
            HttpClient::with_config(ClientConfig::new().timeout(Duration::from_millis(100)))
                .unwrap();
        let request = RequestDescription::build(Method::Get, server.uri(), vec![], "").unwrap();
        let outcome = client.execute(&request).await;
        assert!(outcome.reason().unwrap().contains("timed out"));
    }

    #[tokio::test]
    async fn test_malformed_request_is_failure() {
        let client = HttpClient::new().unwrap();

        let bad_url = RequestDescription::build(Method::Get, "not a url", vec![], "").unwrap();
        let outcome = client.execute(&bad_url).await;
        assert!(outcome.reason().unwrap().starts_with("Invalid URL"));

        let bad_header = RequestDescription::builder(Method::Get, "http://127.0.0.1:9/")
            .header("bad name", "x")
            .build()
            .unwrap();
        let outcome = client.execute(&bad_header).await;
        assert!(outcome.reason().unwrap().starts_with("Invalid header"));
    }
}
