// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Request description and builder
//!
//! A [`RequestDescription`] is checked once, when it is built, and is
//! immutable afterwards. Only the URL is validated here, and only for
//! emptiness: URL syntax, header encoding and body handling are left to the
//! transport, which reports problems as a failed outcome.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::Method;
use crate::error::{Error, Result};

/// Everything needed to issue one HTTP request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRequest")]
pub struct RequestDescription {
    method: Method,
    url: String,
    headers: Vec<(String, String)>,
    body: String,
}

/// Unvalidated shape of a request as read from JSON
#[derive(Deserialize)]
struct RawRequest {
    #[serde(default)]
    method: Method,
    url: String,
    #[serde(default)]
    headers: Vec<(String, String)>,
    #[serde(default)]
    body: String,
}

impl TryFrom<RawRequest> for RequestDescription {
    type Error = Error;

    fn try_from(raw: RawRequest) -> Result<Self> {
        Self::build(raw.method, raw.url, raw.headers, raw.body)
    }
}

impl RequestDescription {
    /// Build a request description.
    ///
    /// Fails with [`Error::Validation`] when `url` is empty. Headers keep the
    /// order given and may repeat a key.
    pub fn build(
        method: Method,
        url: impl Into<String>,
        headers: Vec<(String, String)>,
        body: impl Into<String>,
    ) -> Result<Self> {
        let url = url.into();
        if url.is_empty() {
            return Err(Error::validation("URL must not be empty"));
        }

        Ok(Self {
            method,
            url,
            headers,
            body: body.into(),
        })
    }

    /// Start a fluent builder
    pub fn builder(method: Method, url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(method, url)
    }

    /// Read a request from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json(&data)
    }

    /// Parse a request from JSON
    pub fn from_json(data: &str) -> Result<Self> {
        serde_json::from_str(data).map_err(|e| {
            // try_from errors come back wrapped as a serde "custom" message
            if e.is_data() {
                Error::validation(e.to_string())
            } else {
                Error::from(e)
            }
        })
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// Whether there is a body to send
    pub fn has_body(&self) -> bool {
        !self.body.is_empty()
    }
}

/// Fluent builder for [`RequestDescription`]
#[derive(Debug, Clone, Default)]
pub struct RequestBuilder {
    method: Method,
    url: String,
    headers: Vec<(String, String)>,
    body: String,
}

impl RequestBuilder {
    /// Create a new request builder
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: String::new(),
        }
    }

    /// Append a header
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Append several headers
    pub fn headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.headers
            .extend(headers.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Set the body
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Validate and build the request
    pub fn build(self) -> Result<RequestDescription> {
        RequestDescription::build(self.method, self.url, self.headers, self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_url_rejected() {
        let err = RequestDescription::build(Method::Get, "", vec![], "").unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_minimal_request() {
        let req = RequestDescription::build(Method::Get, "https://example.test/a", vec![], "")
            .unwrap();
        assert_eq!(req.method(), Method::Get);
        assert_eq!(req.url(), "https://example.test/a");
        assert!(req.headers().is_empty());
        assert!(!req.has_body());
    }

    #[test]
    fn test_url_syntax_not_checked() {
        assert!(RequestDescription::build(Method::Get, "not a url", vec![], "").is_ok());
    }

    #[test]
    fn test_headers_keep_order_and_duplicates() {
        let req = RequestDescription::builder(Method::Post, "https://example.test")
            .header("x-b", "1")
            .header("x-a", "2")
            .header("x-b", "3")
            .body("payload")
            .build()
            .unwrap();
        let names: Vec<_> = req.headers().iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
        assert_eq!(names, vec![("x-b", "1"), ("x-a", "2"), ("x-b", "3")]);
        assert_eq!(req.body(), "payload");
    }

    #[test]
    fn test_body_allowed_on_get() {
        let req = RequestDescription::build(Method::Get, "https://example.test", vec![], "x")
            .unwrap();
        assert!(req.has_body());
    }

    #[test]
    fn test_from_json() {
        let req = RequestDescription::from_json(
            r#"{"method":"PUT","url":"https://example.test/item","headers":[["accept","text/plain"]],"body":"hi"}"#,
        )
        .unwrap();
        assert_eq!(req.method(), Method::Put);
        assert_eq!(req.headers()[0], ("accept".to_string(), "text/plain".to_string()));
        assert_eq!(req.body(), "hi");
    }

    #[test]
    fn test_from_json_method_any_case() {
        let req = RequestDescription::from_json(r#"{"method":"get","url":"https://example.test"}"#)
            .unwrap();
        assert_eq!(req.method(), Method::Get);

        let err = RequestDescription::from_json(r#"{"method":"fetch","url":"https://example.test"}"#)
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_from_json_defaults_and_validation() {
        let req = RequestDescription::from_json(r#"{"url":"https://example.test"}"#).unwrap();
        assert_eq!(req.method(), Method::Get);

        let err = RequestDescription::from_json(r#"{"url":""}"#).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));

        let err = RequestDescription::from_json("{").unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"method":"DELETE","url":"https://example.test/1"}}"#).unwrap();

        let req = RequestDescription::from_json_file(file.path()).unwrap();
        assert_eq!(req.method(), Method::Delete);
        assert_eq!(req.url(), "https://example.test/1");
    }
}
