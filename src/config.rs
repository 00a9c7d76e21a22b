// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Client, executor and CLI configuration

use std::time::Duration;

use crate::http::DEFAULT_USER_AGENT;

/// Environment variable overriding the request timeout, in seconds
pub const TIMEOUT_ENV: &str = "FETCHPAD_TIMEOUT_SECS";

/// Environment variable naming a proxy for all requests
pub const PROXY_ENV: &str = "FETCHPAD_PROXY";

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// User agent string
    pub user_agent: String,
    /// Deadline for a whole request, connect to last body byte
    pub timeout: Duration,
    /// Maximum redirects to follow
    pub max_redirects: usize,
    /// Accept invalid TLS certificates
    pub accept_invalid_certs: bool,
    /// Proxy URL
    pub proxy: Option<String>,
    /// Headers sent with every request, before the request's own headers
    pub default_headers: Vec<(String, String)>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(30),
            max_redirects: 10,
            accept_invalid_certs: false,
            proxy: None,
            default_headers: vec![],
        }
    }
}

impl ClientConfig {
    /// Create a new client config
    pub fn new() -> Self {
        Self::default()
    }

    /// Default config with `FETCHPAD_TIMEOUT_SECS` and `FETCHPAD_PROXY` /
    /// `HTTPS_PROXY` applied.
    ///
    /// Unparseable values are ignored with a warning.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup(TIMEOUT_ENV) {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config.timeout = Duration::from_secs(secs),
                _ => tracing::warn!(value = %raw, "Ignoring invalid {}", TIMEOUT_ENV),
            }
        }

        config.proxy = lookup(PROXY_ENV)
            .or_else(|| lookup("HTTPS_PROXY"))
            .filter(|p| !p.trim().is_empty());

        config
    }

    /// Set user agent
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set maximum redirects
    pub fn max_redirects(mut self, max: usize) -> Self {
        self.max_redirects = max;
        self
    }

    /// Accept invalid TLS certificates
    pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    /// Set proxy
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Add default header
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.push((name.into(), value.into()));
        self
    }
}

/// What happens to an outstanding request when a newer one is submitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SupersedePolicy {
    /// Let the old request run to completion and drop its result.
    #[default]
    Detach,
    /// Abort the old background task. The socket is closed when the task's
    /// future is dropped at its next await point.
    Abort,
}

/// Executor configuration
#[derive(Debug, Clone, Default)]
pub struct ExecutorConfig {
    pub supersede: SupersedePolicy,
}

impl ExecutorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the supersede policy
    pub fn supersede(mut self, policy: SupersedePolicy) -> Self {
        self.supersede = policy;
        self
    }
}

/// Terminal front-end configuration
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// How often the front-end polls the executor
    pub poll_interval: Duration,
    pub client: ClientConfig,
    pub executor: ExecutorConfig,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            // one frame at 60 Hz
            poll_interval: Duration::from_millis(16),
            client: ClientConfig::from_env(),
            executor: ExecutorConfig::default(),
        }
    }
}
