// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! # fetchpad - Single-Slot HTTP Request Maker
//!
//! Fire an HTTP request, keep drawing, pick up the result when it is done.
//! Built for UI loops that must never block on the network.
//!
//! ## Features
//!
//! - Non-blocking: `submit` and `poll` return immediately
//! - Single slot: one request in flight, a new submit supersedes the old one
//! - Generation tagging: late results of superseded requests are dropped
//! - Failures as data: transport errors come back as an outcome, never a panic
//! - Pluggable transport: reqwest by default, anything implementing `Transport`
//!
//! ## Example
//!
//! ```rust,no_run
//! use fetchpad::{ExecutorState, HttpClient, Method, RequestDescription, RequestExecutor};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let executor = RequestExecutor::new(HttpClient::new()?)?;
//!
//!     let request = RequestDescription::builder(Method::Get, "https://example.com")
//!         .header("accept", "text/html")
//!         .build()?;
//!     executor.submit(request);
//!
//!     let mut ticker = tokio::time::interval(std::time::Duration::from_millis(16));
//!     loop {
//!         ticker.tick().await;
//!         if let ExecutorState::Completed(outcome) = executor.poll() {
//!             println!("{}", outcome);
//!             break;
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod executor;
pub mod http;

// Config
pub use config::{ClientConfig, CliConfig, ExecutorConfig, SupersedePolicy};

// Errors
pub use error::{Error, Result};

// Executor
pub use executor::{ExecutorState, ExecutorStats, RequestExecutor};

// HTTP
pub use http::{HttpClient, Method, RequestBuilder, RequestDescription, RequestOutcome, Transport};

/// fetchpad version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
