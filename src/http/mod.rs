// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP layer for fetchpad
//!
//! Request descriptions, outcomes, and the reqwest-backed transport the
//! executor runs them on.

mod client;
mod method;
mod outcome;
mod request;
mod response;
mod transport;

pub use client::HttpClient;
pub use method::Method;
pub use outcome::RequestOutcome;
pub use request::{RequestBuilder, RequestDescription};
pub use response::Response;
pub use transport::Transport;

/// Default user agent string
pub const DEFAULT_USER_AGENT: &str = concat!("fetchpad/", env!("CARGO_PKG_VERSION"));
