// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! The seam between the request executor and the network

use std::sync::Arc;

use async_trait::async_trait;

use super::{RequestDescription, RequestOutcome};

/// Something that can carry out a request.
///
/// Implementations must never fail out of `execute`: every fault is reported
/// as [`RequestOutcome::Failure`].
///
/// # Example
///
/// ```rust,no_run
/// use async_trait::async_trait;
/// use fetchpad::http::{RequestDescription, RequestOutcome, Transport};
///
/// struct Canned;
///
/// #[async_trait]
/// impl Transport for Canned {
///     async fn execute(&self, request: &RequestDescription) -> RequestOutcome {
///         RequestOutcome::success(200, format!("you asked for {}", request.url()))
///     }
/// }
/// ```
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: &RequestDescription) -> RequestOutcome;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn execute(&self, request: &RequestDescription) -> RequestOutcome {
        (**self).execute(request).await
    }
}
