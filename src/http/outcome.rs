// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Terminal result of a request

use std::fmt;

use serde::{Deserialize, Serialize};

/// How a request ended.
///
/// Any response that made it back over the wire is a `Success`, whatever its
/// status. `Failure` is reserved for transport and protocol faults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RequestOutcome {
    /// The exchange completed. `status_code` is 0 when no status could be
    /// determined.
    Success { status_code: u16, body: String },
    /// The request never produced a response.
    Failure { reason: String },
}

impl RequestOutcome {
    pub fn success(status_code: u16, body: impl Into<String>) -> Self {
        RequestOutcome::Success {
            status_code,
            body: body.into(),
        }
    }

    pub fn failure(reason: impl Into<String>) -> Self {
        RequestOutcome::Failure {
            reason: reason.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, RequestOutcome::Success { .. })
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, RequestOutcome::Failure { .. })
    }

    /// Status code, if the exchange completed
    pub fn status_code(&self) -> Option<u16> {
        match self {
            RequestOutcome::Success { status_code, .. } => Some(*status_code),
            RequestOutcome::Failure { .. } => None,
        }
    }

    /// Response body, if the exchange completed
    pub fn body(&self) -> Option<&str> {
        match self {
            RequestOutcome::Success { body, .. } => Some(body),
            RequestOutcome::Failure { .. } => None,
        }
    }

    /// Failure reason, if the request failed
    pub fn reason(&self) -> Option<&str> {
        match self {
            RequestOutcome::Failure { reason } => Some(reason),
            RequestOutcome::Success { .. } => None,
        }
    }
}

impl fmt::Display for RequestOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestOutcome::Success { status_code: 0, .. } => write!(f, "Status: No Response"),
            RequestOutcome::Success { status_code, body } => {
                write!(f, "Status: {}\n\n{}", status_code, body)
            }
            RequestOutcome::Failure { reason } => write!(f, "Error: {}", reason),
        }
    }
}
