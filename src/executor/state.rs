// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! What a poll can observe

use crate::http::RequestOutcome;

/// Executor state as seen by the polling caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutorState {
    /// Nothing submitted, or the last result was already handed out
    Idle,
    /// The most recent submission is still running
    Pending,
    /// The most recent submission finished. Delivered once.
    Completed(RequestOutcome),
}

impl ExecutorState {
    pub fn is_idle(&self) -> bool {
        matches!(self, ExecutorState::Idle)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, ExecutorState::Pending)
    }

    /// The delivered outcome, if any
    pub fn outcome(&self) -> Option<&RequestOutcome> {
        match self {
            ExecutorState::Completed(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn into_outcome(self) -> Option<RequestOutcome> {
        match self {
            ExecutorState::Completed(outcome) => Some(outcome),
            _ => None,
        }
    }
}

/// Executor counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecutorStats {
    /// Total submissions
    pub submitted: u64,
    /// Submissions made while an older one was still pending
    pub superseded: u64,
    /// Outcomes handed to the caller through `poll`
    pub delivered: u64,
    /// Outcomes that arrived for an old generation and were dropped
    pub discarded: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let state = ExecutorState::Completed(RequestOutcome::success(200, "ok"));
        assert!(!state.is_idle());
        assert_eq!(state.outcome().and_then(|o| o.status_code()), Some(200));
        assert_eq!(
            state.into_outcome(),
            Some(RequestOutcome::success(200, "ok"))
        );
        assert!(ExecutorState::Pending.outcome().is_none());
    }
}
