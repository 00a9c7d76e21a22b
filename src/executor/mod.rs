// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Request lifecycle
//!
//! One request in flight at a time, run on a background task and collected
//! by polling. Resubmitting while a request is in flight supersedes it.

mod executor;
mod state;

pub use executor::RequestExecutor;
pub use state::{ExecutorState, ExecutorStats};
