// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Single-slot request executor

use std::any::Any;
use std::fmt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use super::state::{ExecutorState, ExecutorStats};
use crate::config::{ExecutorConfig, SupersedePolicy};
use crate::error::{Error, Result};
use crate::http::{RequestDescription, RequestOutcome, Transport};

/// Runs one request at a time in the background and lets the caller poll
/// for its result without blocking.
///
/// Every `submit` starts a new generation. Only the latest generation's
/// outcome is ever returned from [`poll`](Self::poll); results from older
/// generations are dropped when they arrive, in whatever order they arrive.
///
/// Superseded requests are not cancelled under the default
/// [`SupersedePolicy::Detach`]: they keep their connection until they finish
/// or time out. Use [`SupersedePolicy::Abort`] to drop them instead.
///
/// # Example
///
/// ```rust,no_run
/// use fetchpad::{ExecutorState, HttpClient, Method, RequestDescription, RequestExecutor};
///
/// # async fn run() -> fetchpad::Result<()> {
/// let executor = RequestExecutor::new(HttpClient::new()?)?;
/// executor.submit(RequestDescription::build(Method::Get, "https://example.com", vec![], "")?);
///
/// loop {
///     match executor.poll() {
///         ExecutorState::Completed(outcome) => {
///             println!("{}", outcome);
///             break;
///         }
///         _ => tokio::time::sleep(std::time::Duration::from_millis(16)).await,
///     }
/// }
/// # Ok(())
/// # }
/// ```
pub struct RequestExecutor {
    transport: Arc<dyn Transport>,
    runtime: Handle,
    config: ExecutorConfig,
    slot: Arc<Mutex<Slot>>,
}

/// Shared between the executor and its background tasks. The generation
/// check and the outcome write happen under this one lock.
#[derive(Default)]
struct Slot {
    generation: u64,
    state: SlotState,
    task: Option<JoinHandle<()>>,
    stats: ExecutorStats,
}

impl Slot {
    /// Settle a pending generation whose task ended without writing an
    /// outcome. This happens when the runtime shuts down under the task, or
    /// refuses the spawn because it is already gone.
    fn reap_lost_task(&mut self) {
        if !matches!(self.state, SlotState::Pending) {
            return;
        }
        let lost = self.task.as_ref().map_or(true, |task| task.is_finished());
        if lost {
            tracing::warn!(generation = self.generation, "Request task ended without a result");
            self.state = SlotState::Ready(RequestOutcome::failure("request task was cancelled"));
            self.task = None;
        }
    }
}

#[derive(Default)]
enum SlotState {
    #[default]
    Idle,
    Pending,
    Ready(RequestOutcome),
}

impl RequestExecutor {
    /// Create an executor on the current tokio runtime
    pub fn new(transport: impl Transport + 'static) -> Result<Self> {
        let runtime = Handle::try_current().map_err(|_| {
            Error::config("RequestExecutor::new must be called from within a tokio runtime")
        })?;
        Ok(Self::with_handle(transport, runtime, ExecutorConfig::default()))
    }

    /// Create an executor that spawns onto `runtime`.
    ///
    /// `submit` and `poll` can then be called from any thread, including one
    /// that is not part of the runtime.
    pub fn with_handle(
        transport: impl Transport + 'static,
        runtime: Handle,
        config: ExecutorConfig,
    ) -> Self {
        Self {
            transport: Arc::new(transport),
            runtime,
            config,
            slot: Arc::new(Mutex::new(Slot::default())),
        }
    }

    /// Start executing `request` in the background and return its generation.
    ///
    /// Never waits. A request that is still pending is superseded: its
    /// outcome will not be delivered.
    pub fn submit(&self, request: RequestDescription) -> u64 {
        let mut slot = self.slot.lock();

        let superseded = matches!(slot.state, SlotState::Pending);
        slot.generation += 1;
        slot.state = SlotState::Pending;
        slot.stats.submitted += 1;
        if superseded {
            slot.stats.superseded += 1;
        }

        let generation = slot.generation;
        tracing::debug!(
            generation,
            method = %request.method(),
            url = %request.url(),
            superseded,
            "Submitting request"
        );

        let task = self.runtime.spawn(run(
            Arc::clone(&self.transport),
            request,
            generation,
            Arc::clone(&self.slot),
        ));

        let previous = slot.task.replace(task);
        drop(slot);

        if let Some(previous) = previous {
            if superseded && self.config.supersede == SupersedePolicy::Abort {
                tracing::debug!(generation = generation - 1, "Aborting superseded request");
                previous.abort();
            }
        }

        generation
    }

    /// Check on the latest submission without waiting.
    ///
    /// A finished outcome is returned once; later polls report
    /// [`ExecutorState::Idle`] until the next `submit`.
    pub fn poll(&self) -> ExecutorState {
        let mut slot = self.slot.lock();
        slot.reap_lost_task();
        match std::mem::take(&mut slot.state) {
            SlotState::Idle => ExecutorState::Idle,
            SlotState::Pending => {
                slot.state = SlotState::Pending;
                ExecutorState::Pending
            }
            SlotState::Ready(outcome) => {
                slot.stats.delivered += 1;
                ExecutorState::Completed(outcome)
            }
        }
    }

    /// Generation of the most recent submission, 0 before the first
    pub fn generation(&self) -> u64 {
        self.slot.lock().generation
    }

    /// Whether the latest submission is still running
    pub fn is_pending(&self) -> bool {
        let mut slot = self.slot.lock();
        slot.reap_lost_task();
        matches!(slot.state, SlotState::Pending)
    }

    pub fn stats(&self) -> ExecutorStats {
        self.slot.lock().stats
    }

    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }
}

impl fmt::Debug for RequestExecutor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slot = self.slot.lock();
        f.debug_struct("RequestExecutor")
            .field("generation", &slot.generation)
            .field("pending", &matches!(slot.state, SlotState::Pending))
            .field("config", &self.config)
            .finish()
    }
}

impl Drop for RequestExecutor {
    fn drop(&mut self) {
        if self.config.supersede == SupersedePolicy::Abort {
            if let Some(task) = self.slot.lock().task.take() {
                task.abort();
            }
        }
    }
}

/// Background half of a submission
async fn run(
    transport: Arc<dyn Transport>,
    request: RequestDescription,
    generation: u64,
    slot: Arc<Mutex<Slot>>,
) {
    let outcome = match AssertUnwindSafe(transport.execute(&request))
        .catch_unwind()
        .await
    {
        Ok(outcome) => outcome,
        Err(panic) => {
            let message = panic_message(&*panic);
            tracing::error!(generation, url = %request.url(), "Transport panicked: {}", message);
            RequestOutcome::failure(format!("transport panicked: {}", message))
        }
    };

    let mut slot = slot.lock();
    if slot.generation == generation {
        if let Some(reason) = outcome.reason() {
            tracing::warn!(generation, url = %request.url(), error = %reason, "Request failed");
        }
        slot.state = SlotState::Ready(outcome);
        slot.task = None;
    } else {
        slot.stats.discarded += 1;
        let latest = slot.generation;
        drop(slot);
        tracing::debug!(generation, latest, "Dropping result of superseded request");
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
