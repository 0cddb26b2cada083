//! # Lifecycle events emitted by launched tasks.
//!
//! The [`EventKind`] enum classifies what happened to a task; the [`Event`]
//! struct carries the metadata (sequence number, timestamp, task identity, reason).
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases monotonically.
//! Use `seq` to restore the exact order when events are delivered out of order.
//!
//! ## Example
//! ```rust
//! use runner::{Event, EventKind};
//!
//! let ev = Event::new(EventKind::TaskFailed)
//!     .with_task("demo-task")
//!     .with_task_id(7)
//!     .with_reason("boom");
//!
//! assert_eq!(ev.kind, EventKind::TaskFailed);
//! assert_eq!(ev.task.as_deref(), Some("demo-task"));
//! assert_eq!(ev.reason.as_deref(), Some("boom"));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::SystemTime;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of lifecycle events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// Work began executing on its own thread of execution.
    ///
    /// Sets:
    /// - `task`, `task_id`
    TaskStarting,

    /// [`Task::stop`](crate::Task::stop) was called for the first time.
    ///
    /// Sets:
    /// - `task`, `task_id`
    StopRequested,

    /// Work returned `Ok(())` or [`TaskError::Canceled`](crate::TaskError::Canceled).
    ///
    /// Sets:
    /// - `task`, `task_id`
    /// - `reason`: only when the work reported cancellation
    TaskStopped,

    /// Work returned (or was completed with) any other error.
    ///
    /// Sets:
    /// - `task`, `task_id`
    /// - `reason`: error message
    TaskFailed,

    /// A completion callback panicked; remaining callbacks still ran.
    ///
    /// Sets:
    /// - `task`, `task_id`
    /// - `reason`: panic info
    CallbackPanicked,
}

/// Lifecycle event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,
    /// Process-unique id of the task.
    pub task_id: Option<u64>,
    /// Name of the task.
    pub task: Option<Arc<str>>,
    /// Human-readable reason (errors, panic details).
    pub reason: Option<Arc<str>>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            task_id: None,
            task: None,
            reason: None,
        }
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Attaches a task name.
    #[inline]
    pub fn with_task(mut self, task: impl Into<Arc<str>>) -> Self {
        self.task = Some(task.into());
        self
    }

    /// Attaches a task id.
    #[inline]
    pub fn with_task_id(mut self, id: u64) -> Self {
        self.task_id = Some(id);
        self
    }

    /// True for [`EventKind::TaskStopped`] and [`EventKind::TaskFailed`].
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self.kind, EventKind::TaskStopped | EventKind::TaskFailed)
    }
}
