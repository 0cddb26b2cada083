//! # Task handle and completion sequence.
//!
//! A [`Task`] is the caller's view of one unit of background work. It is created
//! already running by the launcher and completes exactly once, when the work returns.
//!
//! ## State
//! ```text
//! Task (Arc, cloneable)
//!   ├─ stop   : StopSignal        (atomic flag, never reset)
//!   ├─ state  : RwLock<State>     { running, err }
//!   ├─ thens  : Mutex<Thens>      { pending callbacks, fired }
//!   └─ done   : Done              (one-shot broadcast)
//! ```
//!
//! ## Completion sequence
//! ```text
//! complete(outcome):
//!   ├─ write(state): err = outcome, running = false      (one guard)
//!   ├─ loop:
//!   │    ├─ lock(thens): pending empty? ─► fired = true, done.fire(), exit
//!   │    └─ take pending, unlock, run batch in order
//!   └─ return
//! ```
//!
//! ## Rules
//! - `running == false` is never observable before `err` is recorded.
//! - `done` fires only after every callback registered before it has run.
//! - Callbacks run without any lock held, so they may call back into the handle
//!   (including [`Task::then`], which queues behind the current batch).
//! - A callback registered after `done` fired runs immediately on the caller's thread.

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, warn};

use crate::error::{TaskError, panic_message};
use crate::events::{Bus, Event, EventKind};
use crate::tasks::{Done, StopSignal};

/// Source of process-unique task ids.
static TASK_ID: AtomicU64 = AtomicU64::new(1);

type Callback = Box<dyn FnOnce() + Send + 'static>;

/// Handle to a unit of background work.
///
/// Cheap to clone; every clone refers to the same task and may call any method
/// from any thread.
///
/// # Example
/// ```
/// use std::sync::{Arc, Mutex};
/// use runner::{StopSignal, TaskError};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let log = Arc::new(Mutex::new(Vec::new()));
///
/// let task = runner::go(|stop: StopSignal| async move {
///     while !stop.should_stop() {
///         tokio::task::yield_now().await;
///     }
///     Err::<(), _>(TaskError::Canceled)
/// });
///
/// let (a, b) = (log.clone(), log.clone());
/// task.then(move || a.lock().unwrap().push("A"))
///     .then(move || b.lock().unwrap().push("B"));
///
/// task.stop();
/// task.done().await;
///
/// assert!(!task.running());
/// assert_eq!(task.err(), Some(TaskError::Canceled));
/// assert_eq!(*log.lock().unwrap(), ["A", "B"]);
/// # }
/// ```
#[derive(Clone)]
pub struct Task {
    inner: Arc<Inner>,
}

struct Inner {
    id: u64,
    name: Arc<str>,
    stop: StopSignal,
    state: RwLock<State>,
    thens: Mutex<Thens>,
    done: Done,
    bus: Option<Bus>,
}

struct State {
    running: bool,
    err: Option<TaskError>,
}

#[derive(Default)]
struct Thens {
    pending: Vec<Callback>,
    fired: bool,
}

impl Task {
    /// Creates a task in the running state. The caller must arrange for
    /// [`complete`](Self::complete) to be called exactly once.
    pub(crate) fn new(name: impl Into<Arc<str>>, bus: Option<Bus>) -> Self {
        Self {
            inner: Arc::new(Inner {
                id: TASK_ID.fetch_add(1, Ordering::Relaxed),
                name: name.into(),
                stop: StopSignal::new(),
                state: RwLock::new(State {
                    running: true,
                    err: None,
                }),
                thens: Mutex::new(Thens::default()),
                done: Done::new(),
                bus,
            }),
        }
    }

    /// Process-unique id of this task.
    pub fn id(&self) -> u64 {
        self.inner.id
    }

    /// Name given at launch.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Asks the work to stop.
    ///
    /// Only sets the flag the work polls; it neither blocks nor forces anything.
    /// Idempotent. Work that ignores the flag runs to its own completion.
    pub fn stop(&self) {
        if self.inner.stop.request() {
            debug!(task = %self.inner.name, id = self.inner.id, "stop requested");
            self.publish(Event::new(EventKind::StopRequested));
        }
    }

    /// Returns `true` once [`stop`](Self::stop) has been called.
    pub fn is_stop_requested(&self) -> bool {
        self.inner.stop.should_stop()
    }

    /// Returns `true` until the work has returned.
    ///
    /// Flips to `false` together with [`err`](Self::err), as the first step of
    /// completion. Callbacks registered with [`then`](Self::then) may still be
    /// running at that point; wait on [`done`](Self::done) to know they finished.
    pub fn running(&self) -> bool {
        self.read_state().running
    }

    /// Returns the outcome recorded at completion.
    ///
    /// `None` means success, or that the task is still running; check
    /// [`running`](Self::running) or wait on [`done`](Self::done) first.
    pub fn err(&self) -> Option<TaskError> {
        self.read_state().err.clone()
    }

    /// Registers a callback to run when the task completes.
    ///
    /// Callbacks registered before completion run in registration order, on the
    /// work's thread, before [`done`](Self::done) fires. A callback registered after
    /// completion runs immediately on the calling thread.
    ///
    /// Returns the same handle so registrations can be chained.
    pub fn then<F>(&self, f: F) -> &Self
    where
        F: FnOnce() + Send + 'static,
    {
        let mut thens = self.lock_thens();
        if thens.fired {
            drop(thens);
            self.invoke(Box::new(f));
        } else {
            thens.pending.push(Box::new(f));
        }
        self
    }

    /// Returns the one-shot completion signal.
    pub fn done(&self) -> Done {
        self.inner.done.clone()
    }

    /// Waits for completion and returns the recorded outcome.
    pub async fn wait(&self) -> Option<TaskError> {
        self.inner.done.wait().await;
        self.err()
    }

    /// Requests a stop, then waits for completion.
    pub async fn stop_and_wait(&self) -> Option<TaskError> {
        self.stop();
        self.wait().await
    }

    pub(crate) fn stop_signal(&self) -> StopSignal {
        self.inner.stop.clone()
    }

    /// Runs the completion sequence. Returns `false` if the task had already completed.
    pub(crate) fn complete(&self, outcome: Result<(), TaskError>) -> bool {
        {
            let mut state = self.write_state();
            if !state.running {
                return false;
            }
            state.err = outcome.err();
            state.running = false;
        }

        loop {
            let batch = {
                let mut thens = self.lock_thens();
                if thens.pending.is_empty() {
                    thens.fired = true;
                    self.inner.done.fire();
                    break;
                }
                std::mem::take(&mut thens.pending)
            };
            for cb in batch {
                self.invoke(cb);
            }
        }
        true
    }

    pub(crate) fn publish(&self, ev: Event) {
        if let Some(bus) = &self.inner.bus {
            bus.publish(ev.with_task(self.inner.name.clone()).with_task_id(self.inner.id));
        }
    }

    fn invoke(&self, cb: Callback) {
        if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(cb)) {
            let info = panic_message(payload.as_ref());
            warn!(task = %self.inner.name, id = self.inner.id, %info, "completion callback panicked");
            self.publish(Event::new(EventKind::CallbackPanicked).with_reason(info));
        }
    }

    // No user code runs under these locks, so a poisoned guard still holds consistent data.
    fn read_state(&self) -> RwLockReadGuard<'_, State> {
        self.inner.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, State> {
        self.inner.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_thens(&self) -> MutexGuard<'_, Thens> {
        self.inner.thens.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task")
            .field("id", &self.inner.id)
            .field("name", &self.inner.name)
            .field("running", &self.running())
            .field("stop_requested", &self.is_stop_requested())
            .finish()
    }
}
