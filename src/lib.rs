//! # runner
//!
//! **runner** launches a unit of work in the background and hands back a [`Task`]
//! handle to stop it cooperatively, observe completion, read its outcome, and attach
//! completion callbacks.
//!
//! Stopping is cooperative: the work receives a [`StopSignal`] and is expected to poll
//! [`StopSignal::should_stop`] and return on its own. Nothing is ever force-terminated,
//! timed out, retried or restarted.
//!
//! ## Architecture
//! ```text
//!   caller                                   runtime (Tokio task / blocking thread)
//!   ──────                                   ──────────────────────────────────────
//!   go(work) / Launcher::launch(work)
//!     ├─► Task { running = true } ──────────► run_work(task, work)
//!     └─► returns Task immediately              │
//!                                               ├─► publish TaskStarting
//!   task.stop()  ── StopSignal (atomic) ──────► ├─► work(stop) … stop.should_stop()?
//!   task.then(cb)── queued callbacks            │
//!   task.running() / task.err()                 ├─► complete(outcome):
//!                                               │     ├─ err = outcome, running = false
//!   task.done().await ◄──── Done (one-shot) ────│     ├─ run callbacks in order
//!                                               │     └─ fire Done
//!                                               └─► publish TaskStopped / TaskFailed
//! ```
//!
//! ### Lifecycle
//! ```text
//!   running ──(work returns / panics / is dropped)──► completed
//! ```
//! There is exactly one transition and it happens exactly once.
//!
//! ## Features
//! | Area              | Description                                                   | Key types                              |
//! |-------------------|---------------------------------------------------------------|----------------------------------------|
//! | **Launching**     | Start async or blocking work, get a handle back immediately.  | [`go`], [`go_blocking`], [`Launcher`]  |
//! | **Control**       | Cooperative stop, status, outcome, completion callbacks.      | [`Task`], [`StopSignal`]               |
//! | **Completion**    | One-shot broadcast signal, awaitable or blocking.             | [`Done`]                               |
//! | **Work**          | Named units of work as closures or trait impls.               | [`Work`], [`WorkFn`]                   |
//! | **Events**        | Lifecycle events on a broadcast bus (launcher tasks only).    | [`Event`], [`EventKind`], [`Bus`]      |
//! | **Errors**        | Typed outcomes and setup errors.                              | [`TaskError`], [`RuntimeError`]        |
//! | **Configuration** | Launcher settings.                                            | [`Config`], [`LauncherBuilder`]        |
//!
//! ## Example
//! ```rust
//! use std::sync::{Arc, Mutex};
//! use std::time::Duration;
//! use runner::{Config, Launcher, StopSignal, TaskError};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let launcher = Launcher::new(Config::default())?;
//!
//!     let log = Arc::new(Mutex::new(Vec::new()));
//!     let task = launcher.launch_fn(|stop: StopSignal| async move {
//!         while !stop.should_stop() {
//!             tokio::time::sleep(Duration::from_millis(5)).await;
//!         }
//!         Err::<(), _>(TaskError::Canceled)
//!     });
//!
//!     let l = log.clone();
//!     task.then(move || l.lock().unwrap().push("cleanup"));
//!
//!     tokio::time::sleep(Duration::from_millis(20)).await;
//!     task.stop();
//!     task.done().await;
//!
//!     assert!(!task.running());
//!     assert_eq!(task.err(), Some(TaskError::Canceled));
//!     assert_eq!(*log.lock().unwrap(), ["cleanup"]);
//!     Ok(())
//! }
//! ```
mod core;
mod error;
mod events;
mod tasks;

// ---- Public re-exports ----

pub use self::core::{Config, Launcher, LauncherBuilder, go, go_blocking};
pub use error::{RuntimeError, TaskError};
pub use events::{Bus, Event, EventKind};
pub use tasks::{BoxWorkFuture, Done, StopSignal, Task, Work, WorkFn};
