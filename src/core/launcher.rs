//! # Launching work.
//!
//! Two ways to start work, both returning a running [`Task`] immediately:
//!
//! - **Free functions** [`go`] and [`go_blocking`]: spawn on the ambient Tokio runtime,
//!   no event bus.
//! - **[`Launcher`]**: carries a [`Config`], a runtime handle and a [`Bus`]; every task
//!   it starts publishes lifecycle events to that bus.
//!
//! ## Flow
//! ```text
//! launch(work)
//!   ├─► Task::new(name, bus)             running = true
//!   ├─► runtime.spawn(run_work(task, work))   completion guard armed here
//!   └─► return Task                       (work may not have started yet)
//!
//! on the runtime:
//!   run_work ──► work.run(stop) ──► outcome ──► Task::complete(outcome)
//! ```
//!
//! The launcher never fails and never waits; every failure is reported
//! through [`Task::err`].

use std::future::Future;

use tokio::runtime::Handle;
use tokio::sync::broadcast;

use crate::{
    core::{Config, config::FALLBACK_NAME, runner},
    error::{RuntimeError, TaskError},
    events::{Bus, Event},
    tasks::{StopSignal, Task, Work, WorkFn},
};
use super::builder::LauncherBuilder;

/// Starts async work on the current Tokio runtime and returns its handle.
///
/// `f` receives the task's [`StopSignal`] and should return promptly once
/// [`StopSignal::should_stop`] reports `true`.
///
/// # Panics
/// Panics if called outside a Tokio runtime (same as [`tokio::spawn`]). To launch
/// from a plain thread, build a [`Launcher`] with
/// [`LauncherBuilder::with_runtime`] and use [`Launcher::launch_fn`].
///
/// # Example
/// ```
/// use runner::{StopSignal, TaskError};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let task = runner::go(|stop: StopSignal| async move {
///     while !stop.should_stop() {
///         tokio::task::yield_now().await;
///     }
///     Err::<(), _>(TaskError::Canceled)
/// });
/// assert!(task.running());
///
/// task.stop();
/// assert_eq!(task.wait().await, Some(TaskError::Canceled));
/// # }
/// ```
pub fn go<F, Fut>(f: F) -> Task
where
    F: FnOnce(StopSignal) -> Fut + Send + 'static,
    Fut: Future<Output = Result<(), TaskError>> + Send + 'static,
{
    let task = Task::new(FALLBACK_NAME, None);
    tokio::spawn(runner::run_work(task.clone(), WorkFn::new(FALLBACK_NAME, f)));
    task
}

/// Starts synchronous work on Tokio's blocking thread pool and returns its handle.
///
/// Use this for work that blocks (file I/O, CPU loops, foreign calls). The work
/// and any callbacks registered before it finishes run on the blocking thread.
///
/// # Panics
/// Panics if called outside a Tokio runtime (same as [`tokio::task::spawn_blocking`]).
/// From a plain thread, use [`Launcher::launch_blocking`] on a launcher built with
/// [`LauncherBuilder::with_runtime`].
pub fn go_blocking<F>(f: F) -> Task
where
    F: FnOnce(StopSignal) -> Result<(), TaskError> + Send + 'static,
{
    let task = Task::new(FALLBACK_NAME, None);
    tokio::task::spawn_blocking(runner::blocking_job(task.clone(), f));
    task
}

/// Launches work on a fixed runtime and publishes lifecycle events to a shared [`Bus`].
///
/// Not a pool: every launch spawns its own Tokio task (or blocking-pool job) and
/// nothing is queued, limited or retried.
#[derive(Debug)]
pub struct Launcher {
    cfg: Config,
    bus: Bus,
    runtime: Handle,
}

impl Launcher {
    /// Creates a builder for a launcher with the given configuration.
    pub fn builder(cfg: Config) -> LauncherBuilder {
        LauncherBuilder::new(cfg)
    }

    /// Creates a launcher on the current runtime with a fresh bus.
    ///
    /// ### Errors
    /// [`RuntimeError::NoRuntime`] outside a Tokio runtime.
    pub fn new(cfg: Config) -> Result<Self, RuntimeError> {
        Self::builder(cfg).build()
    }

    pub(crate) fn new_internal(cfg: Config, bus: Bus, runtime: Handle) -> Self {
        Self { cfg, bus, runtime }
    }

    /// Returns the configuration this launcher was built with.
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Returns the event bus tasks of this launcher publish to.
    pub fn bus(&self) -> &Bus {
        &self.bus
    }

    /// Subscribes to lifecycle events of every task started from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.bus.subscribe()
    }

    /// Starts `work` and returns its handle.
    pub fn launch<W: Work>(&self, work: W) -> Task {
        let task = Task::new(work.name(), Some(self.bus.clone()));
        self.runtime.spawn(runner::run_work(task.clone(), work));
        task
    }

    /// Starts a closure as async work named after [`Config::default_name`].
    pub fn launch_fn<F, Fut>(&self, f: F) -> Task
    where
        F: FnOnce(StopSignal) -> Fut + Send + 'static,
        Fut: Future<Output = Result<(), TaskError>> + Send + 'static,
    {
        self.launch(WorkFn::new(self.cfg.default_name().to_owned(), f))
    }

    /// Starts synchronous work on the runtime's blocking pool and returns its handle.
    pub fn launch_blocking<F>(&self, name: &str, f: F) -> Task
    where
        F: FnOnce(StopSignal) -> Result<(), TaskError> + Send + 'static,
    {
        let task = Task::new(name, Some(self.bus.clone()));
        self.runtime.spawn_blocking(runner::blocking_job(task.clone(), f));
        task
    }
}
