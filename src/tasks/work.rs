//! # Unit of work abstraction.
//!
//! This module defines the [`Work`] trait: a named, one-shot async unit that receives a
//! [`StopSignal`] and returns its outcome. A closure-backed implementation lives in
//! [`WorkFn`](crate::WorkFn).
//!
//! Work should periodically check [`StopSignal::should_stop`] (or await
//! [`StopSignal::stopped`]) and return promptly once a stop was requested.

use std::future::Future;
use std::pin::Pin;

use crate::{error::TaskError, tasks::StopSignal};

/// Boxed future returned by [`Work::run`].
pub type BoxWorkFuture = Pin<Box<dyn Future<Output = Result<(), TaskError>> + Send + 'static>>;

/// # Asynchronous, stoppable unit of work.
///
/// A `Work` has a human-readable [`name`](Work::name) and a consuming [`run`](Work::run)
/// method: it runs exactly once, so it may move owned state into its future.
///
/// # Example
/// ```
/// use runner::{BoxWorkFuture, StopSignal, TaskError, Work};
///
/// struct Ticker { ticks: u32 }
///
/// impl Work for Ticker {
///     fn name(&self) -> &str { "ticker" }
///
///     fn run(self, stop: StopSignal) -> BoxWorkFuture {
///         Box::pin(async move {
///             for _ in 0..self.ticks {
///                 if stop.should_stop() {
///                     return Err(TaskError::Canceled);
///                 }
///                 tokio::task::yield_now().await;
///             }
///             Ok(())
///         })
///     }
/// }
/// ```
pub trait Work: Send + 'static {
    /// Returns a human-readable name used in logs and events.
    fn name(&self) -> &str;

    /// Consumes the work and produces the future that performs it.
    ///
    /// The future is polled on the runtime, never on the launching caller.
    fn run(self, stop: StopSignal) -> BoxWorkFuture;
}
