//! # Function-backed work (`WorkFn`)
//!
//! [`WorkFn`] wraps a closure `F: FnOnce(StopSignal) -> Fut` together with a name.
//! The closure is called once, on the runtime, when the work starts.
//!
//! ## Example
//! ```rust
//! use runner::{StopSignal, TaskError, Work, WorkFn};
//!
//! let w = WorkFn::new("worker", |stop: StopSignal| async move {
//!     while !stop.should_stop() {
//!         tokio::task::yield_now().await;
//!     }
//!     Err::<(), _>(TaskError::Canceled)
//! });
//!
//! assert_eq!(w.name(), "worker");
//! ```

use std::borrow::Cow;
use std::fmt;
use std::future::Future;

use crate::error::TaskError;
use crate::tasks::{BoxWorkFuture, StopSignal, Work};

/// Function-backed work implementation.
pub struct WorkFn<F> {
    name: Cow<'static, str>,
    f: F,
}

impl<F> WorkFn<F> {
    /// Creates new function-backed work.
    pub fn new(name: impl Into<Cow<'static, str>>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }
}

impl<F> fmt::Debug for WorkFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkFn").field("name", &self.name).finish()
    }
}

impl<F, Fut> Work for WorkFn<F>
where
    F: FnOnce(StopSignal) -> Fut + Send + 'static, // FnOnce: work never restarts
    Fut: Future<Output = Result<(), TaskError>> + Send + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn run(self, stop: StopSignal) -> BoxWorkFuture {
        // The closure runs on first poll, never at launch.
        Box::pin(async move { (self.f)(stop).await })
    }
}
