//! # One-shot completion signal.
//!
//! [`Done`] is unsignaled while the work runs and permanently signaled afterwards.
//! It is backed by a [`CancellationToken`] that is fired exactly once, which gives
//! the broadcast semantics for free: any number of waiters, and late waiters return
//! immediately instead of racing the writer.

use std::future::IntoFuture;

use tokio_util::sync::{CancellationToken, WaitForCancellationFutureOwned};

/// Waitable completion signal of a [`Task`](crate::Task).
///
/// Obtained from [`Task::done`](crate::Task::done). Cheap to clone; every clone
/// observes the same signal.
///
/// `Done` can be awaited directly:
/// ```no_run
/// # async fn demo(task: runner::Task) {
/// task.done().await;
/// assert!(!task.running());
/// # }
/// ```
#[derive(Clone, Debug, Default)]
pub struct Done {
    fired: CancellationToken,
}

impl Done {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Returns `true` once the task has completed.
    #[inline]
    pub fn is_done(&self) -> bool {
        self.fired.is_cancelled()
    }

    /// Waits until the task has completed.
    pub async fn wait(&self) {
        self.fired.cancelled().await
    }

    /// Blocks the current thread until the task has completed.
    ///
    /// Does not need a runtime. Must not be called from inside an async context
    /// that the work itself depends on.
    pub fn wait_blocking(&self) {
        if self.is_done() {
            return;
        }
        futures::executor::block_on(self.wait());
    }

    pub(crate) fn fire(&self) {
        self.fired.cancel();
    }
}

impl IntoFuture for Done {
    type Output = ();
    type IntoFuture = WaitForCancellationFutureOwned;

    fn into_future(self) -> Self::IntoFuture {
        self.fired.cancelled_owned()
    }
}
