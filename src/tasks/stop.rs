//! # Cooperative stop flag.
//!
//! [`StopSignal`] is what a unit of work receives: its [`should_stop`](StopSignal::should_stop)
//! method is the zero-argument "should I stop?" query. Nothing is ever preempted; the work
//! decides when to look at the flag and when to return.
//!
//! ## Memory ordering
//! ```text
//! Task::stop()            flag.swap(true, Release) ─┐
//!                         token.cancel()            │ happens-before
//! StopSignal::should_stop flag.load(Acquire) ◄──────┘
//! ```
//! The flag is a plain atomic so the query never contends with the task's state lock.
//! The [`CancellationToken`] is fired alongside it so async work can await the request.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio_util::sync::CancellationToken;

/// Stop request shared between a [`Task`](crate::Task) handle and its work.
///
/// Cheap to clone. Once requested, a stop is never withdrawn.
///
/// # Example
/// ```
/// use runner::StopSignal;
///
/// let stop = StopSignal::new();
/// assert!(!stop.should_stop());
/// assert!(stop.request());
/// assert!(!stop.request()); // already requested
/// assert!(stop.should_stop());
/// ```
#[derive(Clone, Debug, Default)]
pub struct StopSignal {
    flag: Arc<AtomicBool>,
    token: CancellationToken,
}

impl StopSignal {
    /// Creates a signal with no stop requested.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` once a stop has been requested.
    ///
    /// Work should call this periodically and return promptly when it reports `true`.
    #[inline]
    pub fn should_stop(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }

    /// Completes when a stop is requested (immediately if it already was).
    ///
    /// Lets async work `select!` on the request instead of polling.
    pub async fn stopped(&self) {
        self.token.cancelled().await
    }

    /// Requests a stop. Returns `true` only for the call that flipped the flag.
    pub fn request(&self) -> bool {
        let first = !self.flag.swap(true, Ordering::AcqRel);
        self.token.cancel();
        first
    }

    /// A token that is cancelled when a stop is requested.
    ///
    /// Useful to hand the request down to APIs that already speak [`CancellationToken`].
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }
}
