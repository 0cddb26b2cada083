//! # Task handle, stop signal and units of work.
//!
//! This module provides the task-related types:
//! - [`Task`] - handle to one unit of background work
//! - [`StopSignal`] - cooperative stop flag handed to the work
//! - [`Done`] - one-shot completion signal
//! - [`Work`] - trait for named async work, with the closure-backed [`WorkFn`]

mod done;
mod handle;
mod stop;
mod work;
mod work_fn;

pub use done::Done;
pub use handle::Task;
pub use stop::StopSignal;
pub use work::{BoxWorkFuture, Work};
pub use work_fn::WorkFn;
