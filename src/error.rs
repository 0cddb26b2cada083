//! Error types used by the runner and by launched work.
//!
//! This module defines two error enums:
//!
//! - [`RuntimeError`] — errors raised while setting up a [`Launcher`](crate::Launcher).
//! - [`TaskError`] — the terminal outcome of a unit of work, as reported by [`Task::err`](crate::Task::err).
//!
//! Both types provide helper methods (`as_label`, `as_message`) for logging/metrics.

use std::any::Any;

use thiserror::Error;

/// # Errors produced while setting up the runner.
///
/// Launching itself never fails; these errors surface only when a
/// [`Launcher`](crate::Launcher) is built.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    /// No Tokio runtime handle was supplied and none is entered on the current thread.
    #[error("no tokio runtime available; call from within a runtime or supply a handle")]
    NoRuntime,
}

impl RuntimeError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use runner::RuntimeError;
    ///
    /// assert_eq!(RuntimeError::NoRuntime.as_label(), "runtime_missing");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            RuntimeError::NoRuntime => "runtime_missing",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            RuntimeError::NoRuntime => "no tokio runtime entered".to_string(),
        }
    }
}

/// # Terminal outcome of a unit of work.
///
/// Whatever the work returns is recorded as-is. The runner only produces
/// [`TaskError::Panicked`] and [`TaskError::Aborted`] on its own; every other
/// value comes from the work function.
///
/// Work that wants callers to tell "was stopped" apart from "failed" should
/// return [`TaskError::Canceled`] after observing a stop request.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    /// Work failed.
    #[error("execution failed: {error}")]
    Fail {
        /// The underlying error message.
        error: String,
    },

    /// Work observed a stop request and exited early.
    #[error("context cancelled")]
    Canceled,

    /// Work panicked; the panic was contained by the runner.
    #[error("work panicked: {info}")]
    Panicked {
        /// Panic payload rendered as text.
        info: String,
    },

    /// Work was dropped before it returned (its runtime shut down).
    #[error("work aborted before completion")]
    Aborted,
}

impl TaskError {
    /// Shorthand for [`TaskError::Fail`].
    ///
    /// # Example
    /// ```
    /// use runner::TaskError;
    ///
    /// let err = TaskError::fail("connection refused");
    /// assert_eq!(err.to_string(), "execution failed: connection refused");
    /// ```
    pub fn fail(error: impl Into<String>) -> Self {
        TaskError::Fail {
            error: error.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use runner::TaskError;
    ///
    /// assert_eq!(TaskError::Canceled.as_label(), "task_canceled");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            TaskError::Fail { .. } => "task_failed",
            TaskError::Canceled => "task_canceled",
            TaskError::Panicked { .. } => "task_panicked",
            TaskError::Aborted => "task_aborted",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            TaskError::Fail { error } => format!("error: {error}"),
            TaskError::Canceled => "context cancelled".to_string(),
            TaskError::Panicked { info } => format!("panic: {info}"),
            TaskError::Aborted => "aborted".to_string(),
        }
    }

    /// Returns `true` if the work reported that it stopped on request.
    pub fn is_canceled(&self) -> bool {
        matches!(self, TaskError::Canceled)
    }
}

/// Renders a panic payload caught by `catch_unwind` as text.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
