//! # Drive one unit of work to completion.
//!
//! Executes the work of a [`Task`] on its own thread of execution, contains panics,
//! and runs the task's completion sequence exactly once.
//!
//! ## Event flow
//!
//! ```text
//! Success:
//!   publish TaskStarting → work → Ok(())            → complete → publish TaskStopped
//!
//! Cancellation:
//!   publish TaskStarting → work → Err(Canceled)     → complete → publish TaskStopped
//!
//! Failure:
//!   publish TaskStarting → work → Err(Fail/...)     → complete → publish TaskFailed
//!
//! Panic:
//!   publish TaskStarting → work panics → Panicked   → complete → publish TaskFailed
//!
//! Dropped (runtime shut down mid-flight):
//!   publish TaskStarting → future dropped → Aborted → complete → publish TaskFailed
//!
//! Dropped before first poll (runtime shut down before scheduling it):
//!                          future dropped → Aborted → complete → publish TaskFailed
//! ```
//!
//! ## Rules
//! - Always publishes **exactly one** terminal event: `TaskStopped` or `TaskFailed`
//! - `Canceled` is treated as graceful exit → `TaskStopped` (not `TaskFailed`)
//! - The terminal event is published after callbacks ran and `done` fired

use std::panic::{self, AssertUnwindSafe};

use futures::FutureExt;
use tracing::{debug, warn};

use crate::{
    error::{TaskError, panic_message},
    events::{Event, EventKind},
    tasks::{StopSignal, Task, Work},
};

/// Returns the future that runs async `work` for `task` and completes it with the outcome.
///
/// The completion guard is armed here, before the future is spawned, so a future
/// that is dropped unpolled still completes the task.
pub(crate) fn run_work<W: Work>(
    task: Task,
    work: W,
) -> impl Future<Output = ()> + Send + 'static {
    let guard = CompletionGuard::new(task.clone());
    async move {
        publish_starting(&task);

        let outcome = match AssertUnwindSafe(work.run(task.stop_signal()))
            .catch_unwind()
            .await
        {
            Ok(res) => res,
            Err(payload) => Err(TaskError::Panicked {
                info: panic_message(payload.as_ref()),
            }),
        };
        guard.finish(outcome);
    }
}

/// Returns the blocking-pool job that runs synchronous `f` for `task`.
///
/// Like [`run_work`], the guard is armed before the job is handed to the pool.
pub(crate) fn blocking_job<F>(task: Task, f: F) -> impl FnOnce() + Send + 'static
where
    F: FnOnce(StopSignal) -> Result<(), TaskError> + Send + 'static,
{
    let guard = CompletionGuard::new(task.clone());
    move || {
        publish_starting(&task);

        let stop = task.stop_signal();
        let outcome = match panic::catch_unwind(AssertUnwindSafe(move || f(stop))) {
            Ok(res) => res,
            Err(payload) => Err(TaskError::Panicked {
                info: panic_message(payload.as_ref()),
            }),
        };
        guard.finish(outcome);
    }
}

/// Completes the task with [`TaskError::Aborted`] if dropped before [`finish`](Self::finish).
struct CompletionGuard {
    task: Option<Task>,
}

impl CompletionGuard {
    fn new(task: Task) -> Self {
        Self { task: Some(task) }
    }

    fn finish(mut self, outcome: Result<(), TaskError>) {
        if let Some(task) = self.task.take() {
            finish(&task, outcome);
        }
    }
}

impl Drop for CompletionGuard {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            finish(&task, Err(TaskError::Aborted));
        }
    }
}

fn publish_starting(task: &Task) {
    debug!(task = %task.name(), id = task.id(), "task starting");
    task.publish(Event::new(EventKind::TaskStarting));
}

/// Logs the outcome, runs the completion sequence, then publishes the terminal event.
fn finish(task: &Task, outcome: Result<(), TaskError>) {
    let ev = match &outcome {
        Ok(()) => {
            debug!(task = %task.name(), id = task.id(), "task stopped");
            Event::new(EventKind::TaskStopped)
        }
        Err(TaskError::Canceled) => {
            debug!(task = %task.name(), id = task.id(), "task canceled");
            Event::new(EventKind::TaskStopped).with_reason(TaskError::Canceled.to_string())
        }
        Err(e) => {
                warn!(
                task = %task.name(),
                id = task.id(),
                error = %e.as_message(),
                label = e.as_label(),
                "task failed"
            );
            Event::new(EventKind::TaskFailed).with_reason(e.to_string())
        }
    };

    if task.complete(outcome) {
        task.publish(ev);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Bus;
    use crate::tasks::WorkFn;

    fn kinds(rx: &mut tokio::sync::broadcast::Receiver<Event>) -> Vec<EventKind> {
        let mut out = Vec::new();
        while let Ok(ev) = rx.try_recv() {
            out.push(ev.kind);
        }
        out
    }

    #[tokio::test]
    async fn success_publishes_starting_then_stopped() {
        let bus = Bus::new(16);
        let mut rx = bus.subscribe();
        let task = Task::new("ok", Some(bus));

        run_work(
            task.clone(),
            WorkFn::new("ok", |_stop: StopSignal| async { Ok::<(), TaskError>(()) }),
        )
        .await;

        assert!(!task.running());
        assert_eq!(task.err(), None);
        assert_eq!(
            kinds(&mut rx),
            [EventKind::TaskStarting, EventKind::TaskStopped]
        );
    }

    #[tokio::test]
    async fn failure_is_recorded_and_published() {
        let bus = Bus::new(16);
        let mut rx = bus.subscribe();
        let task = Task::new("bad", Some(bus));

        run_work(
            task.clone(),
            WorkFn::new("bad", |_stop: StopSignal| async {
                Err::<(), _>(TaskError::fail("boom"))
            }),
        )
        .await;

        assert_eq!(task.err(), Some(TaskError::fail("boom")));
        assert_eq!(
            kinds(&mut rx),
            [EventKind::TaskStarting, EventKind::TaskFailed]
        );
    }

    #[tokio::test]
    async fn panic_becomes_panicked_error() {
        let task = Task::new("panicky", None);

        run_work(
            task.clone(),
            WorkFn::new("panicky", |_stop: StopSignal| async {
                if true {
                    panic!("work boom");
                }
                Ok::<(), TaskError>(())
            }),
        )
        .await;

        assert_eq!(
            task.err(),
            Some(TaskError::Panicked {
                info: "work boom".into()
            })
        );
        assert!(task.done().is_done());
    }

    #[test]
    fn blocking_work_sees_stop_and_reports_cancel() {
        let task = Task::new("blocking", None);
        task.stop();

        blocking_job(task.clone(), |stop| {
            if stop.should_stop() {
                Err(TaskError::Canceled)
            } else {
                Ok(())
            }
        })();

        assert_eq!(task.err(), Some(TaskError::Canceled));
    }

    #[test]
    fn dropped_work_completes_as_aborted() {
        let task = Task::new("dropped", None);
        let fut = run_work(
            task.clone(),
            WorkFn::new("dropped", |stop: StopSignal| async move {
                stop.stopped().await;
                Ok::<(), TaskError>(())
            }),
        );

        // Drop the future mid-flight.
        let mut fut = Box::pin(fut);
        assert!(futures::FutureExt::now_or_never(fut.as_mut()).is_none());
        drop(fut);

        assert!(!task.running());
        assert_eq!(task.err(), Some(TaskError::Aborted));
        assert!(task.done().is_done());
    }

    #[test]
    fn unpolled_work_completes_as_aborted() {
        let bus = Bus::new(16);
        let mut rx = bus.subscribe();
        let task = Task::new("never-polled", Some(bus));

        drop(run_work(
            task.clone(),
            WorkFn::new("never-polled", |_stop: StopSignal| async {
                Ok::<(), TaskError>(())
            }),
        ));

        assert!(!task.running());
        assert_eq!(task.err(), Some(TaskError::Aborted));
        assert!(task.done().is_done());
        assert_eq!(kinds(&mut rx), [EventKind::TaskFailed]);
    }

    #[test]
    fn unrun_blocking_job_completes_as_aborted() {
        let task = Task::new("never-run", None);

        drop(blocking_job(task.clone(), |_stop| Ok(())));

        assert!(!task.running());
        assert_eq!(task.err(), Some(TaskError::Aborted));
        assert!(task.done().is_done());
    }
}
