//! # Example: launcher_events
//!
//! Starts a few named units of work through a [`Launcher`] and prints every
//! lifecycle event they publish.
//!
//! ## Run
//! ```bash
//! cargo run --example launcher_events
//! ```

use std::time::Duration;

use runner::{Config, EventKind, Launcher, StopSignal, TaskError, WorkFn};
use tokio::sync::broadcast::error::RecvError;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_target(false).init();

    let launcher = Launcher::new(Config::default())?;
    let mut rx = launcher.subscribe();

    let printer = tokio::spawn(async move {
        let mut terminal = 0;
        while terminal < 3 {
            match rx.recv().await {
                Ok(ev) => {
                    let label = match ev.kind {
                        EventKind::TaskStarting => "starting",
                        EventKind::StopRequested => "stop-requested",
                        EventKind::TaskStopped => "stopped",
                        EventKind::TaskFailed => "failed",
                        EventKind::CallbackPanicked => "callback-panicked",
                    };
                    println!(
                        "[{label}] seq={} task={:?} id={:?} reason={:?}",
                        ev.seq, ev.task, ev.task_id, ev.reason
                    );
                    if ev.is_terminal() {
                        terminal += 1;
                    }
                }
                Err(RecvError::Lagged(n)) => println!("[lagged] skipped {n}"),
                Err(RecvError::Closed) => break,
            }
        }
    });

    let quick = launcher.launch(WorkFn::new("quick", |_stop: StopSignal| async {
        Ok::<(), TaskError>(())
    }));
    let flaky = launcher.launch(WorkFn::new("flaky", |_stop: StopSignal| async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        Err::<(), _>(TaskError::fail("upstream unavailable"))
    }));
    let blocking = launcher.launch_blocking("blocking", |stop| {
        while !stop.should_stop() {
            std::thread::sleep(Duration::from_millis(10));
        }
        Err(TaskError::Canceled)
    });

    tokio::time::sleep(Duration::from_millis(100)).await;
    blocking.stop();

    for task in [&quick, &flaky, &blocking] {
        let err = task.wait().await;
        println!("[main] {} -> {:?}", task.name(), err);
    }

    printer.await?;
    Ok(())
}
