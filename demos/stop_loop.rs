//! # Example: stop_loop
//!
//! Launches a worker that ticks until told to stop, attaches two completion
//! callbacks, stops it after a short delay and reports the outcome.
//!
//! ## Flow
//! ```text
//! main()
//!   ├─► runner::go(worker)          worker ticks every 100ms
//!   ├─► task.then(A).then(B)        queued until completion
//!   ├─► sleep 350ms
//!   ├─► task.stop()                 worker sees should_stop() on next tick
//!   └─► task.done().await           A, B already ran
//! ```
//!
//! ## Run
//! ```bash
//! RUST_LOG=debug cargo run --example stop_loop
//! ```

use std::time::Duration;

use runner::{StopSignal, TaskError};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== stop_loop example ===\n");

    let task = runner::go(|stop: StopSignal| async move {
        let mut tick = 0u32;
        loop {
            if stop.should_stop() {
                println!("[worker] stop requested after {tick} ticks");
                return Err(TaskError::Canceled);
            }
            tick += 1;
            println!("[worker] tick #{tick}");
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
    });

    task.then(|| println!("[then] A"))
        .then(|| println!("[then] B"));

    tokio::time::sleep(Duration::from_millis(350)).await;
    println!("[main] stopping");
    task.stop();

    task.done().await;
    println!(
        "[main] running={} err={:?}",
        task.running(),
        task.err().map(|e| e.as_label())
    );
    Ok(())
}
