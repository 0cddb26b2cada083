use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use runner::{StopSignal, TaskError};
use tokio::time::timeout;

const LIMIT: Duration = Duration::from_secs(5);

#[tokio::test]
async fn stop_after_delay_yields_designated_error() {
    let task = runner::go(|stop: StopSignal| async move {
        loop {
            if stop.should_stop() {
                return Err(TaskError::Canceled);
            }
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
    });
    assert!(task.running());

    tokio::time::sleep(Duration::from_millis(20)).await;
    assert!(task.running(), "work must not stop on its own");
    task.stop();

    timeout(LIMIT, task.done()).await.expect("task completes");
    assert!(!task.running());
    assert_eq!(task.err(), Some(TaskError::Canceled));
}

#[tokio::test]
async fn then_callbacks_run_in_order_and_success_has_no_error() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let (gate_tx, gate_rx) = tokio::sync::oneshot::channel::<()>();

    let task = runner::go(|_stop: StopSignal| async move {
        let _ = gate_rx.await;
        Ok(())
    });

    let (a, b) = (log.clone(), log.clone());
    task.then(move || a.lock().unwrap().push("A"))
        .then(move || b.lock().unwrap().push("B"));
    gate_tx.send(()).unwrap();

    timeout(LIMIT, task.done()).await.expect("task completes");
    assert_eq!(*log.lock().unwrap(), ["A", "B"]);
    assert_eq!(task.err(), None);
}

#[tokio::test]
async fn err_while_running_is_empty_and_does_not_block() {
    let task = runner::go(|stop: StopSignal| async move {
        stop.stopped().await;
        Err(TaskError::fail("stopped late"))
    });

    assert_eq!(task.err(), None);
    assert!(task.running());

    task.stop();
    assert_eq!(
        timeout(LIMIT, task.wait()).await.unwrap(),
        Some(TaskError::fail("stopped late"))
    );
}

#[tokio::test]
async fn err_returns_exact_work_outcome() {
    let task = runner::go(|_stop: StopSignal| async { Err(TaskError::fail("disk full")) });
    timeout(LIMIT, task.done()).await.unwrap();
    assert_eq!(
        task.err(),
        Some(TaskError::Fail {
            error: "disk full".into()
        })
    );
}

#[tokio::test]
async fn work_ignoring_stop_runs_to_natural_completion() {
    let iterations = Arc::new(AtomicUsize::new(0));
    let seen = iterations.clone();

    let task = runner::go(move |_stop: StopSignal| async move {
        for _ in 0..50 {
            seen.fetch_add(1, Ordering::SeqCst);
            tokio::task::yield_now().await;
        }
        Ok(())
    });
    task.stop();

    timeout(LIMIT, task.done()).await.unwrap();
    assert_eq!(iterations.load(Ordering::SeqCst), 50);
    assert!(task.is_stop_requested());
    assert_eq!(task.err(), None);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn running_flips_exactly_once() {
    let task = runner::go(|stop: StopSignal| async move {
        stop.stopped().await;
        Ok(())
    });

    let watcher = {
        let task = task.clone();
        tokio::spawn(async move {
            let mut transitions = 0;
            let mut last = true;
            while !task.done().is_done() || last {
                let now = task.running();
                if now != last {
                    assert!(!now, "running must never revert to true");
                    transitions += 1;
                    last = now;
                }
                tokio::task::yield_now().await;
            }
            transitions
        })
    };

    tokio::time::sleep(Duration::from_millis(10)).await;
    task.stop();
    task.done().await;
    assert!(!task.running());
    assert_eq!(timeout(LIMIT, watcher).await.unwrap().unwrap(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_registration_keeps_per_caller_order_and_precedes_done() {
    const CALLERS: usize = 8;
    const PER_CALLER: usize = 25;

    let log = Arc::new(Mutex::new(Vec::new()));
    let (gate_tx, gate_rx) = tokio::sync::oneshot::channel::<()>();
    let task = runner::go(|_stop: StopSignal| async move {
        let _ = gate_rx.await;
        Ok(())
    });

    let registrars: Vec<_> = (0..CALLERS)
        .map(|caller| {
            let task = task.clone();
            let log = log.clone();
            tokio::spawn(async move {
                for i in 0..PER_CALLER {
                    let log = log.clone();
                    task.then(move || log.lock().unwrap().push((caller, i)));
                }
            })
        })
        .collect();
    for r in registrars {
        r.await.unwrap();
    }

    let done_seen_in_callback = Arc::new(AtomicUsize::new(0));
    {
        let flag = done_seen_in_callback.clone();
        let done = task.done();
        task.then(move || {
            if done.is_done() {
                flag.fetch_add(1, Ordering::SeqCst);
            }
        });
    }

    gate_tx.send(()).unwrap();
    timeout(LIMIT, task.done()).await.unwrap();

    let log = log.lock().unwrap();
    assert_eq!(log.len(), CALLERS * PER_CALLER);
    for caller in 0..CALLERS {
        let seq: Vec<usize> = log
            .iter()
            .filter(|(c, _)| *c == caller)
            .map(|(_, i)| *i)
            .collect();
        assert_eq!(seq, (0..PER_CALLER).collect::<Vec<_>>());
    }
    assert_eq!(done_seen_in_callback.load(Ordering::SeqCst), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn many_waiters_after_completion_return_immediately() {
    let task = runner::go(|_stop: StopSignal| async { Ok(()) });
    timeout(LIMIT, task.done()).await.unwrap();

    let waiters: Vec<_> = (0..32)
        .map(|_| {
            let done = task.done();
            tokio::spawn(async move {
                for _ in 0..4 {
                    done.wait().await;
                }
            })
        })
        .collect();

    for w in waiters {
        timeout(Duration::from_millis(500), w)
            .await
            .expect("late waiter blocked")
            .unwrap();
    }
}

#[tokio::test]
async fn callback_registered_after_completion_runs_inline() {
    let task = runner::go(|_stop: StopSignal| async { Ok(()) });
    timeout(LIMIT, task.done()).await.unwrap();

    let ran = Arc::new(AtomicUsize::new(0));
    let r = ran.clone();
    task.then(move || {
        r.fetch_add(1, Ordering::SeqCst);
    });
    assert_eq!(ran.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn panicking_work_completes_with_panicked() {
    let task = runner::go(|_stop: StopSignal| async {
        if true {
            panic!("exploded");
        }
        Ok(())
    });

    let err = timeout(LIMIT, task.wait()).await.unwrap();
    assert_eq!(
        err,
        Some(TaskError::Panicked {
            info: "exploded".into()
        })
    );
    assert!(!task.running());
}

#[tokio::test]
async fn stop_and_wait_returns_outcome() {
    let task = runner::go(|stop: StopSignal| async move {
        tokio::select! {
            _ = stop.stopped() => Err(TaskError::Canceled),
            _ = tokio::time::sleep(Duration::from_secs(60)) => Ok(()),
        }
    });

    let err = timeout(LIMIT, task.stop_and_wait()).await.unwrap();
    assert_eq!(err, Some(TaskError::Canceled));
}
