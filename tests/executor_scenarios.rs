//! Executor Scenario Tests
//!
//! End-to-end admission and caching scenarios through the public API.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use api_queue::{ConfigError, Executor, ExecutorConfig, ExecutorStatus, ManualClock};
use tokio::sync::oneshot;

/// Lets spawned tasks on the current-thread runtime make progress.
async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}

#[test]
fn test_zero_capacity_rejected_before_any_submission() {
    let result = Executor::<u32>::new(ExecutorConfig::new(0, Duration::from_secs(30)));
    assert!(matches!(result, Err(ConfigError::InvalidMaxConcurrent(0))));
}

#[tokio::test]
async fn test_two_slots_four_operations() {
    let exec: Executor<&'static str> =
        Executor::new(ExecutorConfig::new(2, Duration::from_secs(30))).unwrap();
    let started = Arc::new(Mutex::new(Vec::new()));

    let mut gates = Vec::new();
    let mut submissions = Vec::new();
    for name in ["A", "B", "C", "D"] {
        let (tx, rx) = oneshot::channel::<()>();
        let started = Arc::clone(&started);
        submissions.push(exec.submit(
            move || async move {
                started.lock().push(name);
                let _ = rx.await;
                Ok::<_, String>(name)
            },
            None,
        ));
        gates.push(tx);
    }
    settle().await;

    assert_eq!(*started.lock(), ["A", "B"]);
    assert_eq!(
        exec.status(),
        ExecutorStatus {
            in_flight: 2,
            pending_count: 2,
            cache_size: 0
        }
    );

    let mut gates = gates.into_iter();
    let mut submissions = submissions.into_iter();

    // A completes: C starts, not D
    gates.next().unwrap().send(()).unwrap();
    assert_eq!(submissions.next().unwrap().await, Ok("A"));
    settle().await;
    assert_eq!(*started.lock(), ["A", "B", "C"]);

    // B completes: D starts
    gates.next().unwrap().send(()).unwrap();
    assert_eq!(submissions.next().unwrap().await, Ok("B"));
    settle().await;
    assert_eq!(*started.lock(), ["A", "B", "C", "D"]);
    assert_eq!(exec.status().pending_count, 0);

    for gate in gates {
        gate.send(()).unwrap();
    }
    assert_eq!(submissions.next().unwrap().await, Ok("C"));
    assert_eq!(submissions.next().unwrap().await, Ok("D"));
    assert_eq!(exec.status().in_flight, 0);
}

#[tokio::test]
async fn test_cached_value_within_window_then_rerun() {
    let clock = ManualClock::new(0);
    let exec: Executor<u64> =
        Executor::with_clock(ExecutorConfig::new(5, Duration::from_millis(30_000)), clock.clone())
            .unwrap();
    let second_ran = Arc::new(AtomicUsize::new(0));

    let first = exec.submit(|| async { Ok::<_, String>(42) }, Some("k"));
    assert_eq!(first.await, Ok(42));

    let flag = Arc::clone(&second_ran);
    let second = exec.submit(
        move || async move {
            flag.fetch_add(1, Ordering::SeqCst);
            Ok::<_, String>(0)
        },
        Some("k"),
    );
    assert_eq!(second.await, Ok(42));
    assert_eq!(second_ran.load(Ordering::SeqCst), 0);

    clock.advance(Duration::from_millis(31_000));

    let flag = Arc::clone(&second_ran);
    let third = exec.submit(
        move || async move {
            flag.fetch_add(1, Ordering::SeqCst);
            Ok::<_, String>(43)
        },
        Some("k"),
    );
    assert_eq!(third.await, Ok(43));
    assert_eq!(second_ran.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_operation_error_is_passed_through_untouched() {
    #[derive(Debug, PartialEq)]
    struct RemoteError {
        code: u16,
    }

    let exec: Executor<u32> = Executor::new(ExecutorConfig::default()).unwrap();

    let result = exec
        .submit(|| async { Err(RemoteError { code: 429 }) }, Some("k"))
        .await;

    assert_eq!(result, Err(RemoteError { code: 429 }));
    assert_eq!(exec.status().cache_size, 0);
}

#[tokio::test]
async fn test_clones_share_state() {
    let exec: Executor<u32> = Executor::new(ExecutorConfig::default()).unwrap();
    let other = exec.clone();

    exec.submit(|| async { Ok::<_, String>(1) }, Some("shared"))
        .await
        .unwrap();

    assert_eq!(other.status().cache_size, 1);
    other.clear_cache();
    assert_eq!(exec.status().cache_size, 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_status_is_readable_under_load() {
    let exec: Executor<usize> =
        Executor::new(ExecutorConfig::new(4, Duration::from_secs(30))).unwrap();

    let watcher = {
        let exec = exec.clone();
        tokio::spawn(async move {
            for _ in 0..200 {
                let status = exec.status();
                assert!(status.in_flight <= 4);
                tokio::task::yield_now().await;
            }
        })
    };

    let submissions: Vec<_> = (0..50)
        .map(|i| {
            exec.submit(
                move || async move {
                    tokio::time::sleep(Duration::from_millis(1)).await;
                    if i % 7 == 0 {
                        Err(i)
                    } else {
                        Ok(i)
                    }
                },
                None,
            )
        })
        .collect();

    for (i, submission) in submissions.into_iter().enumerate() {
        let expected = if i % 7 == 0 { Err(i) } else { Ok(i) };
        assert_eq!(submission.await, expected);
    }

    watcher.await.unwrap();
    assert_eq!(exec.status().in_flight, 0);
}
