//! End-to-end runs of the progress driver on a paused clock

use gallery_core::{ProgressConfig, ProgressEvent, ProgressSnapshot, ProgressStatus, ProgressTask};
use gallery_tasks::{Notice, ProgressDriver};
use pretty_assertions::assert_eq;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc::error::TryRecvError;
use tokio::time::{self, Instant};

fn assert_steps_took(began: Instant, expected: Duration) {
    let elapsed = began.elapsed();
    assert!(
        elapsed >= expected && elapsed < expected + Duration::from_millis(300),
        "run took {elapsed:?}, expected {expected:?}"
    );
}

#[tokio::test(start_paused = true)]
async fn run_to_completion_emits_one_completion() {
    let controller = ProgressDriver::spawn(ProgressTask::new());
    let mut events = controller.events().unwrap();
    let began = Instant::now();

    controller.start().unwrap();
    assert_eq!(events.recv().await, Some(ProgressEvent::Started));
    assert_eq!(events.recv().await, Some(ProgressEvent::Completed));

    // Ten steps of 300 ms.
    assert_steps_took(began, Duration::from_millis(3_000));
    assert_eq!(
        controller.observe(),
        ProgressSnapshot {
            status: ProgressStatus::Completed,
            fraction: 1.0
        }
    );

    time::sleep(Duration::from_secs(5)).await;
    assert_eq!(events.try_recv(), Err(TryRecvError::Empty));
}

#[tokio::test(start_paused = true)]
async fn cancel_stops_further_ticks() {
    let controller = ProgressDriver::spawn(ProgressTask::new());
    let mut events = controller.events().unwrap();

    controller.start().unwrap();
    assert_eq!(events.recv().await, Some(ProgressEvent::Started));

    time::sleep(Duration::from_millis(950)).await;
    let before_cancel = controller.observe();
    assert_eq!(before_cancel.percent(), 30);
    assert_eq!(before_cancel.action_label("Download"), "Cancel Download (30%)");

    controller.cancel().unwrap();
    let cancelled = events.recv().await.unwrap();
    assert_eq!(cancelled, ProgressEvent::Cancelled);
    assert_eq!(
        Notice::for_progress(&cancelled).unwrap().message,
        "Download cancelled"
    );

    time::sleep(Duration::from_secs(5)).await;
    let after = controller.observe();
    assert_eq!(after.status, ProgressStatus::Cancelled);
    assert_eq!(after.fraction, before_cancel.fraction);
    assert_eq!(events.try_recv(), Err(TryRecvError::Empty));
}

#[tokio::test(start_paused = true)]
async fn cancel_at_tick_boundary_wins_over_due_tick() {
    let controller = ProgressDriver::spawn(ProgressTask::new());
    let mut events = controller.events().unwrap();

    controller.start().unwrap();
    assert_eq!(events.recv().await, Some(ProgressEvent::Started));

    // The third step is due at exactly this instant.
    time::sleep(Duration::from_millis(900)).await;
    controller.cancel().unwrap();
    assert_eq!(events.recv().await, Some(ProgressEvent::Cancelled));

    let snapshot = controller.observe();
    assert_eq!(snapshot.status, ProgressStatus::Cancelled);
    assert_eq!(snapshot.percent(), 20);
}

#[tokio::test(start_paused = true)]
async fn restart_after_cancel_begins_from_zero() {
    let controller = ProgressDriver::spawn(ProgressTask::new());
    let mut events = controller.events().unwrap();

    controller.start().unwrap();
    events.recv().await;
    time::sleep(Duration::from_millis(650)).await;
    controller.cancel().unwrap();
    assert_eq!(events.recv().await, Some(ProgressEvent::Cancelled));

    controller.start().unwrap();
    assert_eq!(events.recv().await, Some(ProgressEvent::Started));
    assert_eq!(controller.observe().fraction, 0.0);

    assert_eq!(events.recv().await, Some(ProgressEvent::Completed));
    assert_eq!(controller.observe().percent(), 100);
}

#[tokio::test(start_paused = true)]
async fn duplicate_start_does_not_double_speed() {
    let controller = ProgressDriver::spawn(ProgressTask::new());
    let mut events = controller.events().unwrap();
    let began = Instant::now();

    controller.start().unwrap();
    controller.start().unwrap();
    controller.start().unwrap();

    assert_eq!(events.recv().await, Some(ProgressEvent::Started));
    assert_eq!(events.recv().await, Some(ProgressEvent::Completed));
    assert_steps_took(began, Duration::from_millis(3_000));
}

#[tokio::test(start_paused = true)]
async fn subscribers_see_every_step() {
    let config = ProgressConfig {
        step_size: 0.25,
        tick_interval_ms: 100,
    };
    let controller = ProgressDriver::spawn(ProgressTask::with_config(&config).unwrap());
    let mut events = controller.events().unwrap();

    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_clone = seen.clone();
    controller.subscribe(move |snapshot| {
        seen_clone
            .lock()
            .unwrap()
            .push((snapshot.status, snapshot.percent()));
    });

    controller.start().unwrap();
    events.recv().await;
    events.recv().await;

    let seen = seen.lock().unwrap().clone();
    assert_eq!(
        seen,
        vec![
            (ProgressStatus::Running, 0),
            (ProgressStatus::Running, 25),
            (ProgressStatus::Running, 50),
            (ProgressStatus::Running, 75),
            (ProgressStatus::Completed, 100),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn shutdown_of_idle_driver_returns_idle_snapshot() {
    let controller = ProgressDriver::spawn(ProgressTask::new());
    let snapshot = controller.shutdown().await.unwrap();
    assert_eq!(snapshot, ProgressSnapshot::IDLE);
}
