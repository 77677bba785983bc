use anyhow::Result;
use std::{fs, time::Duration};
use train_monitor::{
    EventMetricsMonitor, InMemoryMetricsMonitor, ManualClock, MetricsMonitor, MonitorError,
    PerformanceMonitor, PerformanceTracker,
};

const TRAIN_BATCH_TIME: Duration = Duration::from_millis(250);
const VAL_BATCH_TIME: Duration = Duration::from_secs(1);

fn run_train_batches(tracker: &mut PerformanceTracker<ManualClock>, clock: &ManualClock, n: usize) {
    for _ in 0..n {
        tracker.on_train_batch_begin();
        clock.advance(TRAIN_BATCH_TIME);
        tracker.on_train_batch_end();
    }
}

fn run_val_batches(tracker: &mut PerformanceTracker<ManualClock>, clock: &ManualClock, n: usize) {
    for _ in 0..n {
        tracker.on_val_batch_begin();
        clock.advance(VAL_BATCH_TIME);
        tracker.on_val_batch_end();
    }
}

#[test]
fn constant_batch_time_average() -> Result<()> {
    let clock = ManualClock::new();
    let mut tracker = PerformanceTracker::with_clock(clock.clone());
    tracker.init(2, 10, 5)?;
    tracker.on_train_begin();
    tracker.on_train_epoch_begin();

    run_train_batches(&mut tracker, &clock, 10);
    assert_eq!(tracker.train_steps_passed(), 10);
    assert_eq!(tracker.avg_batch_time(), 0.25);

    Ok(())
}

#[test]
fn training_progress_and_eta() -> Result<()> {
    let clock = ManualClock::new();
    let mut tracker = PerformanceTracker::with_clock(clock.clone());
    tracker.init(2, 10, 5)?;
    tracker.on_train_begin();

    assert_eq!(tracker.training_progress(), 0);

    // first epoch
    tracker.on_train_epoch_begin();
    run_train_batches(&mut tracker, &clock, 4);
    assert_eq!(tracker.training_progress(), 20);
    // no finished epoch yet: 1.5 * 6 steps * 0.25s
    assert_eq!(tracker.training_eta(), 2);

    run_train_batches(&mut tracker, &clock, 6);
    // the remainder of the step counter wraps at the epoch boundary
    assert_eq!(tracker.training_progress(), 0);
    assert_eq!(tracker.training_eta(), 3);

    tracker.on_train_epoch_end();
    assert_eq!(tracker.epochs_passed(), 1);
    assert_eq!(tracker.avg_epoch_time(), 2.5);
    assert_eq!(tracker.training_progress(), 50);
    assert_eq!(tracker.training_eta(), 2);

    // second epoch
    tracker.on_train_epoch_begin();
    run_train_batches(&mut tracker, &clock, 4);
    assert_eq!(tracker.training_progress(), 70);
    // 1 epoch * 2.5s - 0.4 * 2.5s
    assert_eq!(tracker.training_eta(), 1);

    run_train_batches(&mut tracker, &clock, 6);
    tracker.on_train_epoch_end();
    tracker.on_train_end();
    assert_eq!(tracker.training_progress(), 100);
    // no epoch left, fall back to the batch estimate
    assert_eq!(tracker.training_eta(), 3);

    Ok(())
}

#[test]
fn validation_progress_and_eta() -> Result<()> {
    let clock = ManualClock::new();
    let mut tracker = PerformanceTracker::with_clock(clock.clone());
    tracker.init(2, 10, 5)?;
    tracker.on_train_begin();
    tracker.on_train_epoch_begin();
    run_train_batches(&mut tracker, &clock, 10);

    // no validation batch yet: 5 steps * 0.25s of training batch time
    assert_eq!(tracker.val_progress(), 0);
    assert_eq!(tracker.val_eta(), 1);

    run_val_batches(&mut tracker, &clock, 2);
    assert_eq!(tracker.avg_val_batch_time(), 1.0);
    assert_eq!(tracker.avg_batch_time(), 0.25);
    assert_eq!(tracker.val_progress(), 40);
    assert_eq!(tracker.val_eta(), 3);

    run_val_batches(&mut tracker, &clock, 3);
    assert_eq!(tracker.val_progress(), 100);
    assert_eq!(tracker.val_eta(), 0);

    // validation time is part of the epoch
    tracker.on_train_epoch_end();
    assert_eq!(tracker.avg_epoch_time(), 7.5);
    assert_eq!(tracker.val_steps_passed(), 0);
    assert_eq!(tracker.val_progress(), 0);

    Ok(())
}

#[test]
fn reset_transitions() -> Result<()> {
    let clock = ManualClock::new();
    let mut tracker = PerformanceTracker::with_clock(clock.clone());
    tracker.init(3, 4, 2)?;
    tracker.on_train_begin();
    tracker.on_train_epoch_begin();
    run_train_batches(&mut tracker, &clock, 4);
    run_val_batches(&mut tracker, &clock, 1);
    tracker.on_train_epoch_end();

    // on_train_begin keeps epochs and restarts the batch average
    tracker.on_train_begin();
    assert_eq!(tracker.train_steps_passed(), 0);
    assert_eq!(tracker.val_steps_passed(), 0);
    assert_eq!(tracker.epochs_passed(), 1);

    tracker.on_train_batch_begin();
    clock.advance(Duration::from_secs(2));
    tracker.on_train_batch_end();
    assert_eq!(tracker.avg_batch_time(), 2.0);

    // init clears everything
    tracker.init(3, 4, 2)?;
    assert_eq!(tracker.epochs_passed(), 0);
    assert_eq!(tracker.train_steps_passed(), 0);
    assert_eq!(tracker.avg_batch_time(), 0.0);
    assert_eq!(tracker.avg_val_batch_time(), 0.0);
    assert_eq!(tracker.avg_epoch_time(), 0.0);
    assert_eq!(tracker.training_progress(), 0);

    Ok(())
}

#[test]
fn invalid_plan() {
    let mut tracker = PerformanceTracker::new();
    let err = tracker.init(2, 0, 5).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<MonitorError>(),
        Some(MonitorError::InvalidConfiguration { .. })
    ));
    assert!(tracker.plan().is_none());
}

#[test]
fn wall_clock_tracker() -> Result<()> {
    let mut tracker = PerformanceTracker::new();
    tracker.init(1, 2, 1)?;
    tracker.on_train_begin();
    tracker.on_train_epoch_begin();
    tracker.on_train_batch_begin();
    tracker.on_train_batch_end();
    assert!(tracker.avg_batch_time() >= 0.0);
    assert_eq!(tracker.training_progress(), 50);
    Ok(())
}

#[test]
fn in_memory_metrics_through_trait_object() -> Result<()> {
    let mut monitor = InMemoryMetricsMonitor::new();
    {
        let sink: &mut dyn MetricsMonitor = &mut monitor;
        for (step, value) in [1.0, 2.0, 3.0].into_iter().enumerate() {
            sink.record("loss", value, step as i64)?;
        }
        sink.close()?;
    }
    assert_eq!(monitor.values("loss")?, &[1.0, 2.0, 3.0]);
    Ok(())
}

fn event_files(dir: &std::path::Path) -> Result<Vec<std::path::PathBuf>> {
    let mut files = vec![];
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_event_file = path
            .file_name()
            .and_then(|name| name.to_str())
            .map(|name| name.starts_with("events"))
            .unwrap_or(false);
        if is_event_file {
            files.push(path);
        }
    }
    Ok(files)
}

#[test]
fn event_metrics_reopen_after_close() -> Result<()> {
    let root = tempfile::tempdir()?;
    let log_dir = root.path().join("logs");
    let mut monitor = EventMetricsMonitor::new(&log_dir);

    // nothing is created before the first record
    monitor.close()?;
    assert!(!monitor.is_open());
    assert!(!log_dir.exists());

    for step in 0..3 {
        monitor.record("train/loss", 1.0 / (step + 1) as f64, step)?;
    }
    assert!(monitor.is_open());
    monitor.close()?;
    assert!(!monitor.is_open());

    let files = event_files(&log_dir)?;
    assert_eq!(files.len(), 1);
    assert!(fs::metadata(&files[0])?.len() > 0);

    monitor.record("train/loss", 0.1, 3)?;
    assert!(monitor.is_open());
    monitor.close()?;
    assert_eq!(event_files(&log_dir)?.len(), 2);

    Ok(())
}
