//! Training progress and time estimation.

use crate::{
    clock::{Clock, SystemClock},
    common::*,
    error::MonitorError,
};

/// Collects timing of a training run and derives progress and ETA.
///
/// The hooks are called by the training loop around epochs and batches.
/// Batch timing keeps a single start instant shared by training and
/// validation batches, so a training batch and a validation batch must not
/// interleave between a begin and its end.
pub trait PerformanceMonitor: Debug {
    /// Reset every counter and set the run parameters.
    fn init(&mut self, total_epochs: usize, num_train_steps: usize, num_val_steps: usize)
        -> Result<()>;

    /// Reset the train and validation step counters. The epoch counter is kept.
    fn on_train_begin(&mut self);

    fn on_train_end(&mut self);

    fn on_train_epoch_begin(&mut self);

    /// Count a finished epoch and reset the validation step counter.
    fn on_train_epoch_end(&mut self);

    fn on_train_batch_begin(&mut self);

    fn on_train_batch_end(&mut self);

    fn on_val_batch_begin(&mut self);

    fn on_val_batch_end(&mut self);

    /// Training progress in percent.
    fn training_progress(&self) -> u32;

    /// Validation progress of the current epoch in percent.
    fn val_progress(&self) -> u32;

    /// Estimated seconds until the validation of the current epoch finishes.
    fn val_eta(&self) -> i64;

    /// Estimated seconds until the training finishes.
    fn training_eta(&self) -> i64;
}

/// The fixed parameters of a training run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingPlan {
    pub total_epochs: usize,
    pub num_train_steps: usize,
    pub num_val_steps: usize,
}

impl TrainingPlan {
    pub fn new(total_epochs: usize, num_train_steps: usize, num_val_steps: usize) -> Result<Self> {
        let invalid = |reason: &str| MonitorError::InvalidConfiguration {
            reason: reason.into(),
        };

        if total_epochs == 0 {
            return Err(invalid("total_epochs must be positive").into());
        }
        if num_train_steps == 0 {
            return Err(invalid("num_train_steps must be positive").into());
        }
        if num_val_steps == 0 {
            return Err(invalid("num_val_steps must be positive").into());
        }

        Ok(Self {
            total_epochs,
            num_train_steps,
            num_val_steps,
        })
    }

    /// The share of the whole run taken by one epoch.
    pub fn granularity(&self) -> f64 {
        1.0 / self.total_epochs as f64
    }
}

/// The mutable counters of a training run.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RunCounters {
    pub train_steps_passed: usize,
    pub val_steps_passed: usize,
    pub epochs_passed: usize,
    /// Running average of training batch time in seconds.
    pub avg_batch_time: f64,
    /// Running average of validation batch time in seconds.
    pub avg_val_batch_time: f64,
    /// Running average of epoch time in seconds.
    pub avg_epoch_time: f64,
}

impl RunCounters {
    /// Clear everything, the transition taken on `init`.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Clear the step counters, the transition taken on `on_train_begin`.
    pub fn reset_steps(&mut self) {
        self.train_steps_passed = 0;
        self.val_steps_passed = 0;
    }

    pub fn add_train_batch(&mut self, seconds: f64) {
        self.train_steps_passed += 1;
        self.avg_batch_time = fold_average(self.avg_batch_time, self.train_steps_passed, seconds);
    }

    pub fn add_val_batch(&mut self, seconds: f64) {
        self.val_steps_passed += 1;
        self.avg_val_batch_time =
            fold_average(self.avg_val_batch_time, self.val_steps_passed, seconds);
    }

    pub fn add_epoch(&mut self, seconds: f64) {
        self.val_steps_passed = 0;
        self.epochs_passed += 1;
        self.avg_epoch_time = fold_average(self.avg_epoch_time, self.epochs_passed, seconds);
    }
}

/// Fold the `count`-th sample into a running average of the previous
/// `count - 1` samples.
pub fn fold_average(avg: f64, count: usize, sample: f64) -> f64 {
    debug_assert!(count > 0);
    (avg * (count - 1) as f64 + sample) / count as f64
}

/// The performance monitor measuring wall-clock time.
#[derive(Debug)]
pub struct PerformanceTracker<C = SystemClock>
where
    C: Clock,
{
    clock: C,
    plan: Option<TrainingPlan>,
    counters: RunCounters,
    epoch_start: Instant,
    batch_start: Instant,
}

impl PerformanceTracker<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for PerformanceTracker<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> PerformanceTracker<C>
where
    C: Clock,
{
    pub fn with_clock(clock: C) -> Self {
        let now = clock.now();
        Self {
            clock,
            plan: None,
            counters: RunCounters::default(),
            epoch_start: now,
            batch_start: now,
        }
    }

    pub fn plan(&self) -> Option<&TrainingPlan> {
        self.plan.as_ref()
    }

    pub fn counters(&self) -> &RunCounters {
        &self.counters
    }

    pub fn avg_batch_time(&self) -> f64 {
        self.counters.avg_batch_time
    }

    pub fn avg_val_batch_time(&self) -> f64 {
        self.counters.avg_val_batch_time
    }

    pub fn avg_epoch_time(&self) -> f64 {
        self.counters.avg_epoch_time
    }

    pub fn train_steps_passed(&self) -> usize {
        self.counters.train_steps_passed
    }

    pub fn val_steps_passed(&self) -> usize {
        self.counters.val_steps_passed
    }

    pub fn epochs_passed(&self) -> usize {
        self.counters.epochs_passed
    }

    fn seconds_since(&self, start: Instant) -> f64 {
        self.clock
            .now()
            .saturating_duration_since(start)
            .as_secs_f64()
    }
}

impl<C> PerformanceMonitor for PerformanceTracker<C>
where
    C: Clock,
{
    fn init(
        &mut self,
        total_epochs: usize,
        num_train_steps: usize,
        num_val_steps: usize,
    ) -> Result<()> {
        let plan = TrainingPlan::new(total_epochs, num_train_steps, num_val_steps)?;
        let now = self.clock.now();

        self.plan = Some(plan);
        self.counters.reset();
        self.epoch_start = now;
        self.batch_start = now;
        Ok(())
    }

    fn on_train_begin(&mut self) {
        self.counters.reset_steps();
    }

    fn on_train_end(&mut self) {}

    fn on_train_epoch_begin(&mut self) {
        self.epoch_start = self.clock.now();
    }

    fn on_train_epoch_end(&mut self) {
        let seconds = self.seconds_since(self.epoch_start);
        self.counters.add_epoch(seconds);
        debug!(
            "epoch {} took {:.3}s, average {:.3}s",
            self.counters.epochs_passed, seconds, self.counters.avg_epoch_time
        );
    }

    fn on_train_batch_begin(&mut self) {
        self.batch_start = self.clock.now();
    }

    fn on_train_batch_end(&mut self) {
        let seconds = self.seconds_since(self.batch_start);
        self.counters.add_train_batch(seconds);
    }

    fn on_val_batch_begin(&mut self) {
        self.batch_start = self.clock.now();
    }

    fn on_val_batch_end(&mut self) {
        let seconds = self.seconds_since(self.batch_start);
        self.counters.add_val_batch(seconds);
    }

    /// The epoch term and the in-epoch step term are truncated separately.
    /// The step counter is not reset per epoch, only its remainder counts.
    fn training_progress(&self) -> u32 {
        let plan = match self.plan {
            Some(plan) => plan,
            None => return 0,
        };
        let RunCounters {
            train_steps_passed,
            epochs_passed,
            ..
        } = self.counters;

        let epoch_percent = (epochs_passed as f64 / plan.total_epochs as f64 * 100.0) as u32;
        let step_percent = (plan.granularity() * (train_steps_passed % plan.num_train_steps) as f64
            / plan.num_train_steps as f64
            * 100.0) as u32;
        epoch_percent + step_percent
    }

    fn val_progress(&self) -> u32 {
        let plan = match self.plan {
            Some(plan) => plan,
            None => return 0,
        };
        (self.counters.val_steps_passed as f64 / plan.num_val_steps as f64 * 100.0) as u32
    }

    /// It uses the average validation batch time. Before any validation
    /// batch finishes, the average training batch time is used instead.
    fn val_eta(&self) -> i64 {
        let plan = match self.plan {
            Some(plan) => plan,
            None => return 0,
        };
        let RunCounters {
            val_steps_passed,
            avg_batch_time,
            avg_val_batch_time,
            ..
        } = self.counters;

        let batch_time = if avg_val_batch_time > 0.0 {
            avg_val_batch_time
        } else {
            avg_batch_time
        };
        let remaining_steps = plan.num_val_steps as f64 - val_steps_passed as f64;
        (remaining_steps * batch_time) as i64
    }

    /// Before the first epoch finishes, the estimate is 1.5 times the
    /// remaining batch time of the current epoch. Afterwards it is the
    /// remaining epochs times the average epoch time, less the finished share
    /// of the current epoch.
    fn training_eta(&self) -> i64 {
        let plan = match self.plan {
            Some(plan) => plan,
            None => return 0,
        };
        let RunCounters {
            train_steps_passed,
            epochs_passed,
            avg_batch_time,
            avg_epoch_time,
            ..
        } = self.counters;

        let finished_steps = train_steps_passed % plan.num_train_steps;
        let remaining_steps = (plan.num_train_steps - finished_steps) as f64;
        let remaining_epochs = plan.total_epochs as f64 - epochs_passed as f64;

        let remaining_batch_time = remaining_steps * avg_batch_time;
        let remaining_epoch_time = remaining_epochs * avg_epoch_time;

        let remaining_time = if remaining_epoch_time == 0.0 {
            remaining_batch_time * 1.5
        } else {
            let epoch_completion = finished_steps as f64 / plan.num_train_steps as f64;
            remaining_epoch_time - epoch_completion * avg_epoch_time
        };
        remaining_time as i64
    }
}

/// The performance monitor that measures nothing and reports zeros.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullPerformanceMonitor;

impl PerformanceMonitor for NullPerformanceMonitor {
    fn init(&mut self, _: usize, _: usize, _: usize) -> Result<()> {
        Ok(())
    }

    fn on_train_begin(&mut self) {}

    fn on_train_end(&mut self) {}

    fn on_train_epoch_begin(&mut self) {}

    fn on_train_epoch_end(&mut self) {}

    fn on_train_batch_begin(&mut self) {}

    fn on_train_batch_end(&mut self) {}

    fn on_val_batch_begin(&mut self) {}

    fn on_val_batch_end(&mut self) {}

    fn training_progress(&self) -> u32 {
        0
    }

    fn val_progress(&self) -> u32 {
        0
    }

    fn val_eta(&self) -> i64 {
        0
    }

    fn training_eta(&self) -> i64 {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fold_average_test() {
        let mut avg = 0.0;
        for (index, sample) in [2.0, 4.0, 6.0, 8.0].into_iter().enumerate() {
            avg = fold_average(avg, index + 1, sample);
        }
        assert_eq!(avg, 5.0);
    }

    #[test]
    fn training_plan_test() {
        let plan = TrainingPlan::new(4, 10, 5).unwrap();
        assert_eq!(plan.granularity(), 0.25);

        for (epochs, train, val) in [(0, 10, 5), (4, 0, 5), (4, 10, 0)] {
            let err = TrainingPlan::new(epochs, train, val).unwrap_err();
            assert!(matches!(
                err.downcast_ref::<MonitorError>(),
                Some(MonitorError::InvalidConfiguration { .. })
            ));
        }
    }

    #[test]
    fn run_counters_transitions_test() {
        let mut counters = RunCounters::default();
        counters.add_train_batch(1.0);
        counters.add_val_batch(0.5);
        counters.add_epoch(10.0);
        assert_eq!(counters.val_steps_passed, 0);
        assert_eq!(counters.epochs_passed, 1);

        counters.add_val_batch(0.5);
        counters.reset_steps();
        assert_eq!(counters.train_steps_passed, 0);
        assert_eq!(counters.val_steps_passed, 0);
        assert_eq!(counters.epochs_passed, 1);
        assert_eq!(counters.avg_epoch_time, 10.0);

        counters.reset();
        assert_eq!(counters, RunCounters::default());
    }

    #[test]
    fn null_monitor_test() {
        let mut monitor = NullPerformanceMonitor;
        monitor.init(0, 0, 0).unwrap();
        monitor.on_train_begin();
        monitor.on_train_batch_begin();
        monitor.on_train_batch_end();
        monitor.on_train_epoch_end();
        assert_eq!(monitor.training_progress(), 0);
        assert_eq!(monitor.val_progress(), 0);
        assert_eq!(monitor.val_eta(), 0);
        assert_eq!(monitor.training_eta(), 0);
    }

    #[test]
    fn uninitialized_tracker_test() {
        let tracker = PerformanceTracker::new();
        assert_eq!(tracker.training_progress(), 0);
        assert_eq!(tracker.val_progress(), 0);
        assert_eq!(tracker.val_eta(), 0);
        assert_eq!(tracker.training_eta(), 0);
    }
}
