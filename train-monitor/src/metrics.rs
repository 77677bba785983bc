//! Scalar metrics logging.

use crate::{common::*, error::MonitorError};

pub use event_monitor::*;
pub use in_memory_monitor::*;

/// A TensorBoard-style sink of named scalars.
pub trait MetricsMonitor: Debug {
    /// Log the value of a named scalar at a step.
    fn record(&mut self, name: &str, value: f64, step: i64) -> Result<()>;

    /// Flush the recorded values and release the underlying resources.
    ///
    /// The monitor returns to its initial state and can record again.
    fn close(&mut self) -> Result<()>;
}

mod event_monitor {
    use super::*;

    /// The metrics monitor writing TensorBoard event files.
    ///
    /// The event file is created under the log directory on the first
    /// [record](MetricsMonitor::record). Each open after a
    /// [close](MetricsMonitor::close) starts a new event file.
    #[derive(Debug)]
    pub struct EventMetricsMonitor {
        log_dir: PathBuf,
        num_opened: usize,
        event_writer: Option<EventWriter<BufWriter<File>>>,
    }

    impl EventMetricsMonitor {
        pub fn new(log_dir: impl Into<PathBuf>) -> Self {
            Self {
                log_dir: log_dir.into(),
                num_opened: 0,
                event_writer: None,
            }
        }

        pub fn log_dir(&self) -> &Path {
            &self.log_dir
        }

        pub fn is_open(&self) -> bool {
            self.event_writer.is_some()
        }

        fn open(&mut self) -> Result<EventWriter<BufWriter<File>>> {
            fs::create_dir_all(&self.log_dir).with_context(|| {
                format!("failed to create directory '{}'", self.log_dir.display())
            })?;

            let prefix = self
                .log_dir
                .join("events")
                .into_os_string()
                .into_string()
                .map_err(|path| format_err!("non-unicode path '{}'", Path::new(&path).display()))?;
            let suffix = format!(".{}", self.num_opened);

            let event_writer = EventWriterInit::default()
                .from_prefix(prefix, Some(suffix))
                .with_context(|| {
                    format!(
                        "failed to create event file in '{}'",
                        self.log_dir.display()
                    )
                })?;
            self.num_opened += 1;

            info!("opened event file in '{}'", self.log_dir.display());
            Ok(event_writer)
        }
    }

    impl MetricsMonitor for EventMetricsMonitor {
        fn record(&mut self, name: &str, value: f64, step: i64) -> Result<()> {
            let event_writer = match self.event_writer.take() {
                Some(event_writer) => event_writer,
                None => self.open()?,
            };
            let event_writer = self.event_writer.insert(event_writer);
            event_writer.write_scalar(name, step, value as f32)?;
            Ok(())
        }

        fn close(&mut self) -> Result<()> {
            if let Some(mut event_writer) = self.event_writer.take() {
                event_writer.flush()?;
                debug!("closed event file in '{}'", self.log_dir.display());
            }
            Ok(())
        }
    }
}

mod in_memory_monitor {
    use super::*;

    /// The metrics monitor keeping recorded values in memory.
    #[derive(Debug, Clone, Default)]
    pub struct InMemoryMetricsMonitor {
        metrics: IndexMap<String, Vec<f64>>,
    }

    impl InMemoryMetricsMonitor {
        pub fn new() -> Self {
            Self::default()
        }

        /// The values of a metric in recording order.
        pub fn values(&self, name: &str) -> Result<&[f64]> {
            let values = self
                .metrics
                .get(name)
                .ok_or_else(|| MonitorError::MetricNotFound { name: name.into() })?;
            Ok(values.as_slice())
        }

        /// The metric names in order of first record.
        pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
            self.metrics.keys().map(|name| name.as_str())
        }
    }

    impl MetricsMonitor for InMemoryMetricsMonitor {
        fn record(&mut self, name: &str, value: f64, _step: i64) -> Result<()> {
            match self.metrics.get_mut(name) {
                Some(values) => values.push(value),
                None => {
                    self.metrics.insert(name.to_owned(), vec![value]);
                }
            }
            Ok(())
        }

        fn close(&mut self) -> Result<()> {
            Ok(())
        }
    }
}
