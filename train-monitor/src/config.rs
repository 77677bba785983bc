//! Monitor configuration format.

use crate::{
    common::*,
    metrics::{EventMetricsMonitor, InMemoryMetricsMonitor, MetricsMonitor},
    performance::{NullPerformanceMonitor, PerformanceMonitor, PerformanceTracker},
    stop::{NeverStop, StopCallback, StopFlag},
};

/// Selects the implementation of each monitor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorConfig {
    #[serde(default)]
    pub metrics: MetricsConfig,
    #[serde(default)]
    pub performance: PerformanceConfig,
    #[serde(default)]
    pub stop: StopConfig,
}

impl MonitorConfig {
    pub fn open<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read '{}'", path.display()))?;
        let config = json5::from_str(&text)
            .with_context(|| format!("failed to parse '{}'", path.display()))?;
        Ok(config)
    }

    /// Create the configured monitors.
    pub fn build(&self) -> Monitors {
        let metrics: Box<dyn MetricsMonitor + Send> = match &self.metrics {
            MetricsConfig::Events { dir } => Box::new(EventMetricsMonitor::new(dir)),
            MetricsConfig::InMemory => Box::new(InMemoryMetricsMonitor::new()),
        };
        let performance: Box<dyn PerformanceMonitor + Send> = match self.performance {
            PerformanceConfig::WallClock => Box::new(PerformanceTracker::new()),
            PerformanceConfig::Disabled => Box::new(NullPerformanceMonitor),
        };
        let stop: Box<dyn StopCallback + Send> = match self.stop {
            StopConfig::Flag => Box::new(StopFlag::new()),
            StopConfig::Never => Box::new(NeverStop),
        };

        Monitors {
            metrics,
            performance,
            stop,
        }
    }
}

/// The metrics monitor options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum MetricsConfig {
    /// Write TensorBoard event files to the directory.
    Events { dir: PathBuf },
    /// Keep values in memory.
    InMemory,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self::InMemory
    }
}

/// The performance monitor options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PerformanceConfig {
    WallClock,
    Disabled,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self::WallClock
    }
}

/// The stop callback options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum StopConfig {
    Flag,
    Never,
}

impl Default for StopConfig {
    fn default() -> Self {
        Self::Flag
    }
}

/// The monitors handed to a training loop.
#[derive(Debug)]
pub struct Monitors {
    pub metrics: Box<dyn MetricsMonitor + Send>,
    pub performance: Box<dyn PerformanceMonitor + Send>,
    pub stop: Box<dyn StopCallback + Send>,
}
