//! Progress, timing and scalar logging for training loops.
//!
//! Each capability is a trait with a wired implementation and a null one:
//!
//! - [MetricsMonitor]: [EventMetricsMonitor] writes TensorBoard event files,
//!   [InMemoryMetricsMonitor] keeps values in memory.
//! - [PerformanceMonitor]: [PerformanceTracker] measures wall-clock time,
//!   [NullPerformanceMonitor] reports zeros.
//! - [StopCallback]: [StopFlag] latches a stop request, [NeverStop] never
//!   stops.
//!
//! The monitors are meant to be driven from the thread running the training
//! loop. [MonitorConfig] selects the implementations.

mod common;
pub mod clock;
pub mod config;
pub mod error;
pub mod metrics;
pub mod performance;
pub mod stop;

pub use clock::*;
pub use config::*;
pub use error::*;
pub use metrics::*;
pub use performance::*;
pub use stop::*;
