use crate::common::*;

/// Errors raised by the monitors.
///
/// They are carried inside [anyhow::Error]. Use `downcast_ref::<MonitorError>()`
/// to tell them apart.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MonitorError {
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },
    #[error("metric '{name}' is not recorded")]
    MetricNotFound { name: String },
}
