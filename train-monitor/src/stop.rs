use crate::common::*;

/// A stop signal polled by the training loop between steps.
///
/// A new callback is permissive.
pub trait StopCallback: Debug {
    /// Request the training to stop.
    fn stop(&mut self);

    /// Return true if a stop was requested and not reset since.
    fn check_stop(&self) -> bool;

    /// Return to the permissive state.
    fn reset(&mut self);
}

/// The stop callback latching a stop request.
#[derive(Debug, Clone, Default)]
pub struct StopFlag {
    stop_flag: bool,
}

impl StopFlag {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StopCallback for StopFlag {
    fn stop(&mut self) {
        self.stop_flag = true;
    }

    fn check_stop(&self) -> bool {
        self.stop_flag
    }

    fn reset(&mut self) {
        self.stop_flag = false;
    }
}

/// The stop callback that is always permissive.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverStop;

impl StopCallback for NeverStop {
    fn stop(&mut self) {}

    fn check_stop(&self) -> bool {
        false
    }

    fn reset(&mut self) {}
}
