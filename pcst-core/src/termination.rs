//! Cooperative cancellation signals.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

/// Polled by the solver between growth iterations. Once `running` returns
/// `false` the solver stops and returns a partial result.
pub trait TerminationFlag {
    /// Returns whether the computation may continue.
    fn running(&self) -> bool;
}

/// Flag that never requests termination.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunningForever;

impl TerminationFlag for RunningForever {
    fn running(&self) -> bool {
        true
    }
}

/// Shareable flag that can be stopped from another thread.
///
/// Clones observe the same state.
///
/// # Examples
/// ```
/// use pcst_core::{AtomicTerminationFlag, TerminationFlag};
///
/// let flag = AtomicTerminationFlag::new();
/// let handle = flag.clone();
/// assert!(flag.running());
/// handle.stop();
/// assert!(!flag.running());
/// ```
#[derive(Clone, Debug, Default)]
pub struct AtomicTerminationFlag {
    stopped: Arc<AtomicBool>,
}

impl AtomicTerminationFlag {
    /// Creates a flag in the running state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests termination.
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::Release);
    }
}

impl TerminationFlag for AtomicTerminationFlag {
    fn running(&self) -> bool {
        !self.stopped.load(Ordering::Acquire)
    }
}
