//! Progress reporting hooks invoked at solver phase boundaries.

use tracing::info;

/// Receives progress notifications from a running solver.
///
/// A subtask announces its expected `volume` of work; progress is reported
/// as increments against that volume.
///
/// # Examples
/// ```
/// use pcst_core::ProgressTracker;
///
/// #[derive(Default)]
/// struct Counter(u64);
///
/// impl ProgressTracker for Counter {
///     fn begin_subtask(&mut self, _name: &str, _volume: u64) {}
///     fn log_progress(&mut self, done: u64) { self.0 += done; }
///     fn end_subtask(&mut self, _name: &str) {}
/// }
///
/// let mut counter = Counter::default();
/// counter.log_progress(3);
/// assert_eq!(counter.0, 3);
/// ```
pub trait ProgressTracker {
    /// Starts a named subtask expected to perform `volume` units of work.
    fn begin_subtask(&mut self, name: &str, volume: u64);

    /// Records `done` additional units of work for the current subtask.
    fn log_progress(&mut self, done: u64);

    /// Finishes the named subtask.
    fn end_subtask(&mut self, name: &str);
}

/// Tracker that discards every notification.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NoopProgressTracker;

impl ProgressTracker for NoopProgressTracker {
    fn begin_subtask(&mut self, _name: &str, _volume: u64) {}

    fn log_progress(&mut self, _done: u64) {}

    fn end_subtask(&mut self, _name: &str) {}
}

/// Tracker that reports whole-percent progress through `tracing`.
///
/// Each subtask logs at most one event per percent, so long phases stay
/// quiet at the default `info` level.
#[derive(Clone, Debug, Default)]
pub struct TracingProgressTracker {
    task: Option<String>,
    volume: u64,
    done: u64,
    last_percent: u64,
}

impl TracingProgressTracker {
    /// Creates a tracker with no active subtask.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whole percent completed in the current subtask.
    #[must_use]
    pub fn percent(&self) -> u64 {
        (self.done.min(self.volume).saturating_mul(100))
            .checked_div(self.volume)
            .unwrap_or(100)
    }
}

impl ProgressTracker for TracingProgressTracker {
    fn begin_subtask(&mut self, name: &str, volume: u64) {
        info!(task = name, volume, "started");
        self.task = Some(name.to_owned());
        self.volume = volume;
        self.done = 0;
        self.last_percent = 0;
    }

    fn log_progress(&mut self, done: u64) {
        self.done = self.done.saturating_add(done);
        let percent = self.percent();
        if percent > self.last_percent {
            self.last_percent = percent;
            info!(task = self.task.as_deref().unwrap_or_default(), percent, "progress");
        }
    }

    fn end_subtask(&mut self, name: &str) {
        info!(task = name, "finished");
        self.task = None;
    }
}
