//! Progress notifications emitted while an integration run advances.

/// Target number of checkpoints per run.
pub const CHECKPOINTS: usize = 20;

/// Snapshot handed to a [`ProgressObserver`] at a checkpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// Steps completed so far (1-based).
    pub completed: usize,
    /// Total steps in the run.
    pub total: usize,
}

impl Progress {
    pub fn new(completed: usize, total: usize) -> Self {
        Self { completed, total }
    }

    /// Integer percentage floor(100 · completed / total).
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            return 100;
        }
        (self.completed as u128 * 100 / self.total as u128) as u32
    }

    pub fn is_done(&self) -> bool {
        self.completed >= self.total
    }
}

/// Callback hook invoked at checkpoint steps of an integration run.
///
/// Observers only see progress; they cannot alter the integrated state.
/// Any `FnMut(Progress)` closure is an observer.
pub trait ProgressObserver {
    fn on_progress(&mut self, progress: Progress);
}

impl<F: FnMut(Progress)> ProgressObserver for F {
    fn on_progress(&mut self, progress: Progress) {
        self(progress)
    }
}

/// Observer that ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn on_progress(&mut self, _progress: Progress) {}
}

/// Steps between two checkpoints: max(1, steps / CHECKPOINTS).
pub fn checkpoint_interval(steps: usize) -> usize {
    (steps / CHECKPOINTS).max(1)
}

/// Whether the observer is notified after the 0-based step `i` of `steps`.
pub(crate) fn is_checkpoint(i: usize, interval: usize, steps: usize) -> bool {
    i % interval == 0 || i + 1 == steps
}
