use parking_lot::Mutex;

use crate::{error::DispatcherBusy, model::outcome::ResolutionOutcome};

/// Lifecycle of one dispatcher.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DispatchState<R> {
    #[default]
    Idle,
    /// Holds the request captured when the run started.
    Running(R),
    Succeeded(ResolutionOutcome),
    Failed(ResolutionOutcome),
}

impl<R> DispatchState<R> {
    #[must_use]
    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running(_))
    }

    /// The outcome currently on display, if any.
    #[must_use]
    pub fn outcome(&self) -> Option<&ResolutionOutcome> {
        match self {
            Self::Succeeded(o) | Self::Failed(o) => Some(o),
            Self::Idle | Self::Running(_) => None,
        }
    }
}

/// The single mutable cell a dispatcher owns.
#[derive(Debug, Default)]
pub struct StateCell<R> {
    inner: Mutex<DispatchState<R>>,
}

impl<R: Clone> StateCell<R> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(DispatchState::Idle),
        }
    }

    #[must_use]
    pub fn get(&self) -> DispatchState<R> {
        self.inner.lock().clone()
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.inner.lock().is_running()
    }

    /// Moves to `Running`, dropping the previous outcome. Refuses while a run
    /// is already in flight.
    pub fn begin(&self, request: R) -> Result<RunGuard<'_, R>, DispatcherBusy> {
        let mut state = self.inner.lock();
        if state.is_running() {
            return Err(DispatcherBusy);
        }
        *state = DispatchState::Running(request);
        Ok(RunGuard {
            cell: self,
            finished: false,
        })
    }
}

/// Ends a run. Dropped without [`RunGuard::finish`] (the caller abandoned the
/// future) it puts the cell back to `Idle`.
#[derive(Debug)]
pub struct RunGuard<'a, R> {
    cell: &'a StateCell<R>,
    finished: bool,
}

impl<R> RunGuard<'_, R> {
    pub fn finish(mut self, outcome: ResolutionOutcome) {
        let next = if outcome.is_success() {
            DispatchState::Succeeded(outcome)
        } else {
            DispatchState::Failed(outcome)
        };
        *self.cell.inner.lock() = next;
        self.finished = true;
    }
}

impl<R> Drop for RunGuard<'_, R> {
    fn drop(&mut self) {
        if !self.finished {
            *self.cell.inner.lock() = DispatchState::Idle;
        }
    }
}
