//! Writer lifecycle.

use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};

/// Lifecycle of an element writer. `Done` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum WriterState {
    /// Constructed, no workers yet.
    Created = 0,
    /// Workers are consuming the queue.
    Running = 1,
    /// The queue is closed; workers finish what is in flight.
    Draining = 2,
    /// Every worker exited and released its context.
    Done = 3,
}

impl WriterState {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => WriterState::Created,
            1 => WriterState::Running,
            2 => WriterState::Draining,
            _ => WriterState::Done,
        }
    }
}

impl fmt::Display for WriterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WriterState::Created => "created",
            WriterState::Running => "running",
            WriterState::Draining => "draining",
            WriterState::Done => "done",
        };
        f.write_str(name)
    }
}

/// Atomically shared [`WriterState`].
#[derive(Debug)]
pub(crate) struct StateCell(AtomicU8);

impl StateCell {
    pub(crate) fn new() -> Self {
        Self(AtomicU8::new(WriterState::Created as u8))
    }

    pub(crate) fn get(&self) -> WriterState {
        WriterState::from_u8(self.0.load(Ordering::Acquire))
    }

    /// Move from `from` to `to`; false if the state was not `from`.
    pub(crate) fn transition(&self, from: WriterState, to: WriterState) -> bool {
        self.0
            .compare_exchange(from as u8, to as u8, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    pub(crate) fn set(&self, state: WriterState) {
        self.0.store(state as u8, Ordering::Release);
    }
}
