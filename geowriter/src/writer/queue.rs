//! Bounded FIFO shared by a writer's workers.

use parking_lot::Mutex;
use std::sync::mpsc::{self, Receiver, SyncSender};
use std::sync::Arc;
use thiserror::Error;

/// Every receiver is gone; the element was not delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("element queue is closed")]
pub struct QueueClosed;

/// Create a queue holding at most `capacity` undelivered elements.
///
/// A capacity of zero is raised to one so producers never rendezvous
/// with a worker on every element.
pub fn element_queue<T>(capacity: usize) -> (QueueSender<T>, ElementQueue<T>) {
    let (tx, rx) = mpsc::sync_channel(capacity.max(1));
    (
        QueueSender { tx },
        ElementQueue {
            rx: Arc::new(Mutex::new(rx)),
        },
    )
}

/// Producer side. The queue closes once every sender is closed or dropped.
#[derive(Debug)]
pub struct QueueSender<T> {
    tx: SyncSender<T>,
}

impl<T> Clone for QueueSender<T> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<T> QueueSender<T> {
    /// Block until there is room, then enqueue `element`.
    pub fn send(&self, element: T) -> Result<(), QueueClosed> {
        self.tx.send(element).map_err(|_| QueueClosed)
    }

    /// Signal that this producer has no more input.
    pub fn close(self) {}
}

/// Consumer side, shared by all workers. Each element is received by
/// exactly one of them.
#[derive(Debug)]
pub struct ElementQueue<T> {
    rx: Arc<Mutex<Receiver<T>>>,
}

impl<T> Clone for ElementQueue<T> {
    fn clone(&self) -> Self {
        Self {
            rx: Arc::clone(&self.rx),
        }
    }
}

impl<T> ElementQueue<T> {
    /// Next element, or `None` once the queue is closed and drained.
    pub fn recv(&self) -> Option<T> {
        self.rx.lock().recv().ok()
    }
}
