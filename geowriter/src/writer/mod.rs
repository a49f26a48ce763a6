//! Concurrent element writers.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────┐      ┌─────────────────────────────────────────────┐
//! │ QueueSender   │ ───► │ ElementQueue (bounded FIFO, shared receiver)│
//! └───────────────┘      └──────────────────────┬──────────────────────┘
//!                                               │ one element, one worker
//!                        ┌──────────────────────┼──────────────────────┐
//!                        ▼                      ▼                      ▼
//!                  ┌──────────┐           ┌──────────┐           ┌──────────┐
//!                  │ worker 0 │           │ worker 1 │    ...    │ worker N │
//!                  │ context  │           │ context  │           │ context  │
//!                  └────┬─────┘           └────┬─────┘           └────┬─────┘
//!                       └──── match → build → clip → expire → insert ─┘
//! ```
//!
//! [`ElementWriter`] owns the pool and the lifecycle; a [`KindStrategy`]
//! supplies what is specific to points, paths or areas. Collaborators
//! arrive bundled in [`WriterServices`].

mod element_writer;
mod error;
mod queue;
mod services;
mod set;
mod state;
mod strategy;

pub use element_writer::{AreaWriter, ElementWriter, PathWriter, PointWriter, WriterSummary};
pub use error::WriterError;
pub use queue::{element_queue, ElementQueue, QueueClosed, QueueSender};
pub use services::WriterServices;
pub use set::{WriterQueues, WriterSet, WriterSetSummary};
pub use state::WriterState;
pub use strategy::{AreaStrategy, KindStrategy, PathStrategy, PointStrategy};
