//! Worker pool shared by the point, path and area writers.

use crate::coord::Srid;
use crate::element::ElementKind;
use crate::geom::GeometryContext;
use crate::log::Logger;
use crate::writer::state::StateCell;
use crate::writer::{
    AreaStrategy, ElementQueue, KindStrategy, PathStrategy, PointStrategy, WriterError,
    WriterServices, WriterState,
};
use crate::{log_at, log_debug, log_error, log_info, log_trace, log_warn};
use std::fmt;
use std::ops::AddAssign;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

pub type PointWriter = ElementWriter<PointStrategy>;
pub type PathWriter = ElementWriter<PathStrategy>;
pub type AreaWriter = ElementWriter<AreaStrategy>;

/// Counts reported when a writer is done.
///
/// Informational only; there is no failure threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriterSummary {
    pub kind: ElementKind,
    /// Elements taken off the queue.
    pub processed: u64,
    /// Successful insert calls.
    pub inserted: u64,
    /// Elements that produced no insert call: no match, failed build,
    /// failed clip or clipped away entirely.
    pub skipped: u64,
    /// Insert calls the backend rejected.
    pub insert_failures: u64,
}

impl fmt::Display for WriterSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}s: {} processed, {} inserted, {} skipped, {} insert failures",
            self.kind, self.processed, self.inserted, self.skipped, self.insert_failures
        )
    }
}

/// Per-worker counts, summed on join.
#[derive(Debug, Default, Clone, Copy)]
struct Tally {
    processed: u64,
    inserted: u64,
    skipped: u64,
    insert_failures: u64,
}

impl AddAssign for Tally {
    fn add_assign(&mut self, other: Self) {
        self.processed += other.processed;
        self.inserted += other.inserted;
        self.skipped += other.skipped;
        self.insert_failures += other.insert_failures;
    }
}

/// Runs a fixed pool of workers over one element queue.
///
/// # Lifecycle
///
/// ```text
/// Created ──start()──► Running ──queue closed──► Draining ──all workers exited──► Done
/// ```
///
/// Each worker acquires one geometry context when it starts and drops it
/// when it exits. Per element it matches, builds, clips, expires and
/// inserts; any per-element failure is logged and the worker moves on.
/// [`await_done`](Self::await_done) blocks until every worker has exited.
pub struct ElementWriter<S: KindStrategy> {
    strategy: Arc<S>,
    services: WriterServices,
    srid: Srid,
    workers: usize,
    queue: Option<ElementQueue<S::Element>>,
    state: Arc<StateCell>,
    handles: Vec<JoinHandle<Result<Tally, WriterError>>>,
    summary: Option<WriterSummary>,
    failure: Option<WriterError>,
}

impl ElementWriter<PointStrategy> {
    pub fn points(
        queue: ElementQueue<crate::element::Point>,
        services: WriterServices,
        srid: Srid,
        workers: usize,
    ) -> Self {
        Self::with_strategy(PointStrategy, queue, services, srid, workers)
    }
}

impl ElementWriter<PathStrategy> {
    pub fn paths(
        queue: ElementQueue<crate::element::Path>,
        services: WriterServices,
        srid: Srid,
        workers: usize,
    ) -> Self {
        Self::with_strategy(PathStrategy, queue, services, srid, workers)
    }
}

impl ElementWriter<AreaStrategy> {
    pub fn areas(
        queue: ElementQueue<crate::element::Area>,
        services: WriterServices,
        srid: Srid,
        workers: usize,
    ) -> Self {
        Self::with_strategy(AreaStrategy, queue, services, srid, workers)
    }
}

impl<S: KindStrategy> ElementWriter<S> {
    pub fn with_strategy(
        strategy: S,
        queue: ElementQueue<S::Element>,
        services: WriterServices,
        srid: Srid,
        workers: usize,
    ) -> Self {
        Self {
            strategy: Arc::new(strategy),
            services,
            srid,
            workers,
            queue: Some(queue),
            state: Arc::new(StateCell::new()),
            handles: Vec::new(),
            summary: None,
            failure: None,
        }
    }

    pub fn state(&self) -> WriterState {
        self.state.get()
    }

    pub fn kind(&self) -> ElementKind {
        self.strategy.kind()
    }

    /// Counts of the finished run, including the work done by workers
    /// that exited cleanly when another one failed.
    pub fn summary(&self) -> Option<WriterSummary> {
        self.summary
    }

    /// Spawn the worker pool.
    ///
    /// The writer keeps no handle on the queue afterwards, so once every
    /// worker has exited producers see the queue as closed.
    pub fn start(&mut self) -> Result<(), WriterError> {
        if self.workers == 0 {
            return Err(WriterError::NoWorkers);
        }
        if !self
            .state
            .transition(WriterState::Created, WriterState::Running)
        {
            return Err(WriterError::AlreadyStarted);
        }
        let queue = self.queue.take().ok_or(WriterError::AlreadyStarted)?;
        let kind = self.strategy.kind();

        log_info!(
            self.services.logger,
            "Starting {} writer with {} workers ({})",
            kind,
            self.workers,
            self.srid
        );

        for i in 0..self.workers {
            let worker = Worker {
                index: i,
                strategy: Arc::clone(&self.strategy),
                services: self.services.clone(),
                srid: self.srid,
                queue: queue.clone(),
                state: Arc::clone(&self.state),
            };
            let handle = thread::Builder::new()
                .name(format!("{}-writer-{}", kind, i))
                .spawn(move || worker.run())?;
            self.handles.push(handle);
        }
        Ok(())
    }

    /// Block until every worker has exited, then report the run.
    ///
    /// Returns the first resource-fatal worker error, if any, after all
    /// workers have been joined. The outcome is kept: later calls return
    /// the same summary or error, and [`summary`](Self::summary) holds the
    /// counts in both cases.
    pub fn await_done(&mut self) -> Result<WriterSummary, WriterError> {
        if let Some(summary) = self.summary {
            return match &self.failure {
                Some(e) => Err(e.clone()),
                None => Ok(summary),
            };
        }
        if self.state() == WriterState::Created {
            return Err(WriterError::NotStarted);
        }

        let mut tally = Tally::default();
        let mut first_error = None;
        for handle in self.handles.drain(..) {
            let name = handle.thread().name().unwrap_or("writer").to_string();
            let result = handle
                .join()
                .unwrap_or_else(|_| Err(WriterError::WorkerPanicked(name)));
            match result {
                Ok(t) => tally += t,
                Err(e) => {
                    first_error.get_or_insert(e);
                }
            }
        }
        self.state.set(WriterState::Done);

        let summary = WriterSummary {
            kind: self.strategy.kind(),
            processed: tally.processed,
            inserted: tally.inserted,
            skipped: tally.skipped,
            insert_failures: tally.insert_failures,
        };
        self.summary = Some(summary);

        match first_error {
            Some(e) => {
                log_error!(self.services.logger, "Writer failed: {} ({})", e, summary);
                self.failure = Some(e.clone());
                Err(e)
            }
            None => {
                log_info!(self.services.logger, "Writer done: {}", summary);
                Ok(summary)
            }
        }
    }
}

/// One pool thread.
struct Worker<S: KindStrategy> {
    index: usize,
    strategy: Arc<S>,
    services: WriterServices,
    srid: Srid,
    queue: ElementQueue<S::Element>,
    state: Arc<StateCell>,
}

impl<S: KindStrategy> Worker<S> {
    fn run(self) -> Result<Tally, WriterError> {
        let kind = self.strategy.kind();
        let mut ctx = self.services.engine.acquire(self.srid)?;
        log_debug!(self.services.logger, "{} worker {} started", kind, self.index);

        let mut tally = Tally::default();
        while let Some(element) = self.queue.recv() {
            tally += self.process(&mut *ctx, &element);
        }
        if self
            .state
            .transition(WriterState::Running, WriterState::Draining)
        {
            log_debug!(self.services.logger, "{} queue closed, draining", kind);
        }

        drop(ctx);
        log_debug!(
            self.services.logger,
            "{} worker {} exiting after {} elements",
            kind,
            self.index,
            tally.processed
        );
        Ok(tally)
    }

    /// Match, build, clip, expire and insert one element.
    fn process(&self, ctx: &mut dyn GeometryContext, element: &S::Element) -> Tally {
        let services = &self.services;
        let logger: &dyn Logger = services.logger.as_ref();
        let strategy = &self.strategy;
        let kind = strategy.kind();
        let id = strategy.id(element);
        let mut tally = Tally {
            processed: 1,
            ..Tally::default()
        };
        strategy.add_progress(services.progress.as_ref(), 1);

        let matches = strategy.matches(services.matcher.as_ref(), element);
        if matches.is_empty() {
            tally.skipped = 1;
            return tally;
        }

        let geom = match strategy.build(ctx, services.cache.as_ref(), element) {
            Ok(geom) => geom,
            Err(e) => {
                log_at!(
                    logger,
                    e.severity().log_level(),
                    "Skipping {} {}: {}",
                    kind,
                    id,
                    e
                );
                tally.skipped = 1;
                return tally;
            }
        };

        let geoms = match &services.clipper {
            Some(clipper) => match clipper.clip(&geom) {
                Ok(parts) => strategy.shape(geom, parts),
                Err(e) => {
                    log_warn!(logger, "Failed to clip {} {}: {}", kind, id, e);
                    tally.skipped = 1;
                    return tally;
                }
            },
            None => vec![geom],
        };
        if geoms.is_empty() {
            log_trace!(logger, "{} {} outside clip region", kind, id);
            tally.skipped = 1;
            return tally;
        }

        if let (Some(expire), Some((lon, lat))) = (&services.expire, strategy.expire_coord(element))
        {
            expire.expire(lon, lat);
        }

        for m in &matches {
            for geom in &geoms {
                match strategy.insert(services.inserter.as_ref(), element, geom, m) {
                    Ok(()) => tally.inserted += 1,
                    Err(e) => {
                        log_warn!(
                            logger,
                            "Failed to insert {} {} into {}: {}",
                            kind,
                            id,
                            m,
                            e
                        );
                        tally.insert_failures += 1;
                    }
                }
            }
        }
        tally
    }
}
