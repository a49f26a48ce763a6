//! All three writers over one set of collaborators.

use crate::coord::Srid;
use crate::element::{Area, Path, Point};
use crate::writer::{
    element_queue, AreaWriter, PathWriter, PointWriter, QueueSender, WriterError,
    WriterServices, WriterState, WriterSummary,
};

/// Producer handles for a [`WriterSet`].
#[derive(Debug)]
pub struct WriterQueues {
    pub points: QueueSender<Point>,
    pub paths: QueueSender<Path>,
    pub areas: QueueSender<Area>,
}

impl WriterQueues {
    /// Close all three queues.
    pub fn close(self) {}
}

/// Summaries of a finished [`WriterSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriterSetSummary {
    pub points: WriterSummary,
    pub paths: WriterSummary,
    pub areas: WriterSummary,
}

impl WriterSetSummary {
    pub fn inserted(&self) -> u64 {
        self.points.inserted + self.paths.inserted + self.areas.inserted
    }
}

/// Point, path and area writers sharing services and SRID.
pub struct WriterSet {
    points: PointWriter,
    paths: PathWriter,
    areas: AreaWriter,
}

impl WriterSet {
    /// Each writer gets `workers` threads and its own queue of
    /// `capacity` elements.
    pub fn new(
        services: WriterServices,
        srid: Srid,
        workers: usize,
        capacity: usize,
    ) -> (Self, WriterQueues) {
        let (point_tx, point_rx) = element_queue(capacity);
        let (path_tx, path_rx) = element_queue(capacity);
        let (area_tx, area_rx) = element_queue(capacity);

        let set = Self {
            points: PointWriter::points(point_rx, services.clone(), srid, workers),
            paths: PathWriter::paths(path_rx, services.clone(), srid, workers),
            areas: AreaWriter::areas(area_rx, services, srid, workers),
        };
        let queues = WriterQueues {
            points: point_tx,
            paths: path_tx,
            areas: area_tx,
        };
        (set, queues)
    }

    /// Start all three writers.
    ///
    /// Every writer is attempted even if an earlier one failed, and the
    /// first error is returned. Writers that did start keep running:
    /// close the queues and call [`await_done`](Self::await_done) to join
    /// them.
    pub fn start(&mut self) -> Result<(), WriterError> {
        let points = self.points.start();
        let paths = self.paths.start();
        let areas = self.areas.start();
        points.and(paths).and(areas)
    }

    pub fn states(&self) -> [WriterState; 3] {
        [self.points.state(), self.paths.state(), self.areas.state()]
    }

    /// Wait for all writers. Every writer is awaited even if an earlier
    /// one failed; the first error is returned.
    pub fn await_done(&mut self) -> Result<WriterSetSummary, WriterError> {
        let points = self.points.await_done();
        let paths = self.paths.await_done();
        let areas = self.areas.await_done();
        Ok(WriterSetSummary {
            points: points?,
            paths: paths?,
            areas: areas?,
        })
    }
}
