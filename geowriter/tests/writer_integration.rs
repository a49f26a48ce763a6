//! End-to-end tests for the element writers.

use geowriter::cache::MemoryCache;
use geowriter::clip::{ClipError, Clipper, LonLatBox, RegionClipper};
use geowriter::coord::Srid;
use geowriter::element::{Area, ElementKind, Member, Path, Point};
use geowriter::expire::CoordExpireSet;
use geowriter::geom::{
    EngineError, GeoEngine, Geometry, GeometryContext, GeometryEngine, GeometryType,
};
use geowriter::insert::{InsertError, Inserter};
use geowriter::log::{LogLevel, Logger, MemoryLogger, NoOpLogger};
use geowriter::mapping::{Match, TagMapping};
use geowriter::progress::Statistics;
use geowriter::writer::{
    element_queue, PointWriter, WriterError, WriterServices, WriterSet, WriterState,
};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

const MAPPING: &str = "
[poi]
type = point
amenity = restaurant, cafe

[roads]
type = linestring
highway = *

[buildings]
type = polygon
building = *

[rejected]
type = polygon
building = *
";

#[derive(Debug, Clone, PartialEq)]
struct Row {
    kind: ElementKind,
    id: i64,
    table: String,
    geometry: GeometryType,
}

/// Records every insert; rows for `reject_table` fail.
#[derive(Default)]
struct RecordingInserter {
    rows: Mutex<Vec<Row>>,
    reject_table: Option<String>,
    panic_on: Option<i64>,
}

impl RecordingInserter {
    fn rejecting(table: &str) -> Self {
        Self {
            reject_table: Some(table.to_string()),
            ..Self::default()
        }
    }

    fn record(
        &self,
        kind: ElementKind,
        id: i64,
        geom: &Geometry,
        m: &Match,
    ) -> Result<(), InsertError> {
        if self.panic_on == Some(id) {
            panic!("backend crashed on {}", id);
        }
        if self.reject_table.as_deref() == Some(m.table.as_str()) {
            return Err(InsertError::Rejected(m.table.clone()));
        }
        self.rows.lock().push(Row {
            kind,
            id,
            table: m.table.clone(),
            geometry: geom.geometry_type(),
        });
        Ok(())
    }

    fn rows(&self) -> Vec<Row> {
        let mut rows = self.rows.lock().clone();
        rows.sort_by_key(|r| (r.id, r.table.clone()));
        rows
    }

    fn count(&self) -> usize {
        self.rows.lock().len()
    }
}

impl Inserter for RecordingInserter {
    fn insert_point(&self, point: &Point, geom: &Geometry, m: &Match) -> Result<(), InsertError> {
        self.record(ElementKind::Point, point.id, geom, m)
    }

    fn insert_path(&self, path: &Path, geom: &Geometry, m: &Match) -> Result<(), InsertError> {
        self.record(ElementKind::Path, path.id, geom, m)
    }

    fn insert_area(&self, area: &Area, geom: &Geometry, m: &Match) -> Result<(), InsertError> {
        self.record(ElementKind::Area, area.id, geom, m)
    }
}

/// Hands out at most `allowed` contexts.
struct LimitedEngine {
    inner: GeoEngine,
    allowed: AtomicUsize,
}

impl GeometryEngine for LimitedEngine {
    fn acquire(&self, srid: Srid) -> Result<Box<dyn GeometryContext>, EngineError> {
        self.allowed
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .map_err(|_| EngineError::Unavailable("no contexts left".to_string()))?;
        self.inner.acquire(srid)
    }
}

/// Clips like `inner` but fails for geometries starting at `fail_lon`.
struct FailingClipper {
    inner: RegionClipper,
    fail_lon: f64,
}

impl Clipper for FailingClipper {
    fn clip(&self, geom: &Geometry) -> Result<Vec<Geometry>, ClipError> {
        let min_lon = geom.bounding_rect().map(|r| r.min().x);
        if min_lon == Some(self.fail_lon) {
            return Err(ClipError::Intersection("topology collapse".to_string()));
        }
        self.inner.clip(geom)
    }
}

struct Fixture {
    cache: Arc<MemoryCache>,
    inserter: Arc<RecordingInserter>,
    stats: Arc<Statistics>,
    engine: GeoEngine,
    logger: Arc<MemoryLogger>,
}

impl Fixture {
    fn new(inserter: RecordingInserter) -> Self {
        Self {
            cache: Arc::new(MemoryCache::new()),
            inserter: Arc::new(inserter),
            stats: Arc::new(Statistics::new()),
            engine: GeoEngine::new(),
            logger: Arc::new(MemoryLogger::new()),
        }
    }

    fn services(&self) -> WriterServices {
        WriterServices::new(
            self.cache.clone(),
            self.inserter.clone(),
            self.stats.clone(),
            Arc::new(TagMapping::parse(MAPPING).unwrap()),
            Arc::new(self.engine.clone()),
            self.logger.clone(),
        )
    }
}

fn cafe(id: i64, lon: f64, lat: f64) -> Point {
    Point::new(id, lon, lat).with_tag("amenity", "cafe")
}

#[test]
fn test_point_scenario() {
    let fixture = Fixture::new(RecordingInserter::default());
    let expire = Arc::new(CoordExpireSet::new());
    let services = fixture.services().with_expire(expire.clone());

    let (tx, rx) = element_queue(8);
    let mut writer = PointWriter::points(rx, services, Srid::WebMercator, 4);
    writer.start().unwrap();

    tx.send(Point::new(1, 10.0, 20.0).with_tag("amenity", "restaurant"))
        .unwrap();
    tx.send(Point::new(2, 0.0, 0.0)).unwrap();
    tx.send(cafe(3, 0.0, 95.0)).unwrap();
    tx.close();

    let summary = writer.await_done().unwrap();

    assert_eq!(
        fixture.inserter.rows(),
        vec![Row {
            kind: ElementKind::Point,
            id: 1,
            table: "poi".to_string(),
            geometry: GeometryType::Point,
        }]
    );
    assert_eq!(summary.inserted, 1);
    assert_eq!(summary.processed, 3);
    assert_eq!(expire.len(), 1);
    assert!(expire.contains(10.0, 20.0));
    assert_eq!(fixture.stats.snapshot().points, 3);
    assert_eq!(fixture.logger.count_at_least(LogLevel::Warn), 1);
    assert!(fixture.logger.contains("point 3"));
    assert_eq!(writer.state(), WriterState::Done);
}

#[test]
fn test_clipped_away_is_silent() {
    let fixture = Fixture::new(RecordingInserter::default());
    let expire = Arc::new(CoordExpireSet::new());
    let clipper =
        RegionClipper::from_boxes(&[LonLatBox::new(0.0, 0.0, 10.0, 10.0)], Srid::WebMercator)
            .unwrap();
    let services = fixture
        .services()
        .with_clipper(Arc::new(clipper))
        .with_expire(expire.clone());

    let (tx, rx) = element_queue(8);
    let mut writer = PointWriter::points(rx, services, Srid::WebMercator, 2);
    writer.start().unwrap();

    tx.send(cafe(1, 50.0, 50.0)).unwrap();
    tx.send(cafe(2, 5.0, 5.0)).unwrap();
    tx.close();

    let summary = writer.await_done().unwrap();
    assert_eq!(summary.inserted, 1);
    assert_eq!(summary.skipped, 1);
    assert_eq!(fixture.inserter.rows()[0].id, 2);
    assert_eq!(expire.entries(), vec![(5.0, 5.0)]);
    assert_eq!(fixture.logger.count_at_least(LogLevel::Warn), 0);
}

#[test]
fn test_paths_and_areas_with_clipping() {
    let fixture = Fixture::new(RecordingInserter::rejecting("rejected"));
    let cache = &fixture.cache;
    cache.put_point(1, -5.0, 5.0);
    cache.put_point(2, 15.0, 5.0);
    cache.put_point(3, 5.0, 1.0);
    cache.put_point(4, 6.0, 1.0);
    for (id, lon, lat) in [(5, 1.0, 1.0), (6, 4.0, 1.0), (7, 4.0, 4.0), (8, 1.0, 4.0)] {
        cache.put_point(id, lon, lat);
    }
    for (id, lon, lat) in [(9, 50.0, 50.0), (10, 51.0, 50.0), (11, 51.0, 51.0)] {
        cache.put_point(id, lon, lat);
    }
    cache.put_path(20, vec![5, 6, 7, 8, 5]);
    cache.put_path(21, vec![9, 10, 11, 9]);

    let clipper =
        RegionClipper::from_boxes(&[LonLatBox::new(0.0, 0.0, 10.0, 10.0)], Srid::Wgs84).unwrap();
    let services = fixture.services().with_clipper(Arc::new(clipper));
    let (mut set, queues) = WriterSet::new(services, Srid::Wgs84, 3, 4);
    set.start().unwrap();

    let paths = [
        Path::new(100, vec![1, 2]).with_tag("highway", "primary"),
        Path::new(101, vec![3, 99]).with_tag("highway", "service"),
        Path::new(102, vec![3, 4]).with_tag("highway", "track"),
        Path::new(103, vec![1, 2]),
    ];
    for path in paths {
        queues.paths.send(path).unwrap();
    }
    queues
        .areas
        .send(
            Area::new(200, vec![Member::new(20, ElementKind::Path, "outer")])
                .with_tag("building", "yes"),
        )
        .unwrap();
    queues
        .areas
        .send(
            Area::new(201, vec![Member::new(21, ElementKind::Path, "")])
                .with_tag("building", "yes"),
        )
        .unwrap();
    queues
        .areas
        .send(
            Area::new(202, vec![Member::new(77, ElementKind::Path, "outer")])
                .with_tag("building", "yes"),
        )
        .unwrap();
    queues.close();

    let summary = set.await_done().unwrap();

    let rows = fixture.inserter.rows();
    let ids: Vec<(i64, &str, GeometryType)> = rows
        .iter()
        .map(|r| (r.id, r.table.as_str(), r.geometry))
        .collect();
    assert_eq!(
        ids,
        vec![
            (100, "roads", GeometryType::LineString),
            (102, "roads", GeometryType::LineString),
            (200, "buildings", GeometryType::Polygon),
        ]
    );

    assert_eq!(summary.paths.processed, 4);
    assert_eq!(summary.paths.inserted, 2);
    assert_eq!(summary.paths.skipped, 2);
    assert_eq!(summary.areas.processed, 3);
    assert_eq!(summary.areas.inserted, 1);
    assert_eq!(summary.areas.insert_failures, 1);
    assert_eq!(summary.areas.skipped, 2);
    assert_eq!(summary.points.processed, 0);
    assert_eq!(summary.inserted(), 3);

    // Missing references are debug noise; only the rejected insert warns.
    assert_eq!(fixture.logger.count_at_least(LogLevel::Warn), 1);
    assert!(fixture.logger.contains("Failed to insert area 200 into rejected"));
    assert!(fixture.logger.contains("path 101"));

    let stats = fixture.engine.stats();
    assert_eq!(stats.acquired, 9);
    assert_eq!(stats.released, 9);
}

#[test]
fn test_contexts_released_when_acquisition_fails() {
    let fixture = Fixture::new(RecordingInserter::default());
    let engine = LimitedEngine {
        inner: fixture.engine.clone(),
        allowed: AtomicUsize::new(2),
    };
    let mut services = fixture.services();
    services.engine = Arc::new(engine);

    let (tx, rx) = element_queue(4);
    let mut writer = PointWriter::points(rx, services, Srid::Wgs84, 4);
    writer.start().unwrap();
    for i in 0..50 {
        tx.send(cafe(i, 1.0, 1.0)).unwrap();
    }
    tx.close();

    assert!(matches!(
        writer.await_done(),
        Err(WriterError::Engine(EngineError::Unavailable(_)))
    ));
    assert_eq!(writer.state(), WriterState::Done);
    assert_eq!(fixture.inserter.count(), 50);

    let stats = fixture.engine.stats();
    assert_eq!(stats.acquired, 2);
    assert_eq!(stats.live(), 0);
}

#[test]
fn test_failed_run_keeps_summary_and_error() {
    let fixture = Fixture::new(RecordingInserter::default());
    let mut services = fixture.services();
    services.engine = Arc::new(LimitedEngine {
        inner: fixture.engine.clone(),
        allowed: AtomicUsize::new(1),
    });

    let (tx, rx) = element_queue(4);
    let mut writer = PointWriter::points(rx, services, Srid::Wgs84, 2);
    writer.start().unwrap();
    for i in 0..10 {
        tx.send(cafe(i, 1.0, 1.0)).unwrap();
    }
    tx.close();

    let first = writer.await_done().unwrap_err();
    assert_eq!(
        first.to_string(),
        "geometry engine unavailable: no contexts left"
    );
    let summary = writer.summary().unwrap();
    assert_eq!(summary.processed, 10);
    assert_eq!(summary.inserted, 10);

    // Asking again reports the same outcome.
    let second = writer.await_done().unwrap_err();
    assert!(matches!(
        second,
        WriterError::Engine(EngineError::Unavailable(_))
    ));
    assert_eq!(writer.summary(), Some(summary));
    assert!(fixture.logger.contains("Writer failed"));
}

#[test]
fn test_clip_failure_skips_only_that_element() {
    let fixture = Fixture::new(RecordingInserter::default());
    let expire = Arc::new(CoordExpireSet::new());
    let world = LonLatBox::new(-180.0, -80.0, 180.0, 80.0);
    let clipper = FailingClipper {
        inner: RegionClipper::from_boxes(&[world], Srid::Wgs84).unwrap(),
        fail_lon: 3.0,
    };
    let services = fixture
        .services()
        .with_clipper(Arc::new(clipper))
        .with_expire(expire.clone());

    let (tx, rx) = element_queue(8);
    let mut writer = PointWriter::points(rx, services, Srid::Wgs84, 2);
    writer.start().unwrap();
    for id in 1..=5 {
        tx.send(cafe(id, id as f64, 1.0)).unwrap();
    }
    tx.close();

    let summary = writer.await_done().unwrap();
    let ids: Vec<i64> = fixture.inserter.rows().iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 2, 4, 5]);
    assert_eq!(summary.processed, 5);
    assert_eq!(summary.inserted, 4);
    assert_eq!(summary.skipped, 1);
    assert_eq!(fixture.logger.count_at_least(LogLevel::Warn), 1);
    assert!(fixture.logger.contains("Failed to clip point 3"));
    assert!(!expire.contains(3.0, 1.0));
    assert_eq!(expire.len(), 4);
}

#[test]
fn test_worker_panic_releases_context() {
    let fixture = Fixture::new(RecordingInserter {
        panic_on: Some(1),
        ..RecordingInserter::default()
    });
    let (tx, rx) = element_queue(4);
    tx.send(cafe(1, 1.0, 1.0)).unwrap();
    tx.close();

    let mut writer = PointWriter::points(rx, fixture.services(), Srid::Wgs84, 1);
    writer.start().unwrap();

    assert!(matches!(
        writer.await_done(),
        Err(WriterError::WorkerPanicked(_))
    ));
    let stats = fixture.engine.stats();
    assert_eq!(stats.acquired, 1);
    assert_eq!(stats.released, 1);
}

#[test]
fn test_await_done_waits_for_queue_close() {
    let fixture = Fixture::new(RecordingInserter::default());
    let (tx, rx) = element_queue(4);
    let mut writer = PointWriter::points(rx, fixture.services(), Srid::Wgs84, 3);
    writer.start().unwrap();

    let done = Arc::new(AtomicBool::new(false));
    let waiter = {
        let done = Arc::clone(&done);
        thread::spawn(move || {
            let result = writer.await_done();
            done.store(true, Ordering::SeqCst);
            result
        })
    };

    for i in 0..100 {
        tx.send(cafe(i, 1.0, 1.0)).unwrap();
    }
    thread::sleep(Duration::from_millis(50));
    assert!(!done.load(Ordering::SeqCst));

    tx.close();
    let summary = waiter.join().unwrap().unwrap();
    assert!(done.load(Ordering::SeqCst));
    assert_eq!(summary.processed, 100);
    assert_eq!(fixture.inserter.count(), 100);
}

#[test]
fn test_concurrent_expire_has_no_duplicates() {
    let fixture = Fixture::new(RecordingInserter::default());
    let expire = Arc::new(CoordExpireSet::new());
    let services = fixture.services().with_expire(expire.clone());

    let (tx, rx) = element_queue(16);
    let mut writer = PointWriter::points(rx, services, Srid::WebMercator, 4);
    writer.start().unwrap();

    let producer = thread::spawn(move || {
        for i in 0..400 {
            let n = (i % 25) as f64;
            tx.send(cafe(i, n, n / 2.0)).unwrap();
        }
    });
    producer.join().unwrap();

    let summary = writer.await_done().unwrap();
    assert_eq!(summary.inserted, 400);
    assert_eq!(expire.len(), 25);
}

#[test]
fn test_independent_pipelines_do_not_share_logs() {
    let quiet: Arc<dyn Logger> = Arc::new(NoOpLogger);
    let first = Fixture::new(RecordingInserter::default());
    let second = Fixture::new(RecordingInserter::default());

    let mut quiet_services = first.services();
    quiet_services.logger = quiet;

    let (tx1, rx1) = element_queue(4);
    let (tx2, rx2) = element_queue(4);
    let mut w1 = PointWriter::points(rx1, quiet_services, Srid::Wgs84, 1);
    let mut w2 = PointWriter::points(rx2, second.services(), Srid::Wgs84, 1);
    w1.start().unwrap();
    w2.start().unwrap();

    tx1.send(cafe(1, 0.0, 91.0)).unwrap();
    tx2.send(cafe(2, 1.0, 1.0)).unwrap();
    tx1.close();
    tx2.close();
    w1.await_done().unwrap();
    w2.await_done().unwrap();

    assert!(first.logger.records().is_empty());
    assert_eq!(second.logger.count_at_least(LogLevel::Warn), 0);
    assert_eq!(first.stats.snapshot().points, 1);
    assert_eq!(second.stats.snapshot().points, 1);
}
