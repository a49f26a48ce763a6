//! Collaborators shared by all workers of a writer.

use crate::cache::ElementCache;
use crate::clip::Clipper;
use crate::expire::ExpireTracker;
use crate::geom::GeometryEngine;
use crate::insert::Inserter;
use crate::log::Logger;
use crate::mapping::Matcher;
use crate::progress::Progress;
use std::sync::Arc;

/// Everything a writer talks to besides its queue.
///
/// Cheap to clone; every field is shared.
#[derive(Clone)]
pub struct WriterServices {
    pub cache: Arc<dyn ElementCache>,
    pub inserter: Arc<dyn Inserter>,
    pub progress: Arc<dyn Progress>,
    pub matcher: Arc<dyn Matcher>,
    pub engine: Arc<dyn GeometryEngine>,
    pub logger: Arc<dyn Logger>,
    /// Clipping is skipped when unset.
    pub clipper: Option<Arc<dyn Clipper>>,
    /// Expire tracking is skipped when unset.
    pub expire: Option<Arc<dyn ExpireTracker>>,
}

impl WriterServices {
    pub fn new(
        cache: Arc<dyn ElementCache>,
        inserter: Arc<dyn Inserter>,
        progress: Arc<dyn Progress>,
        matcher: Arc<dyn Matcher>,
        engine: Arc<dyn GeometryEngine>,
        logger: Arc<dyn Logger>,
    ) -> Self {
        Self {
            cache,
            inserter,
            progress,
            matcher,
            engine,
            logger,
            clipper: None,
            expire: None,
        }
    }

    pub fn with_clipper(mut self, clipper: Arc<dyn Clipper>) -> Self {
        self.clipper = Some(clipper);
        self
    }

    pub fn with_expire(mut self, expire: Arc<dyn ExpireTracker>) -> Self {
        self.expire = Some(expire);
        self
    }
}
