use crate::config::CaptureConfig;
use crate::geometry::{Point, Polygon};
use crate::log::debug;

/// Why an unfinished path was thrown away instead of becoming a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscardReason {
    TooFewPoints,
    NotClosed,
    Degenerate,
}

/// Accumulates pointer samples for one freehand path at a time.
#[derive(Debug, Clone)]
pub struct PathCapture {
    config: CaptureConfig,
    points: Vec<Point>,
    active: bool,
}

impl PathCapture {
    pub fn new(config: CaptureConfig) -> Self {
        Self {
            config,
            points: Vec::new(),
            active: false,
        }
    }

    pub fn config(&self) -> &CaptureConfig {
        &self.config
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Starts a new path at `point`, dropping any unfinished one.
    pub fn begin(&mut self, point: Point) {
        self.points.clear();
        self.points.push(point);
        self.active = true;
    }

    /// Records `point` if a path is active and it moved farther than the
    /// minimum sample distance from the last recorded point.
    pub fn extend(&mut self, point: Point) -> bool {
        if !self.active {
            return false;
        }
        let far_enough = self
            .points
            .last()
            .is_none_or(|last| last.distance(point) > self.config.min_sample_distance);
        if far_enough {
            self.points.push(point);
        }
        far_enough
    }

    /// Ends the current path. Yields a polygon when the path has at least
    /// three samples and ends within the closure tolerance of its start; the
    /// final sample stands in for the start point and is trimmed.
    pub fn try_close(&mut self) -> Result<Polygon, DiscardReason> {
        self.active = false;
        let mut points = std::mem::take(&mut self.points);

        if points.len() < 3 {
            debug!(samples = points.len(), "path discarded: too few points");
            return Err(DiscardReason::TooFewPoints);
        }
        let first = points[0];
        let last = points[points.len() - 1];
        let gap = first.distance(last);
        if gap > self.config.close_threshold {
            debug!(gap, threshold = self.config.close_threshold, "path discarded: not closed");
            return Err(DiscardReason::NotClosed);
        }

        points.pop();
        Polygon::new(points).map_err(|_err| {
            debug!(error = %_err, "path discarded: degenerate ring");
            DiscardReason::Degenerate
        })
    }

    /// Throws away the unfinished path, if any.
    pub fn abort(&mut self) {
        self.points.clear();
        self.active = false;
    }

    /// Samples of the unfinished path.
    pub fn in_progress(&self) -> Option<&[Point]> {
        self.active.then_some(self.points.as_slice())
    }
}

impl Default for PathCapture {
    fn default() -> Self {
        Self::new(CaptureConfig::default())
    }
}
