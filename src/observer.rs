use alloc::vec::Vec;

use crate::coord::{Coord2, Point2};
use crate::raycast::{MissReason, RaycastOutcome};

/// Hooks into a raycast, for renderers and debug tooling.
///
/// Visits arrive in traversal order, followed by exactly one of
/// `on_hit`/`on_miss`.
pub trait RaycastObserver {
    fn on_segment(&mut self, _start: Point2, _end: Point2) {}
    fn on_visit(&mut self, _cell: Coord2) {}
    fn on_hit(&mut self, _cell: Coord2, _point: Point2) {}
    fn on_miss(&mut self, _reason: MissReason, _point: Option<Point2>) {}
}

pub struct NoOpRaycastObserver;
impl RaycastObserver for NoOpRaycastObserver {}

/// Everything a single raycast reported.
#[derive(Clone, Debug, PartialEq)]
pub struct RayTrace {
    /// Clipped segment inside the grid, if the ray entered it.
    pub segment: Option<(Point2, Point2)>,
    /// Empty cells stepped through before the outcome.
    pub visited: Vec<Coord2>,
    pub outcome: RaycastOutcome,
    /// Where the ray crossed into the terminal cell.
    pub boundary_point: Option<Point2>,
}

impl RayTrace {
    /// Visited cells followed by the hit cell, if any.
    pub fn path(&self) -> Vec<Coord2> {
        let mut path = self.visited.clone();
        if let RaycastOutcome::Hit(cell) = self.outcome {
            path.push(cell);
        }
        path
    }
}

/// Observer that records a [`RayTrace`].
#[derive(Clone, Debug, Default)]
pub struct TraceRecorder {
    segment: Option<(Point2, Point2)>,
    visited: Vec<Coord2>,
    outcome: Option<(RaycastOutcome, Option<Point2>)>,
}

impl TraceRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `None` if no outcome was reported yet.
    pub fn finish(self) -> Option<RayTrace> {
        let (outcome, boundary_point) = self.outcome?;
        Some(RayTrace {
            segment: self.segment,
            visited: self.visited,
            outcome,
            boundary_point,
        })
    }
}

impl RaycastObserver for TraceRecorder {
    fn on_segment(&mut self, start: Point2, end: Point2) {
        self.segment = Some((start, end));
    }

    fn on_visit(&mut self, cell: Coord2) {
        self.visited.push(cell);
    }

    fn on_hit(&mut self, cell: Coord2, point: Point2) {
        self.outcome = Some((RaycastOutcome::Hit(cell), Some(point)));
    }

    fn on_miss(&mut self, reason: MissReason, point: Option<Point2>) {
        self.outcome = Some((RaycastOutcome::Miss(reason), point));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recorder_without_outcome_is_none() {
        let mut rec = TraceRecorder::new();
        rec.on_visit(Coord2::new(1, 1));
        assert!(rec.finish().is_none());
    }

    #[test]
    fn path_appends_hit_cell() {
        let mut rec = TraceRecorder::new();
        rec.on_segment(Point2::new(0.5, 0.5), Point2::new(3.0, 0.5));
        rec.on_visit(Coord2::new(1, 0));
        rec.on_hit(Coord2::new(2, 0), Point2::new(2.0, 0.5));
        let trace = rec.finish().unwrap();
        assert_eq!(trace.path(), alloc::vec![Coord2::new(1, 0), Coord2::new(2, 0)]);
        assert_eq!(trace.boundary_point, Some(Point2::new(2.0, 0.5)));
    }
}
