//! Grid raycasting with a DDA walker.
//!
//! The ray is first clipped to the grid's extent with a slab test. The
//! walker then starts from the cell containing the ray origin and steps one
//! cell boundary at a time, always crossing whichever axis boundary comes
//! first along the clipped segment. Ray parameters (`t_max`, `t_delta`) are
//! measured in fractions of that clipped segment, so `t_delta = step / d`
//! where `d` is the segment vector.
//!
//! An origin outside the grid is moved to the clipped entry point and the
//! walker is placed just outside the edge it enters through, so its first
//! step lands on the entry cell.
//!
//! The starting cell is never tested for occupancy: a ray that begins inside
//! a solid cell only reports a hit once a later cell is solid.
//!
//! On an exact tie between the two axes the x-axis advances first.

use crate::bounds::Axis;
use crate::config::RaycastConfig;
use crate::coord::{Coord2, Point2};
use crate::grid_trait::SpatialGrid;
use crate::observer::{NoOpRaycastObserver, RayTrace, RaycastObserver, TraceRecorder};

/// Why a raycast ended without hitting anything.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MissReason {
    /// Direction was zero (or not finite), so there is nothing to step along.
    NoDirection,
    NonFiniteOrigin,
    /// The ray never overlaps the grid extent ahead of its origin.
    NeverEntered,
    /// The clipped segment is too short to produce usable step parameters.
    DegenerateSegment,
    ExitedGrid,
    /// Stopped by [`RaycastConfig::max_steps`].
    StepLimit,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RaycastOutcome {
    Hit(Coord2),
    Miss(MissReason),
}

impl RaycastOutcome {
    #[inline]
    pub fn is_hit(&self) -> bool {
        matches!(self, RaycastOutcome::Hit(_))
    }

    #[inline]
    pub fn cell(&self) -> Option<Coord2> {
        match self {
            RaycastOutcome::Hit(cell) => Some(*cell),
            RaycastOutcome::Miss(_) => None,
        }
    }
}

/// A ray with a unit (or zero) direction.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ray {
    pub origin: Point2,
    pub direction: Point2,
}

impl Ray {
    /// Normalizes `direction`; a zero or non-finite direction becomes zero.
    pub fn new(origin: Point2, direction: Point2) -> Self {
        Self {
            origin,
            direction: direction.normalized(),
        }
    }

    #[inline]
    pub fn at(&self, t: f32) -> Point2 {
        self.origin + self.direction * t
    }
}

/// Where a [`Walker`] is in its traversal.
///
/// A walker that set up cleanly reports `Initializing` until the first
/// [`Walker::advance`]. `Stepping` repeats until the walker settles on `Hit`
/// or `Miss`; once terminal, further calls return the same state.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum WalkState {
    Initializing,
    /// Entered this empty, in-bounds cell.
    Stepping(Coord2),
    Hit(Coord2),
    Miss(MissReason),
}

impl WalkState {
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, WalkState::Hit(_) | WalkState::Miss(_))
    }
}

/// Incremental traversal state for a single ray through one grid.
#[derive(Clone, Debug)]
pub struct Walker {
    cell: Coord2,
    step: Coord2,
    t_max: Point2,
    t_delta: Point2,
    t: f32,
    /// Segment parameter at which the current cell was entered.
    crossing: f32,
    segment: Option<(Point2, Point2)>,
    steps: u32,
    max_steps: Option<u32>,
    state: WalkState,
}

impl Walker {
    /// Sets up traversal: normalizes the direction, clips against the grid
    /// extent and derives the per-axis step parameters. The walker may
    /// already be terminal when any of that fails.
    ///
    /// `config` is expected to pass [`RaycastConfig::validate`]; a
    /// `max_steps` of zero trips a debug assertion and otherwise ends the
    /// walk with `StepLimit` before the first step.
    pub fn new<G: SpatialGrid>(grid: &G, ray: Ray, config: &RaycastConfig) -> Self {
        debug_assert!(config.validate().is_ok(), "invalid raycast config: {config:?}");
        let ray = Ray::new(ray.origin, ray.direction);
        let direction = ray.direction;
        let mut walker = Walker {
            cell: Coord2::ZERO,
            step: direction.signum_step(),
            t_max: Point2::new(f32::INFINITY, f32::INFINITY),
            t_delta: Point2::ZERO,
            t: 0.0,
            crossing: 0.0,
            segment: None,
            steps: 0,
            max_steps: config.max_steps,
            state: WalkState::Initializing,
        };

        if !ray.origin.is_finite() {
            walker.state = WalkState::Miss(MissReason::NonFiniteOrigin);
            return walker;
        }
        walker.cell = ray.origin.floor_to_coord();

        if walker.step == Coord2::ZERO {
            walker.state = WalkState::Miss(MissReason::NoDirection);
            return walker;
        }

        let slab = grid.bounds().slab(ray.origin, direction);
        if grid.is_empty() || !slab.intersects() {
            walker.state = WalkState::Miss(MissReason::NeverEntered);
            return walker;
        }

        let start = ray.at(slab.t_near.max(0.0));
        let end = ray.at(slab.t_far);
        walker.segment = Some((start, end));
        let d = end - start;

        let step = Point2::new(walker.step.x as f32, walker.step.y as f32);
        walker.t_delta = step / d;
        let offset = if slab.t_near > 0.0 {
            let entering = slab.near_axis;
            let (x, off_x) =
                entry_axis(start.x, walker.step.x, grid.width(), entering == Axis::X);
            let (y, off_y) =
                entry_axis(start.y, walker.step.y, grid.height(), entering == Axis::Y);
            walker.cell = Coord2::new(x, y);
            Point2::new(off_x, off_y)
        } else {
            Point2::new(
                boundary_offset(start.x, walker.step.x),
                boundary_offset(start.y, walker.step.y),
            )
        };
        let t_max = walker.t_delta * offset;

        let x = axis_t_max(walker.step.x, walker.t_delta.x, t_max.x);
        let y = axis_t_max(walker.step.y, walker.t_delta.y, t_max.y);
        match (x, y) {
            (Some(x), Some(y)) if x.is_finite() || y.is_finite() => {
                walker.t_max = Point2::new(x, y);
            }
            _ => {
                walker.state = WalkState::Miss(MissReason::DegenerateSegment);
                return walker;
            }
        }

        log::debug!(
            "raycast {:?} dir {:?}: cell {:?}, segment {:?} -> {:?}, t_delta {:?}",
            ray.origin,
            direction,
            walker.cell,
            start,
            end,
            walker.t_delta
        );
        walker
    }

    /// Steps one cell along the ray and reports where the walker ended up.
    pub fn advance<G: SpatialGrid>(&mut self, grid: &G) -> WalkState {
        if self.state.is_terminal() {
            return self.state;
        }
        if self.max_steps.is_some_and(|limit| self.steps >= limit) {
            return self.finish(WalkState::Miss(MissReason::StepLimit));
        }

        let previous = if self.step.x != 0 && self.t_max.x <= self.t_max.y {
            let previous = self.t_max.x;
            self.cell.x += self.step.x;
            self.t_max.x += self.t_delta.x;
            self.t += self.t_delta.x;
            previous
        } else {
            if self.step.y == 0 {
                return self.finish(WalkState::Miss(MissReason::NoDirection));
            }
            let previous = self.t_max.y;
            self.cell.y += self.step.y;
            self.t_max.y += self.t_delta.y;
            self.t += self.t_delta.y;
            previous
        };
        if previous < self.crossing {
            return self.finish(WalkState::Miss(MissReason::DegenerateSegment));
        }
        self.crossing = previous;
        self.steps += 1;
        log::trace!("dda step {} -> {:?} (t {})", self.steps, self.cell, self.t);

        if !grid.in_bounds(self.cell) {
            return self.finish(WalkState::Miss(MissReason::ExitedGrid));
        }
        if grid.is_occupied(self.cell) {
            return self.finish(WalkState::Hit(self.cell));
        }
        self.state = WalkState::Stepping(self.cell);
        self.state
    }

    fn finish(&mut self, state: WalkState) -> WalkState {
        log::debug!("raycast finished after {} steps: {:?}", self.steps, state);
        self.state = state;
        state
    }

    #[inline]
    pub fn state(&self) -> WalkState {
        self.state
    }

    /// Cell the walker currently occupies (may be out of bounds after a miss).
    #[inline]
    pub fn cell(&self) -> Coord2 {
        self.cell
    }

    #[inline]
    pub fn step(&self) -> Coord2 {
        self.step
    }

    #[inline]
    pub fn steps_taken(&self) -> u32 {
        self.steps
    }

    /// Sum of the `t_delta`s stepped so far.
    #[inline]
    pub fn t(&self) -> f32 {
        self.t
    }

    /// Clipped segment `(start, end)` inside the grid extent.
    #[inline]
    pub fn segment(&self) -> Option<(Point2, Point2)> {
        self.segment
    }

    /// Point where the ray crossed into the current cell; the segment start
    /// before the first step.
    pub fn boundary_point(&self) -> Option<Point2> {
        let (start, end) = self.segment?;
        Some(start + (end - start) * self.crossing)
    }
}

/// Distance, in cells, from `f` to the next boundary in the step direction.
#[inline]
fn boundary_offset(f: f32, step: i32) -> f32 {
    let frac = f - libm::floorf(f);
    if step > 0 { 1.0 - frac } else { frac }
}

/// Starting cell and boundary offset along one axis for a ray entering the
/// grid from outside at `pos`.
///
/// On the entering axis the walker sits in the row or column just beyond
/// the edge with zero offset, so the first step crosses that edge. The other
/// axis takes the cell under `pos`, clamped into the grid for entries
/// exactly on a corner.
fn entry_axis(pos: f32, step: i32, extent: u32, entering: bool) -> (i32, f32) {
    let last = extent as i32 - 1;
    if entering {
        return (if step > 0 { -1 } else { last + 1 }, 0.0);
    }
    let cell = (libm::floorf(pos) as i32).clamp(0, last);
    let offset = if step > 0 {
        (cell + 1) as f32 - pos
    } else {
        pos - cell as f32
    };
    (cell, offset.max(0.0))
}

/// Initial `t_max` for one axis: infinity when the axis cannot advance
/// (zero step, or no extent along the clipped segment), `None` when its
/// `t_delta` is unusable.
#[inline]
fn axis_t_max(step: i32, t_delta: f32, t_max: f32) -> Option<f32> {
    if step == 0 || t_delta.is_infinite() {
        Some(f32::INFINITY)
    } else if t_delta.is_finite() && t_delta > 0.0 && t_max.is_finite() {
        Some(t_max)
    } else {
        None
    }
}

/// First occupied cell along the ray from `origin` towards `direction`.
///
/// `direction` does not need to be normalized.
pub fn raycast<G: SpatialGrid>(grid: &G, origin: Point2, direction: Point2) -> RaycastOutcome {
    raycast_with(
        grid,
        Ray::new(origin, direction),
        &RaycastConfig::default(),
        &mut NoOpRaycastObserver,
    )
}

pub fn raycast_with<G, O>(
    grid: &G,
    ray: Ray,
    config: &RaycastConfig,
    observer: &mut O,
) -> RaycastOutcome
where
    G: SpatialGrid,
    O: RaycastObserver,
{
    let mut walker = Walker::new(grid, ray, config);
    if let Some((start, end)) = walker.segment() {
        observer.on_segment(start, end);
    }

    loop {
        match walker.advance(grid) {
            // advance always moves past setup
            WalkState::Initializing => {}
            WalkState::Stepping(cell) => observer.on_visit(cell),
            WalkState::Hit(cell) => {
                let point = walker.boundary_point().unwrap_or(ray.origin);
                observer.on_hit(cell, point);
                return RaycastOutcome::Hit(cell);
            }
            WalkState::Miss(reason) => {
                let point = match reason {
                    MissReason::DegenerateSegment => None,
                    _ => walker.boundary_point(),
                };
                observer.on_miss(reason, point);
                return RaycastOutcome::Miss(reason);
            }
        }
    }
}

/// [`raycast`] that also records the clipped segment and every visited cell.
pub fn raycast_traced<G: SpatialGrid>(grid: &G, origin: Point2, direction: Point2) -> RayTrace {
    let mut recorder = TraceRecorder::new();
    let outcome = raycast_with(
        grid,
        Ray::new(origin, direction),
        &RaycastConfig::default(),
        &mut recorder,
    );
    recorder.finish().unwrap_or(RayTrace {
        segment: None,
        visited: alloc::vec::Vec::new(),
        outcome,
        boundary_point: None,
    })
}
