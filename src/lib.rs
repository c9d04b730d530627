#![no_std]

extern crate alloc;

pub mod bounds;
pub mod config;
pub mod coord;
pub mod error;
pub mod grid;
pub mod grid_trait;
pub mod observer;
pub mod raycast;

pub use bounds::{Axis, Bounds, SlabHit};
pub use config::RaycastConfig;
pub use coord::{Coord2, Point2};
pub use error::GridcastError;
pub use grid::Grid;
pub use grid_trait::{Occupancy, SpatialGrid};
pub use observer::{NoOpRaycastObserver, RayTrace, RaycastObserver, TraceRecorder};
pub use raycast::{
    raycast, raycast_traced, raycast_with, MissReason, Ray, RaycastOutcome, WalkState, Walker,
};
