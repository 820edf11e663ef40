//! Finite difference method for the 2-D wave equation with obstacles, selectable boundary
//! reflection and a continuous point source.
//!
//! The engine keeps three time levels of a scalar field on a uniform grid and advances them with
//! the explicit leapfrog scheme
//!
//! ```text
//! next = 2 curr - last + mu (l + r + u + d - 4 curr),    mu = (c² dx² / dt²)²
//! ```
//!
//! Neighbors outside the grid or inside an obstacle are replaced by a value chosen by the
//! [`BoundaryPolicy`]. After each step the buffers rotate and the source, if any, overwrites
//! its cell in both `curr` and `last`.
//!
//! ```
//! use fdm_wave_sim::{ManualClock, SimConfig, Simulation};
//!
//! let config = SimConfig { width: 64, height: 48, ..SimConfig::open_channel() };
//! let config = SimConfig { source: None, ..config };
//! let mut sim = Simulation::with_clock(&config, ManualClock::default()).unwrap();
//! sim.set_cell(32, 24, 1.).unwrap();
//! for _ in 0..10 {
//!     sim.step();
//! }
//! assert!(sim.snapshot().is_finite());
//! ```
//!
//! Rendering is left to the caller; [`Simulation::snapshot`] exposes the field and the mask.

pub mod boundary;
pub mod buffers;
pub mod config;
pub mod error;
pub mod mask;
pub mod simulation;
pub mod snapshot;
pub mod source;
pub mod stepper;

pub use boundary::{resolve_neighbors, BoundaryPolicy, Neighbors};
pub use buffers::FieldBuffers;
pub use config::{DimensionPolicy, SimConfig, SourceConfig, SourcePosition, WaveParams,
                 DEFAULT_HEIGHT, DEFAULT_WIDTH};
pub use error::{Result, WaveError};
pub use mask::{Geometry, ObstacleMask};
pub use simulation::Simulation;
pub use snapshot::FieldSnapshot;
pub use source::{Clock, ManualClock, MonotonicClock, SourceInjector};
pub use stepper::{wave_step, wave_step_parallel};
