//! The owned simulation object: mask, buffers, source and clock.

use tracing::{info, trace, warn};

use crate::boundary::BoundaryPolicy;
use crate::buffers::FieldBuffers;
use crate::config::{SimConfig, WaveParams};
use crate::error::{Result, WaveError};
use crate::mask::ObstacleMask;
use crate::snapshot::FieldSnapshot;
use crate::source::{Clock, MonotonicClock, SourceInjector};
use crate::stepper::{wave_step, wave_step_parallel};

/// Largest stable stencil coefficient of the 2-D leapfrog scheme.
const STABILITY_LIMIT: f64 = 0.5;

/// A running wave simulation.
///
/// All storage is allocated in the constructor; [`Simulation::step`] only mutates it.
pub struct Simulation {
    width: usize,
    height: usize,
    params: WaveParams,
    coefficient: f64,
    mask: ObstacleMask,
    buffers: FieldBuffers,
    source: Option<SourceInjector>,
    clock: Box<dyn Clock>,
    parallel: bool,
    tick: u64,
}

impl Simulation {
    /// Builds the configured geometry, zeroes the buffers and starts a wall clock.
    pub fn new(config: &SimConfig) -> Result<Self> {
        Self::with_clock(config, MonotonicClock::start())
    }

    /// Same as `new`, reading source time from `clock`.
    pub fn with_clock<C: Clock + 'static>(config: &SimConfig, clock: C) -> Result<Self> {
        let (width, height) = config.validate()?;
        let mask = ObstacleMask::from_geometry(width, height, config.geometry);
        Self::build(config, width, height, mask, Box::new(clock))
    }

    /// Uses a caller-built mask instead of `config.geometry`. The mask fixes the grid size.
    pub fn with_mask<C: Clock + 'static>(config: &SimConfig,
                                         mask: ObstacleMask,
                                         clock: C)
                                         -> Result<Self> {
        let config = SimConfig {
            width: mask.width(),
            height: mask.height(),
            ..config.clone()
        };
        let (width, height) = config.validate()?;
        if (width, height) != (mask.width(), mask.height()) {
            return Err(WaveError::InvalidDimension {
                width: mask.width(),
                height: mask.height(),
            });
        }
        Self::build(&config, width, height, mask, Box::new(clock))
    }

    fn build(config: &SimConfig,
             width: usize,
             height: usize,
             mask: ObstacleMask,
             clock: Box<dyn Clock>)
             -> Result<Self> {
        let source = match &config.source {
            Some(src) => Some(SourceInjector::new(src, width, height)?),
            None => None,
        };
        let coefficient = config.params.coefficient();

        info!(width,
              height,
              walls = mask.count(),
              boundary = ?config.params.boundary,
              coefficient,
              source = source.is_some(),
              "created wave simulation");
        if coefficient > STABILITY_LIMIT {
            warn!(coefficient,
                  limit = STABILITY_LIMIT,
                  "stencil coefficient exceeds the stability limit, the field will diverge");
        }

        Ok(Simulation {
            width,
            height,
            params: config.params,
            coefficient,
            mask,
            buffers: FieldBuffers::zeros(width * height),
            source,
            clock,
            parallel: config.parallel,
            tick: 0,
        })
    }

    /// Advances the field by one time step and re-applies the source.
    pub fn step(&mut self) {
        let policy = self.params.boundary;
        let mu = self.coefficient;
        {
            let (last, curr, next) = self.buffers.split();
            if self.parallel {
                wave_step_parallel(last, curr, next, &self.mask, policy, mu);
            } else {
                wave_step(last, curr, next, &self.mask, policy, mu);
            }
        }
        self.buffers.rotate();

        if let Some(source) = &self.source {
            let t = self.clock.elapsed_seconds();
            let (last, curr) = self.buffers.levels_mut();
            source.inject(curr, last, t);
        }

        self.tick += 1;
        trace!(tick = self.tick, "step");
    }

    /// Read-only view of the current field.
    pub fn snapshot(&self) -> FieldSnapshot<'_> {
        FieldSnapshot::new(self.buffers.curr(), &self.mask)
    }

    /// Replaces both time levels. Wall cells are copied as given.
    pub fn load_state(&mut self, curr: &[f64], last: &[f64]) -> Result<()> {
        let n = self.width * self.height;
        for len in [curr.len(), last.len()] {
            if len != n {
                return Err(WaveError::shape(n, len));
            }
        }
        self.buffers.curr_mut().copy_from_slice(curr);
        self.buffers.last_mut().copy_from_slice(last);
        Ok(())
    }

    /// Overwrites one cell of the current field.
    pub fn set_cell(&mut self, x: usize, y: usize, value: f64) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(WaveError::CellOutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        let width = self.width;
        self.buffers.curr_mut()[y * width + x] = value;
        Ok(())
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of completed steps.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn elapsed_seconds(&self) -> f64 {
        self.clock.elapsed_seconds()
    }

    pub fn params(&self) -> &WaveParams {
        &self.params
    }

    pub fn boundary(&self) -> BoundaryPolicy {
        self.params.boundary
    }

    /// Stencil coefficient `(c² dx² / dt²)²`.
    pub fn coefficient(&self) -> f64 {
        self.coefficient
    }

    pub fn mask(&self) -> &ObstacleMask {
        &self.mask
    }

    /// The field one step behind the snapshot.
    pub fn previous(&self) -> &[f64] {
        self.buffers.last()
    }
}

impl std::fmt::Debug for Simulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("params", &self.params)
            .field("source", &self.source)
            .field("parallel", &self.parallel)
            .field("tick", &self.tick)
            .finish()
    }
}
