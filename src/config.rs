//! Simulation configuration.
//!
//! Everything here is plain data with serde derives so an outer program can load it from any
//! format. [`SimConfig::validate`] is the single place where construction inputs are checked.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::boundary::BoundaryPolicy;
use crate::error::{Result, WaveError};
use crate::mask::Geometry;
use crate::source::SourceInjector;

/// Grid size used when a zero dimension is substituted.
pub const DEFAULT_WIDTH: usize = 640;
pub const DEFAULT_HEIGHT: usize = 480;

/// What to do with a zero width or height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DimensionPolicy {
    /// Fail with [`WaveError::InvalidDimension`].
    Reject,
    /// Use 640x480 instead.
    #[default]
    SubstituteDefault,
}

/// Physical parameters, fixed for the run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveParams {
    pub wave_speed_squared: f64,
    pub dx_squared: f64,
    pub dt_squared: f64,
    pub boundary: BoundaryPolicy,
}

impl Default for WaveParams {
    fn default() -> Self {
        WaveParams {
            wave_speed_squared: 0.5,
            dx_squared: 1.,
            dt_squared: 1.,
            boundary: BoundaryPolicy::Wall,
        }
    }
}

impl WaveParams {
    /// Stencil coefficient `(c² dx² / dt²)²`.
    pub fn coefficient(&self) -> f64 {
        let k = self.wave_speed_squared * self.dx_squared / self.dt_squared;
        k * k
    }

    fn validate(&self) -> Result<()> {
        let fields = [("wave_speed_squared", self.wave_speed_squared),
                      ("dx_squared", self.dx_squared),
                      ("dt_squared", self.dt_squared)];
        for &(name, value) in &fields {
            if !value.is_finite() {
                return Err(WaveError::parameter(name, value));
            }
        }
        if self.dt_squared == 0. {
            return Err(WaveError::parameter("dt_squared", self.dt_squared));
        }
        Ok(())
    }
}

/// Where the source sits. Anchored variants are resolved against the final grid size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourcePosition {
    /// A fixed cell.
    Cell { x: usize, y: usize },
    /// `(width/16, height/2)`, just right of the wedge tip.
    LeftWedge,
    /// `(0, height/2)`.
    LeftEdge,
}

impl SourcePosition {
    /// Cell coordinates on a `width` x `height` grid.
    pub fn resolve(self, width: usize, height: usize) -> (usize, usize) {
        match self {
            SourcePosition::Cell { x, y } => (x, y),
            SourcePosition::LeftWedge => (width / 16, height / 2),
            SourcePosition::LeftEdge => (0, height / 2),
        }
    }
}

/// Point source placement and signal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SourceConfig {
    pub position: SourcePosition,
    pub amplitude: f64,
    /// Radians per second.
    pub angular_rate: f64,
    /// Phase shift of the `last` level relative to `curr`, in radians.
    pub phase_offset: f64,
}

impl SourceConfig {
    /// Anchored at `(width/16, height/2)`, amplitude 20, 10 rad/s, phase -0.5.
    pub fn left_wedge() -> Self {
        SourceConfig {
            position: SourcePosition::LeftWedge,
            amplitude: 20.,
            angular_rate: 10.,
            phase_offset: -0.5,
        }
    }

    /// Anchored at `(0, height/2)`, amplitude 30, 1 rad/s, phase -0.1.
    pub fn left_edge() -> Self {
        SourceConfig {
            position: SourcePosition::LeftEdge,
            amplitude: 30.,
            angular_rate: 1.,
            phase_offset: -0.1,
        }
    }

    /// Same signal, driven at a fixed cell.
    pub fn at(self, x: usize, y: usize) -> Self {
        SourceConfig {
            position: SourcePosition::Cell { x, y },
            ..self
        }
    }
}

/// Complete construction input for a [`crate::Simulation`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub width: usize,
    pub height: usize,
    pub dimension_policy: DimensionPolicy,
    pub params: WaveParams,
    pub geometry: Geometry,
    /// `None` disables the source.
    pub source: Option<SourceConfig>,
    /// Step with the rayon kernel when the `rayon` feature is enabled.
    pub parallel: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            dimension_policy: DimensionPolicy::default(),
            params: WaveParams::default(),
            geometry: Geometry::Open,
            source: None,
            parallel: false,
        }
    }
}

impl SimConfig {
    /// Parabolic wedge obstacle driven from just right of the domain's left edge.
    pub fn wedge() -> Self {
        SimConfig {
            params: WaveParams {
                wave_speed_squared: 0.5,
                ..WaveParams::default()
            },
            geometry: Geometry::ParabolicWedge,
            source: Some(SourceConfig::left_wedge()),
            ..SimConfig::default()
        }
    }

    /// Open domain driven from the middle of the left edge.
    pub fn open_channel() -> Self {
        SimConfig {
            params: WaveParams {
                wave_speed_squared: 0.1,
                ..WaveParams::default()
            },
            geometry: Geometry::Open,
            source: Some(SourceConfig::left_edge()),
            ..SimConfig::default()
        }
    }

    /// Grid size after applying the dimension policy.
    pub fn resolved_dimensions(&self) -> Result<(usize, usize)> {
        if self.width > 0 && self.height > 0 {
            return Ok((self.width, self.height));
        }
        match self.dimension_policy {
            DimensionPolicy::Reject => {
                Err(WaveError::InvalidDimension {
                    width: self.width,
                    height: self.height,
                })
            }
            DimensionPolicy::SubstituteDefault => {
                warn!(width = self.width,
                      height = self.height,
                      "zero grid dimension, using {}x{}",
                      DEFAULT_WIDTH,
                      DEFAULT_HEIGHT);
                Ok((DEFAULT_WIDTH, DEFAULT_HEIGHT))
            }
        }
    }

    /// Checks parameters and source placement, returning the resolved grid size.
    pub fn validate(&self) -> Result<(usize, usize)> {
        let (width, height) = self.resolved_dimensions()?;
        self.params.validate()?;
        if let Some(src) = &self.source {
            SourceInjector::new(src, width, height)?;
            for &(name, value) in &[("amplitude", src.amplitude),
                                    ("angular_rate", src.angular_rate),
                                    ("phase_offset", src.phase_offset)] {
                if !value.is_finite() {
                    return Err(WaveError::parameter(name, value));
                }
            }
        }
        Ok((width, height))
    }
}
