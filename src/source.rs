//! Continuous point excitation and the clock that drives it.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use crate::config::SourceConfig;
use crate::error::{Result, WaveError};

/// Monotonic time source, in seconds since a fixed reference.
pub trait Clock: Send + Sync {
    fn elapsed_seconds(&self) -> f64;
}

/// Wall-clock time since construction.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    start: Instant,
}

impl MonotonicClock {
    pub fn start() -> Self {
        MonotonicClock {
            start: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::start()
    }
}

impl Clock for MonotonicClock {
    fn elapsed_seconds(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

/// Clock whose reading is set by hand. Clones share the same reading.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    bits: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new(seconds: f64) -> Self {
        ManualClock {
            bits: Arc::new(AtomicU64::new(seconds.to_bits())),
        }
    }

    pub fn set(&self, seconds: f64) {
        self.bits.store(seconds.to_bits(), Ordering::Relaxed);
    }

    pub fn advance(&self, seconds: f64) {
        self.set(self.elapsed_seconds() + seconds);
    }
}

impl Clock for ManualClock {
    fn elapsed_seconds(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Relaxed))
    }
}

/// Overwrites one cell of `curr` and `last` with a phase-shifted sine pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourceInjector {
    index: usize,
    amplitude: f64,
    angular_rate: f64,
    phase_offset: f64,
}

impl SourceInjector {
    /// Resolves the source position on a `width` x `height` grid and checks it is in bounds.
    pub fn new(config: &SourceConfig, width: usize, height: usize) -> Result<Self> {
        let (x, y) = config.position.resolve(width, height);
        if x >= width || y >= height {
            return Err(WaveError::SourceOutOfBounds {
                x,
                y,
                width,
                height,
            });
        }
        Ok(SourceInjector {
            index: y * width + x,
            amplitude: config.amplitude,
            angular_rate: config.angular_rate,
            phase_offset: config.phase_offset,
        })
    }

    /// Flat index of the driven cell.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// `amplitude * sin(t * angular_rate + phase)`.
    #[inline]
    pub fn value(&self, t: f64, phase: f64) -> f64 {
        self.amplitude * (t * self.angular_rate + phase).sin()
    }

    /// Sets `curr` to the signal at `t` and `last` to the signal shifted by the phase offset.
    pub fn inject(&self, curr: &mut [f64], last: &mut [f64], t: f64) {
        curr[self.index] = self.value(t, 0.);
        last[self.index] = self.value(t, self.phase_offset);
    }
}
