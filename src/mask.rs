//! Static obstacle geometry.
//!
//! A mask is built once from a predicate over `(x, y, width, height)` and never changes. Wall
//! cells are skipped by the stepper and replaced by the boundary value when a neighbor reads them.

use serde::{Deserialize, Serialize};

/// Built-in obstacle shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Geometry {
    /// No walls at all.
    #[default]
    Open,
    /// Parabolic wedge filling the left quarter of the domain.
    ParabolicWedge,
}

impl Geometry {
    /// Whether `(x, y)` is a wall cell on a `width` x `height` grid.
    pub fn is_wall(self, x: usize, y: usize, width: usize, height: usize) -> bool {
        match self {
            Geometry::Open => false,
            Geometry::ParabolicWedge => parabolic_wedge(x, y, width, height),
        }
    }
}

/// `((y/h - 0.5)^2) * 8 > x/w` restricted to `x < w/4`.
pub fn parabolic_wedge(x: usize, y: usize, width: usize, height: usize) -> bool {
    let fy = y as f64 / height as f64 - 0.5;
    let fx = x as f64 / width as f64;
    fy * fy * 8. > fx && x < width / 4
}

/// Row-major boolean grid of wall cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObstacleMask {
    width: usize,
    height: usize,
    walls: Vec<bool>,
}

impl ObstacleMask {
    /// Mask with no walls.
    pub fn empty(width: usize, height: usize) -> Self {
        ObstacleMask {
            width,
            height,
            walls: vec![false; width * height],
        }
    }

    /// Evaluates `pred(x, y, width, height)` for every cell.
    pub fn from_predicate<F>(width: usize, height: usize, pred: F) -> Self
    where
        F: Fn(usize, usize, usize, usize) -> bool,
    {
        let mut walls = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                walls.push(pred(x, y, width, height));
            }
        }
        ObstacleMask {
            width,
            height,
            walls,
        }
    }

    pub fn from_geometry(width: usize, height: usize, geometry: Geometry) -> Self {
        match geometry {
            Geometry::Open => Self::empty(width, height),
            _ => Self::from_predicate(width, height, |x, y, w, h| geometry.is_wall(x, y, w, h)),
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Wall flag by flat row-major index.
    #[inline]
    pub fn is_wall_at(&self, idx: usize) -> bool {
        self.walls[idx]
    }

    /// Wall flag by coordinates. Panics if `(x, y)` is outside the grid.
    #[inline]
    pub fn is_wall(&self, x: usize, y: usize) -> bool {
        self.walls[y * self.width + x]
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.walls
    }

    /// Number of wall cells.
    pub fn count(&self) -> usize {
        self.walls.iter().filter(|&&w| w).count()
    }
}
