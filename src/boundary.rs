//! Neighbor resolution at domain edges and obstacle faces.

use serde::{Deserialize, Serialize};

use crate::mask::ObstacleMask;

/// Value substituted for a neighbor that is off-grid or a wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryPolicy {
    /// Fixed zero (Dirichlet).
    #[default]
    Wall,
    /// The cell's own value, reflecting.
    Follow,
    /// The negated cell value.
    Anti,
}

impl BoundaryPolicy {
    /// Boundary value for a cell currently holding `center`.
    #[inline]
    pub fn value(self, center: f64) -> f64 {
        match self {
            BoundaryPolicy::Wall => 0.,
            BoundaryPolicy::Follow => center,
            BoundaryPolicy::Anti => -center,
        }
    }
}

/// The four cardinal neighbor contributions of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Neighbors {
    pub up: f64,
    pub down: f64,
    pub left: f64,
    pub right: f64,
}

impl Neighbors {
    #[inline]
    pub fn sum(&self) -> f64 {
        self.left + self.up + self.right + self.down
    }
}

/// Resolves neighbor values of `(x, y)` from the field `v`.
///
/// `up` is row `y - 1`, `down` is row `y + 1`. A neighbor that is outside the grid or marked
/// as a wall contributes `policy.value(v[x, y])` instead of its stored value.
#[inline]
pub fn resolve_neighbors(v: &[f64],
                         mask: &ObstacleMask,
                         policy: BoundaryPolicy,
                         x: usize,
                         y: usize)
                         -> Neighbors {
    let nx = mask.width();
    let ny = mask.height();
    debug_assert_eq!(v.len(), nx * ny);
    debug_assert!(x < nx && y < ny);

    let i = y * nx + x;
    let b = policy.value(v[i]);
    let pick = |open: bool, j: usize| if open && !mask.is_wall_at(j) { v[j] } else { b };

    Neighbors {
        up: pick(y > 0, i.wrapping_sub(nx)),
        down: pick(y + 1 < ny, i + nx),
        left: pick(x > 0, i.wrapping_sub(1)),
        right: pick(x + 1 < nx, i + 1),
    }
}
