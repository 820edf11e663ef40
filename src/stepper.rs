//! Explicit leapfrog step for the 2-D wave equation.
//!
//! The discretization is the standard central 2nd order difference in both space and time with
//! a 5-point Laplacian:
//!
//! ```text
//! w = 2 v - u + mu (l + r + t + b - 4 v)
//! ```
//!
//! where `u` is the field at step `n - 1`, `v` at step `n` and `w` the computed step `n + 1`.
//! Neighbors that are off-grid or walls are replaced according to the [`BoundaryPolicy`]. Wall
//! cells themselves are never written.

use crate::boundary::{resolve_neighbors, BoundaryPolicy};
use crate::mask::ObstacleMask;

/// Rows are split between rayon tasks until a task holds at most this many cells.
pub const ELEMS_PER_TASK: usize = 64 * 1024;

/// Computes rows `rs..re` into `w`, which holds exactly those rows.
fn wave_step_sub(u: &[f64],
                 v: &[f64],
                 w: &mut [f64],
                 mask: &ObstacleMask,
                 policy: BoundaryPolicy,
                 rows: (usize, usize),
                 mu: f64) {
    let nx = mask.width();
    let ny = mask.height();
    let (rs, re) = rows;
    let n = nx * ny;
    debug_assert!(rs <= re);
    debug_assert!(re <= ny);
    debug_assert_eq!(u.len(), n);
    debug_assert_eq!(v.len(), n);
    debug_assert_eq!(w.len(), (re - rs) * nx);

    let w_offset = rs * nx;

    for y in rs..re {
        for x in 0..nx {
            let i = y * nx + x;
            if mask.is_wall_at(i) {
                continue;
            }
            let vc = v[i];
            let nb = resolve_neighbors(v, mask, policy, x, y);
            w[i - w_offset] = 2. * vc - u[i] + mu * (nb.sum() - 4. * vc);
        }
    }
}

/// Performs one step of the finite difference scheme.
///
/// - `u`: value at step `n - 1`
/// - `v`: value at step `n`
/// - `w`: computed value at step `n + 1`, wall cells are left untouched
/// - `mask`: obstacle mask, also supplies the grid shape; memory layout is `[[f64; width]; height]`
/// - `mu`: stencil coefficient, `(c² dx² / dt²)²` for [`crate::WaveParams`]
pub fn wave_step(u: &[f64],
                 v: &[f64],
                 w: &mut [f64],
                 mask: &ObstacleMask,
                 policy: BoundaryPolicy,
                 mu: f64) {
    let n = mask.width() * mask.height();
    assert_eq!(u.len(), n);
    assert_eq!(v.len(), n);
    assert_eq!(w.len(), n);

    wave_step_sub(u, v, w, mask, policy, (0, mask.height()), mu);
}

/// Same as `wave_step`, splitting rows between rayon tasks.
///
/// All tasks read only `u` and `v`, so every cell sees the pre-step state.
#[cfg(feature = "rayon")]
pub fn wave_step_parallel(u: &[f64],
                          v: &[f64],
                          w: &mut [f64],
                          mask: &ObstacleMask,
                          policy: BoundaryPolicy,
                          mu: f64) {
    wave_step_parallel_grain(u, v, w, mask, policy, mu, ELEMS_PER_TASK);
}

/// Without rayon the parallel entry point runs serially.
#[cfg(not(feature = "rayon"))]
pub fn wave_step_parallel(u: &[f64],
                          v: &[f64],
                          w: &mut [f64],
                          mask: &ObstacleMask,
                          policy: BoundaryPolicy,
                          mu: f64) {
    wave_step(u, v, w, mask, policy, mu);
}

#[cfg(feature = "rayon")]
fn wave_step_parallel_grain(u: &[f64],
                            v: &[f64],
                            w: &mut [f64],
                            mask: &ObstacleMask,
                            policy: BoundaryPolicy,
                            mu: f64,
                            grain: usize) {
    let n = mask.width() * mask.height();
    assert_eq!(u.len(), n);
    assert_eq!(v.len(), n);
    assert_eq!(w.len(), n);

    fn inner(u: &[f64],
             v: &[f64],
             w: &mut [f64],
             mask: &ObstacleMask,
             policy: BoundaryPolicy,
             rows: (usize, usize),
             mu: f64,
             grain: usize) {
        let (row_start, row_end) = rows;
        if row_end - row_start > 1 && w.len() > grain {
            let nx = mask.width();
            let mid = (row_start + row_end) / 2;
            let (left, right) = w.split_at_mut((mid - row_start) * nx);
            rayon::join(|| inner(u, v, left, mask, policy, (row_start, mid), mu, grain),
                        || inner(u, v, right, mask, policy, (mid, row_end), mu, grain));
        } else {
            wave_step_sub(u, v, w, mask, policy, rows, mu);
        }
    }

    inner(u, v, w, mask, policy, (0, mask.height()), mu, grain);
}
