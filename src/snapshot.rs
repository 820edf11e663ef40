//! Read-only view of the current field for renderers and other consumers.

use ndarray::ArrayView2;

use crate::mask::ObstacleMask;

/// Borrowed view of `curr` and the obstacle mask.
///
/// The view borrows the simulation, so it cannot be held across a step; use
/// [`FieldSnapshot::to_vec`] to keep the data.
#[derive(Debug, Clone, Copy)]
pub struct FieldSnapshot<'a> {
    field: &'a [f64],
    mask: &'a ObstacleMask,
}

impl<'a> FieldSnapshot<'a> {
    /// Panics if `field` does not hold one value per mask cell.
    pub(crate) fn new(field: &'a [f64], mask: &'a ObstacleMask) -> Self {
        assert_eq!(field.len(),
                   mask.as_slice().len(),
                   "field length must equal width * height");
        FieldSnapshot { field, mask }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.mask.width()
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.mask.height()
    }

    /// Field value at `(x, y)`. Panics outside the grid.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f64 {
        self.field[y * self.width() + x]
    }

    #[inline]
    pub fn is_wall(&self, x: usize, y: usize) -> bool {
        self.mask.is_wall(x, y)
    }

    /// Row-major field, `width * height` values.
    pub fn field(&self) -> &'a [f64] {
        self.field
    }

    pub fn mask(&self) -> &'a ObstacleMask {
        self.mask
    }

    /// The field as a `(height, width)` array.
    pub fn as_array(&self) -> ArrayView2<'a, f64> {
        // length was checked against the mask in `new`
        ArrayView2::from_shape((self.height(), self.width()), self.field)
            .expect("field length is width * height")
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.field.to_vec()
    }

    /// Largest absolute value over non-wall cells.
    pub fn max_abs(&self) -> f64 {
        self.field
            .iter()
            .zip(self.mask.as_slice())
            .filter(|&(_, &wall)| !wall)
            .fold(0., |m, (&x, _)| m.max(x.abs()))
    }

    /// `false` once any non-wall cell has diverged to infinity or NaN.
    pub fn is_finite(&self) -> bool {
        self.field
            .iter()
            .zip(self.mask.as_slice())
            .all(|(x, &wall)| wall || x.is_finite())
    }
}
