//! Three time levels of the scalar field.
//!
//! The buffers rotate by permuting slot roles instead of copying: after [`FieldBuffers::rotate`]
//! the old `curr` slot becomes `last`, the `next` slot becomes `curr`, and the old `last` slot is
//! handed out as the scratch `next` for the following tick.

/// `last` (t - 1), `curr` (t) and `next` (t + 1) fields of identical length.
#[derive(Debug, Clone)]
pub struct FieldBuffers {
    slots: [Vec<f64>; 3],
    // slot index of last, curr, next
    roles: [usize; 3],
}

const LAST: usize = 0;
const CURR: usize = 1;
const NEXT: usize = 2;

impl FieldBuffers {
    /// Zeroed buffers of `len` cells each.
    pub fn zeros(len: usize) -> Self {
        FieldBuffers {
            slots: [vec![0.; len], vec![0.; len], vec![0.; len]],
            roles: [0, 1, 2],
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots[0].len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn last(&self) -> &[f64] {
        &self.slots[self.roles[LAST]]
    }

    #[inline]
    pub fn curr(&self) -> &[f64] {
        &self.slots[self.roles[CURR]]
    }

    #[inline]
    pub fn next(&self) -> &[f64] {
        &self.slots[self.roles[NEXT]]
    }

    pub fn last_mut(&mut self) -> &mut [f64] {
        &mut self.slots[self.roles[LAST]]
    }

    pub fn curr_mut(&mut self) -> &mut [f64] {
        &mut self.slots[self.roles[CURR]]
    }

    fn by_role(&mut self) -> [&mut Vec<f64>; 3] {
        let roles = self.roles;
        let [a, b, c] = &mut self.slots;
        let mut by_slot = [Some(a), Some(b), Some(c)];
        roles.map(|slot| by_slot[slot].take().expect("roles are a permutation"))
    }

    /// Splits into `(last, curr, next)` so the stencil can read two levels while writing the
    /// third.
    pub fn split(&mut self) -> (&[f64], &[f64], &mut [f64]) {
        let [last, curr, next] = self.by_role();
        (&last[..], &curr[..], &mut next[..])
    }

    /// Mutable `(last, curr)`, for writes that touch both time levels.
    pub fn levels_mut(&mut self) -> (&mut [f64], &mut [f64]) {
        let [last, curr, _] = self.by_role();
        (&mut last[..], &mut curr[..])
    }

    /// `last := curr`, `curr := next`; the discarded `last` becomes the new scratch `next`.
    pub fn rotate(&mut self) {
        let [last, curr, next] = self.roles;
        self.roles = [curr, next, last];
    }
}
