//! Merge front: one cursor per contributor of a k-way row merge.
//!
//! A front holds `K` rows of the right operand plus the carried partial row.
//! Exhausted cursors report the sentinel (the right operand's column count), so
//! `peek_min` returning the sentinel means every stream is drained.

/// Cursor into one sorted column stream and, for numeric merges, its values.
#[derive(Debug, Clone, Copy)]
struct Lane<'a> {
    cols: &'a [i64],
    vals: &'a [f64],
    weight: f64,
    pos: usize,
    head: i64,
}

impl<'a> Lane<'a> {
    #[inline]
    fn new(cols: &'a [i64], vals: &'a [f64], weight: f64, sentinel: i64) -> Self {
        let head = cols.first().copied().unwrap_or(sentinel);
        Self { cols, vals, weight, pos: 0, head }
    }

    #[inline]
    fn step(&mut self, sentinel: i64) {
        self.pos += 1;
        self.head = self.cols.get(self.pos).copied().unwrap_or(sentinel);
    }
}

#[derive(Debug, Clone)]
pub struct MergeFront<'a, const K: usize> {
    rows: [Lane<'a>; K],
    carried: Lane<'a>,
    sentinel: i64,
}

impl<'a, const K: usize> MergeFront<'a, K> {
    /// Front over column streams only.
    #[inline]
    #[must_use]
    pub fn symbolic(rows: [&'a [i64]; K], carried: &'a [i64], sentinel: i64) -> Self {
        Self {
            rows: rows.map(|cols| Lane::new(cols, &[], 1.0, sentinel)),
            carried: Lane::new(carried, &[], 1.0, sentinel),
            sentinel,
        }
    }

    /// Front over `(cols, vals, weight)` rows plus the carried `(cols, vals)` row.
    ///
    /// The carried row is already weighted, so its weight is fixed at `1.0`.
    #[inline]
    #[must_use]
    pub fn numeric(
        rows: [(&'a [i64], &'a [f64], f64); K],
        carried: (&'a [i64], &'a [f64]),
        sentinel: i64,
    ) -> Self {
        for &(cols, vals, _) in &rows {
            debug_assert_eq!(cols.len(), vals.len());
        }
        debug_assert_eq!(carried.0.len(), carried.1.len());
        Self {
            rows: rows.map(|(cols, vals, w)| Lane::new(cols, vals, w, sentinel)),
            carried: Lane::new(carried.0, carried.1, 1.0, sentinel),
            sentinel,
        }
    }

    #[inline]
    #[must_use]
    pub const fn sentinel(&self) -> i64 {
        self.sentinel
    }

    /// Smallest current column across all cursors, or the sentinel.
    #[inline]
    #[must_use]
    pub fn peek_min(&self) -> i64 {
        self.rows.iter().fold(self.carried.head, |m, lane| m.min(lane.head))
    }

    /// Consume one element from every cursor sitting on `min`.
    #[inline]
    pub fn advance_matching(&mut self, min: i64) {
        let sentinel = self.sentinel;
        for lane in self.rows.iter_mut().chain(core::iter::once(&mut self.carried)) {
            if lane.head == min {
                lane.step(sentinel);
            }
        }
    }

    /// Like [`advance_matching`](Self::advance_matching), returning the sum of
    /// `weight * value` over the consumed elements.
    #[inline]
    pub fn advance_matching_accumulate(&mut self, min: i64) -> f64 {
        let sentinel = self.sentinel;
        let mut acc = 0.0f64;
        for lane in self.rows.iter_mut().chain(core::iter::once(&mut self.carried)) {
            if lane.head == min {
                acc = lane.weight.mul_add(lane.vals[lane.pos], acc);
                lane.step(sentinel);
            }
        }
        acc
    }
}
