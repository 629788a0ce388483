//! Row partitioning across workers.
//!
//! Every phase hands each worker one contiguous band of rows of the buffer it
//! writes. Bands are carved out of the buffer with `split_at_mut`, so the
//! disjoint-write invariant is enforced by the borrow checker rather than by
//! locks.

use std::ops::Range;

/// Rows owned by `worker` when `rows` are split across `workers`.
///
/// Uses floor division, so bands differ in size by at most one row and
/// together cover `0..rows` exactly.
#[inline]
pub fn row_range(worker: usize, workers: usize, rows: usize) -> Range<usize> {
    let start = worker * rows / workers;
    let end = ((worker + 1) * rows / workers).min(rows);
    start..end
}

/// All worker ranges for `rows`, in worker order.
pub fn partition(rows: usize, workers: usize) -> Vec<Range<usize>> {
    (0..workers)
        .map(|worker| row_range(worker, workers, rows))
        .collect()
}

/// Grid-row ranges for the sampling phase.
///
/// Interior rows `0..interior_rows` are partitioned; the final band also owns
/// the boundary row `interior_rows`.
pub fn grid_partition(interior_rows: usize, workers: usize) -> Vec<Range<usize>> {
    let mut ranges = partition(interior_rows, workers);
    if let Some(last) = ranges.last_mut() {
        last.end = interior_rows + 1;
    }
    ranges
}

/// Canvas-row ranges for the marching phase.
///
/// Each worker owns the canvas rows under its interior grid rows; the final
/// band runs to the bottom of the canvas.
pub fn march_partition(
    interior_rows: usize,
    step: usize,
    canvas_height: usize,
    workers: usize,
) -> Vec<Range<usize>> {
    let mut ranges: Vec<Range<usize>> = partition(interior_rows, workers)
        .into_iter()
        .map(|r| r.start * step..r.end * step)
        .collect();
    if let Some(last) = ranges.last_mut() {
        last.end = canvas_height;
    }
    ranges
}

/// Exclusive write view of one worker's rows.
#[derive(Debug)]
pub struct RowBand<'a, T> {
    /// Ordinal of the owning worker.
    pub worker: usize,
    /// Global row indices covered by `data`.
    pub rows: Range<usize>,
    /// Elements per row.
    pub stride: usize,
    pub data: &'a mut [T],
}

impl<'a, T> RowBand<'a, T> {
    /// Mutable slice of global row `row`, which must lie inside `self.rows`.
    #[inline]
    pub fn row_mut(&mut self, row: usize) -> &mut [T] {
        debug_assert!(self.rows.contains(&row));
        let local = row - self.rows.start;
        &mut self.data[local * self.stride..(local + 1) * self.stride]
    }
}

/// Split `buffer` into one band per range.
///
/// `ranges` must be contiguous and start at row 0, as produced by the
/// partition functions above.
pub fn split_bands<'a, T>(
    buffer: &'a mut [T],
    stride: usize,
    ranges: &[Range<usize>],
) -> Vec<RowBand<'a, T>> {
    let mut bands = Vec::with_capacity(ranges.len());
    let mut remaining = buffer;
    let mut next_row = 0;

    for (worker, rows) in ranges.iter().enumerate() {
        assert_eq!(rows.start, next_row, "row ranges must be contiguous");
        let (data, rest) = std::mem::take(&mut remaining).split_at_mut(rows.len() * stride);
        bands.push(RowBand {
            worker,
            rows: rows.clone(),
            stride,
            data,
        });
        remaining = rest;
        next_row = rows.end;
    }

    bands
}
