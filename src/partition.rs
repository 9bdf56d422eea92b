//! Pivot selection and the three-way split used to build each tree level.

use crate::interval::Interval;

/// Above this many intervals the center is a ninther rather than a plain
/// median of three.
pub const NINTHER_CUTOFF: usize = 40;

/// Pick a center that roughly halves `intervals` by start.
///
/// Uses Tukey's ninther (median of three medians of three) on large inputs.
/// The selection swaps elements in place; the returned value is the start of
/// whatever interval ends up at index 0. `intervals` must be non-empty.
pub fn find_center(intervals: &mut [Interval]) -> i64 {
    debug_assert!(!intervals.is_empty());

    let h = intervals.len();
    let m = h / 2;
    if h > NINTHER_CUTOFF {
        let s = h / 8;
        median_of_three(intervals, 0, s, 2 * s);
        median_of_three(intervals, m, m - s, m + s);
        median_of_three(intervals, h - 1, h - 1 - s, h - 1 - 2 * s);
    }

    median_of_three(intervals, 0, m, h - 1);
    intervals[0].start
}

// Order the starts at `lo`, `mid`, `hi` so the median lands on `mid`.
// Indexes may alias.
#[inline(always)]
fn median_of_three(intervals: &mut [Interval], mid: usize, lo: usize, hi: usize) {
    if intervals[mid].start < intervals[lo].start {
        intervals.swap(lo, mid);
    }
    if intervals[hi].start < intervals[mid].start {
        intervals.swap(hi, mid);
        if intervals[mid].start < intervals[lo].start {
            intervals.swap(mid, lo);
        }
    }
}

/// Reorder `intervals` in place into `[left | overlapping | right]` relative
/// to `center` and return the two boundaries `(l, r)`.
///
/// Afterwards `intervals[..l]` all end strictly before `center`
/// (`end < center`), `intervals[r..]` all start strictly after it
/// (`start > center`), and `intervals[l..r]` all cover it
/// (`start <= center <= end`). Intervals are end-inclusive, so one ending
/// exactly on `center` is overlapping, not left. Relative order within each
/// run is not preserved.
pub fn split(intervals: &mut [Interval], center: i64) -> (usize, usize) {
    let mut left = 0;
    let mut i = 0;
    let mut right = intervals.len();

    // [0, left): left of center, [left, i): overlapping,
    // [i, right): unexamined, [right, len): right of center
    while i < right {
        let interval = intervals[i];
        if interval.is_left_of(center) {
            intervals.swap(left, i);
            left += 1;
            i += 1;
        } else if interval.is_right_of(center) {
            right -= 1;
            // re-examine whatever was swapped in at i
            intervals.swap(i, right);
        } else {
            i += 1;
        }
    }

    (left, right)
}
