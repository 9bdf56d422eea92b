//! Hybrid sort of interval buckets: comparison sort for short slices and an
//! LSD radix sort, one byte per pass, for everything else.
//!
//! The radix passes treat keys as unsigned bytes, so they only order
//! non-negative keys correctly. Interval coordinates are assumed to be
//! non-negative throughout the crate.

use log::trace;

use crate::interval::Interval;

/// Slices shorter than this are sorted by comparison.
pub const RADIX_SORT_CUTOFF: usize = 256;

const RADIX_BITS: u32 = 8;
const KEY_BITS: u32 = 64;
const BUCKETS: usize = 1 << RADIX_BITS;

/// Which interval field to sort on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortKey {
    Start,
    End,
}

impl SortKey {
    #[inline(always)]
    pub fn of(self, interval: &Interval) -> i64 {
        match self {
            SortKey::Start => interval.start,
            SortKey::End => interval.end,
        }
    }
}

/// Return a copy of `intervals` in ascending order of `key`.
///
/// # Examples
/// ```
/// use stabtree::{sort_by, Interval, SortKey};
///
/// let intervals = [Interval::new(5, 9, 0), Interval::new(1, 20, 1)];
/// let by_end = sort_by(&intervals, SortKey::End);
///
/// assert_eq!(by_end[0].key, 0);
/// assert_eq!(intervals[0].key, 0);
/// ```
pub fn sort_by(intervals: &[Interval], key: SortKey) -> Vec<Interval> {
    let mut sorted = intervals.to_vec();
    sort_in_place(&mut sorted, key);
    sorted
}

/// Sort `intervals` ascending by `key`. Equal keys keep their relative order.
pub fn sort_in_place(intervals: &mut [Interval], key: SortKey) {
    if intervals.len() < 2 {
        return;
    }

    if intervals.len() < RADIX_SORT_CUTOFF {
        intervals.sort_by_key(|interval| key.of(interval));
    } else {
        radix_sort(intervals, key);
    }
}

// Alternate between `intervals` and a scratch buffer, one byte per pass,
// stopping as soon as a pass finds its input already in order.
fn radix_sort(intervals: &mut [Interval], key: SortKey) {
    let mut scratch = intervals.to_vec();

    let mut passes = 0;
    for shift in (0..KEY_BITS).step_by(RADIX_BITS as usize) {
        let scattered = if passes % 2 == 0 {
            radix_pass(intervals, &mut scratch, key, shift)
        } else {
            radix_pass(&scratch, intervals, key, shift)
        };

        if !scattered {
            trace!("radix sort of {} intervals done after {} passes", intervals.len(), passes);
            // an odd number of passes leaves the result in scratch
            if passes % 2 == 1 {
                intervals.copy_from_slice(&scratch);
            }
            return;
        }
        passes += 1;
    }

    // an even number of passes lands back in `intervals`
    debug_assert!(passes % 2 == 0);
}

// One counting sort pass on the byte at `shift`. Returns false, without
// touching `to`, if `from` is already in order by `key`.
fn radix_pass(from: &[Interval], to: &mut [Interval], key: SortKey, shift: u32) -> bool {
    debug_assert_eq!(from.len(), to.len());

    let mut counts = [0usize; BUCKETS];
    let mut sorted = true;
    let mut prev = i64::MIN;
    for interval in from {
        let k = key.of(interval);
        counts[digit(k, shift)] += 1;
        sorted &= prev <= k;
        prev = k;
    }

    if sorted {
        return false;
    }

    let mut offsets = [0usize; BUCKETS];
    let mut total = 0;
    for (offset, count) in offsets.iter_mut().zip(counts.iter()) {
        *offset = total;
        total += count;
    }

    for interval in from {
        let d = digit(key.of(interval), shift);
        to[offsets[d]] = *interval;
        offsets[d] += 1;
    }

    true
}

#[inline(always)]
fn digit(k: i64, shift: u32) -> usize {
    (((k as u64) >> shift) & (BUCKETS as u64 - 1)) as usize
}
