/// An interval with an attached key.
///
/// Intervals are treated as end-inclusive: `[start, end]` contains every
/// point `p` with `start <= p <= end`.
///
/// The tree assumes `start <= end` and non-negative coordinates. Neither is
/// checked by `IntervalTree::new`; use `Interval::normalized` for arbitrary
/// pairs and `IntervalTree::try_new` to have the input validated.
///
/// # Examples
/// ```
/// use stabtree::Interval;
///
/// let interval = Interval::new(10, 24000, 7);
///
/// assert!(interval.contains(10));
/// assert!(interval.contains(24000));
/// assert!(!interval.contains(24001));
/// assert_eq!(interval.len(), 23991);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Interval {
    pub start: i64,
    pub end: i64,
    pub key: i64,
}

impl Interval {
    pub fn new(start: i64, end: i64, key: i64) -> Interval {
        Interval { start, end, key }
    }

    /// Build an interval from two endpoints given in either order.
    pub fn normalized(a: i64, b: i64, key: i64) -> Interval {
        Interval {
            start: a.min(b),
            end: a.max(b),
            key,
        }
    }

    /// Number of points covered. (Intervals are end-inclusive.) Saturates
    /// at `u64::MAX` for the one span too wide to count, `[i64::MIN, i64::MAX]`.
    pub fn len(&self) -> u64 {
        let len = self.end as i128 - self.start as i128 + 1;
        len.clamp(0, u64::MAX as i128) as u64
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True iff `point` lies in `[start, end]`.
    #[inline(always)]
    pub fn contains(&self, point: i64) -> bool {
        self.start <= point && point <= self.end
    }

    /// True iff the interval lies entirely before `center`. One ending on
    /// `center` is not left of it.
    #[inline(always)]
    pub fn is_left_of(&self, center: i64) -> bool {
        self.end < center
    }

    /// True iff the interval lies entirely after `center`.
    #[inline(always)]
    pub fn is_right_of(&self, center: i64) -> bool {
        self.start > center
    }

    /// True iff the interval spans `center`, i.e. it is neither left nor
    /// right of it.
    #[inline(always)]
    pub fn covers(&self, center: i64) -> bool {
        !self.is_left_of(center) && !self.is_right_of(center)
    }
}

impl From<(i64, i64, i64)> for Interval {
    fn from((start, end, key): (i64, i64, i64)) -> Self {
        Interval::new(start, end, key)
    }
}
