//! Errors reported by the checked tree constructor.

use thiserror::Error;

use crate::interval::Interval;

/// Reasons `IntervalTree::try_new` refuses an input set.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BuildError {
    /// An interval ends before it starts.
    #[error("reversed interval, start > end: {0:?}")]
    Reversed(Interval),
    /// An interval has a negative coordinate, which the radix sort does not order.
    #[error("negative interval coordinate: {0:?}")]
    NegativeCoordinate(Interval),
}

impl BuildError {
    /// The offending interval.
    pub fn interval(&self) -> &Interval {
        match self {
            BuildError::Reversed(interval) | BuildError::NegativeCoordinate(interval) => interval,
        }
    }
}

/// Check the preconditions the tree relies on.
pub(crate) fn validate(interval: &Interval) -> Result<(), BuildError> {
    if interval.start > interval.end {
        return Err(BuildError::Reversed(*interval));
    }
    if interval.start < 0 {
        return Err(BuildError::NegativeCoordinate(*interval));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate() {
        assert_eq!(validate(&Interval::new(0, 0, 1)), Ok(()));
        assert_eq!(validate(&Interval::new(3, 9, 1)), Ok(()));

        let reversed = Interval::new(9, 3, 2);
        assert_eq!(validate(&reversed), Err(BuildError::Reversed(reversed)));

        let negative = Interval::new(-4, 3, 3);
        let err = validate(&negative).unwrap_err();
        assert_eq!(err, BuildError::NegativeCoordinate(negative));
        assert_eq!(err.interval(), &negative);
    }

    #[test]
    fn test_messages() {
        let err = BuildError::Reversed(Interval::new(9, 3, 2));
        assert_eq!(
            err.to_string(),
            "reversed interval, start > end: Interval { start: 9, end: 3, key: 2 }"
        );

        let err = BuildError::NegativeCoordinate(Interval::new(-4, 3, 3));
        assert_eq!(
            err.to_string(),
            "negative interval coordinate: Interval { start: -4, end: 3, key: 3 }"
        );
    }
}
