//! Contiguity test for integral value domains

/// If `values` are distinct integers forming an unbroken run, return the
/// run's bounds.
///
/// Duplicates make the run non-contiguous; callers deduplicate first. An
/// empty input has no bounds.
pub fn contiguous_bounds<T>(values: &[T]) -> Option<(T, T)>
where
    T: Copy + Ord + Into<i128>,
{
    let min = *values.iter().min()?;
    let max = *values.iter().max()?;

    let span = max.into() - min.into();
    let count = i128::try_from(values.len()).ok()?;

    (span == count - 1).then_some((min, max))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_single_value() {
        assert_eq!(contiguous_bounds(&[3i32]), Some((3, 3)));
    }

    #[test]
    fn test_two_adjacent_values() {
        assert_eq!(contiguous_bounds(&[0i32, 1]), Some((0, 1)));
        assert_eq!(contiguous_bounds(&[-2i64, -1]), Some((-2, -1)));
    }

    #[test]
    fn test_gap() {
        assert_eq!(contiguous_bounds(&[0i32, 2]), None);
    }

    #[test]
    fn test_unordered_run() {
        assert_eq!(contiguous_bounds(&[14u8, 12, 16, 13, 15]), Some((12, 16)));
    }

    #[test]
    fn test_empty() {
        assert_eq!(contiguous_bounds::<i32>(&[]), None);
    }

    #[test]
    fn test_wide_range_does_not_overflow() {
        assert_eq!(contiguous_bounds(&[i64::MIN, i64::MAX]), None);
        assert_eq!(contiguous_bounds(&[u64::MAX - 1, u64::MAX]), Some((u64::MAX - 1, u64::MAX)));
    }
}
