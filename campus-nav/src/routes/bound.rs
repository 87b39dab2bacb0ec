//! Capping the number of candidates shown.

/// Keep at most `max` leading entries.
///
/// This truncates; it does not compare anything. Rank first if the result
/// should be the `max` fastest routes. Inputs already within the bound are
/// returned as-is.
pub fn bound_routes<T>(mut entries: Vec<T>, max: usize) -> Vec<T> {
    entries.truncate(max);
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_leading_entries() {
        let durations = vec![100, 200, 300, 400, 500];
        assert_eq!(bound_routes(durations, 3), vec![100, 200, 300]);
    }

    #[test]
    fn truncates_without_reordering() {
        let durations = vec![500, 100, 400, 200];
        assert_eq!(bound_routes(durations, 2), vec![500, 100]);
    }

    #[test]
    fn short_input_unchanged() {
        assert_eq!(bound_routes(vec![1, 2], 3), vec![1, 2]);
        assert_eq!(bound_routes(vec![1, 2, 3], 3), vec![1, 2, 3]);
        assert!(bound_routes(Vec::<u64>::new(), 3).is_empty());
    }

    #[test]
    fn zero_bound() {
        assert!(bound_routes(vec![1, 2, 3], 0).is_empty());
    }
}
