//! Sequence helpers used by the scene collection

/// Remove the entries at `indices` from `items` in a single ascending pass.
///
/// `indices` are positions in the original, unmodified sequence and must be
/// sorted ascending without duplicates. The n-th removal is shifted down by
/// the n entries already erased in front of it. Out-of-range indices are
/// skipped. Returns how many entries were removed.
pub fn remove_sorted_indices<T>(items: &mut Vec<T>, indices: &[usize]) -> usize {
    debug_assert!(indices.windows(2).all(|w| w[0] < w[1]), "indices must be strictly ascending");

    let mut removed = 0;
    for &index in indices {
        let shifted = index - removed;
        if shifted >= items.len() {
            continue;
        }
        items.remove(shifted);
        removed += 1;
    }
    removed
}

/// Sort and de-duplicate a list of recorded indices in place
pub fn normalize_indices(indices: &mut Vec<usize>) {
    indices.sort_unstable();
    indices.dedup();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_sorted_indices_preserves_order() {
        let mut items = vec!['a', 'b', 'c', 'd', 'e', 'f'];
        let removed = remove_sorted_indices(&mut items, &[1, 3, 4]);

        assert_eq!(removed, 3);
        assert_eq!(items, vec!['a', 'c', 'f']);
    }

    #[test]
    fn test_remove_sorted_indices_first_and_last() {
        let mut items = vec![10, 20, 30];
        remove_sorted_indices(&mut items, &[0, 2]);
        assert_eq!(items, vec![20]);
    }

    #[test]
    fn test_remove_sorted_indices_skips_out_of_range() {
        let mut items = vec![1, 2];
        let removed = remove_sorted_indices(&mut items, &[1, 7]);
        assert_eq!(removed, 1);
        assert_eq!(items, vec![1]);
    }

    #[test]
    fn test_normalize_indices() {
        let mut indices = vec![4, 1, 4, 0, 1];
        normalize_indices(&mut indices);
        assert_eq!(indices, vec![0, 1, 4]);
    }
}
