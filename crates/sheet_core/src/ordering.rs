//! Positional move shared by every level of the sheet tree.
//!
//! # Invariants
//! - A move relocates exactly one element; others shift by one position.
//! - `from == to` leaves the sequence unchanged.
//! - Out-of-range indices leave the sequence unchanged and report `false`.

/// Moves the element at `from` to position `to` in place.
///
/// Returns `false` without touching `items` when either index is out of
/// range.
pub fn array_move<T>(items: &mut [T], from: usize, to: usize) -> bool {
    if !in_bounds(items.len(), from, to) {
        return false;
    }
    if from < to {
        items[from..=to].rotate_left(1);
    } else if from > to {
        items[to..=from].rotate_right(1);
    }
    true
}

/// Returns a moved copy of `items`, or `None` when an index is out of range.
pub fn moved<T: Clone>(items: &[T], from: usize, to: usize) -> Option<Vec<T>> {
    if !in_bounds(items.len(), from, to) {
        return None;
    }
    let mut next = items.to_vec();
    array_move(&mut next, from, to);
    Some(next)
}

/// Whether both indices address an element of a sequence of length `len`.
pub fn in_bounds(len: usize, from: usize, to: usize) -> bool {
    from < len && to < len
}

#[cfg(test)]
mod tests {
    use super::{array_move, moved};

    #[test]
    fn forward_move_shifts_between_left() {
        assert_eq!(moved(&['a', 'b', 'c'], 0, 2).unwrap(), vec!['b', 'c', 'a']);
        assert_eq!(
            moved(&[1, 2, 3, 4, 5], 1, 3).unwrap(),
            vec![1, 3, 4, 2, 5]
        );
    }

    #[test]
    fn backward_move_shifts_between_right() {
        assert_eq!(moved(&['a', 'b', 'c'], 2, 0).unwrap(), vec!['c', 'a', 'b']);
        assert_eq!(
            moved(&[1, 2, 3, 4, 5], 4, 1).unwrap(),
            vec![1, 5, 2, 3, 4]
        );
    }

    #[test]
    fn same_index_is_identity() {
        let mut items = vec![1, 2, 3];
        assert!(array_move(&mut items, 1, 1));
        assert_eq!(items, vec![1, 2, 3]);
    }

    #[test]
    fn out_of_range_leaves_items_untouched() {
        let mut items = vec![1, 2, 3];
        assert!(!array_move(&mut items, 3, 0));
        assert!(!array_move(&mut items, 0, 3));
        assert_eq!(items, vec![1, 2, 3]);
        assert!(moved::<i32>(&[], 0, 0).is_none());
    }
}
