use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::*;

#[test]
fn sparse_literal_fills_gaps_with_default() {
    let entries = [InitEntry::indexed(0, 10), InitEntry::indexed(2, 30)];
    assert_eq!(expand_indexed(4, &entries, &0), Ok(vec![10, 0, 30, 0]));
}

#[test]
fn positional_entries_follow_the_cursor() {
    // [1, 2, 5: 9, 4] in a 7-element array
    let entries = [
        InitEntry::positional(1),
        InitEntry::positional(2),
        InitEntry::indexed(5, 9),
        InitEntry::positional(4),
    ];
    assert_eq!(expand_indexed(7, &entries, &0), Ok(vec![1, 2, 0, 0, 0, 9, 4]));
}

#[test]
fn short_literal_is_padded() {
    let entries = [InitEntry::positional('x')];
    assert_eq!(expand_indexed(3, &entries, &'-'), Ok(vec!['x', '-', '-']));
}

#[test]
fn empty_dimension() {
    let entries: [InitEntry<i32>; 0] = [];
    assert_eq!(expand_indexed(0, &entries, &7), Ok(vec![]));
}

#[test]
fn index_past_dimension_is_rejected() {
    let entries = [InitEntry::indexed(0, 1), InitEntry::indexed(4, 2)];
    assert_eq!(
        expand_indexed(4, &entries, &0),
        Err(AbiError::StrayInitializer {
            position: 1,
            index: Some(4),
            dim: 4,
        })
    );
}

#[test]
fn descending_indices_are_rejected() {
    let entries = [InitEntry::indexed(2, 1), InitEntry::indexed(1, 2)];
    assert!(expand_indexed(4, &entries, &0).is_err());
}

#[test]
fn too_many_positional_entries_are_rejected() {
    let entries = [
        InitEntry::positional(1),
        InitEntry::positional(2),
        InitEntry::positional(3),
    ];
    assert!(expand_indexed(2, &entries, &0).is_err());
}

#[test]
fn implied_length() {
    let entries = [
        InitEntry::positional(1),
        InitEntry::indexed(5, 2),
        InitEntry::positional(3),
    ];
    assert_eq!(implied_len(&entries), 7);
    assert_eq!(implied_len::<u8>(&[]), 0);
    assert_eq!(implied_len(&[InitEntry::indexed(3, 0u8)]), 4);
}

#[test]
fn rect_shape_flattens_nested_static_arrays() {
    let mut pool = Pool::new();
    let row = pool.static_array(Idx::F32, 3);
    let matrix = pool.static_array(row, 2);
    assert_eq!(
        rect_shape(&pool, matrix),
        Ok(Some(RectShape {
            inner: Idx::F32,
            count: 6,
        }))
    );
    assert_eq!(
        rect_shape(&pool, row),
        Ok(Some(RectShape {
            inner: Idx::F32,
            count: 3,
        }))
    );
}

#[test]
fn rect_shape_of_scalars_and_slices_is_none() {
    let mut pool = Pool::new();
    let slice = pool.dyn_array(Idx::I32);
    assert_eq!(rect_shape(&pool, Idx::I32), Ok(None));
    assert_eq!(rect_shape(&pool, slice), Ok(None));
}

proptest! {
    #[test]
    fn expansion_has_exact_length(dim in 0u64..64, values in proptest::collection::vec(any::<i32>(), 0..64)) {
        let entries: Vec<_> = values
            .iter()
            .take(dim as usize)
            .map(|&v| InitEntry::positional(v))
            .collect();
        let expanded = expand_indexed(dim, &entries, &0).unwrap();
        prop_assert_eq!(expanded.len() as u64, dim);
        prop_assert_eq!(&expanded[..entries.len()], &values[..entries.len()]);
    }

    #[test]
    fn sorted_sparse_entries_land_at_their_index(
        indices in proptest::collection::btree_set(0u64..32, 0..16),
    ) {
        let entries: Vec<_> = indices.iter().map(|&i| InitEntry::indexed(i, i + 100)).collect();
        let dim = implied_len(&entries);
        let expanded = expand_indexed(dim, &entries, &0).unwrap();
        for (pos, value) in expanded.iter().enumerate() {
            let expected = if indices.contains(&(pos as u64)) { pos as u64 + 100 } else { 0 };
            prop_assert_eq!(*value, expected);
        }
    }
}
