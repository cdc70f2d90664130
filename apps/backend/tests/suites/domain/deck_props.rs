use std::collections::HashSet;

use pokedeck_backend::domain::deck::{deck_position, validate_deck_ids, DECK_SIZE};
use proptest::prelude::*;

proptest! {
    #[test]
    fn only_five_distinct_ids_pass(ids in prop::collection::vec(1..20i64, 0..9)) {
        let distinct: HashSet<_> = ids.iter().collect();
        let expected = ids.len() == DECK_SIZE && distinct.len() == DECK_SIZE;
        prop_assert_eq!(validate_deck_ids(&ids).is_ok(), expected);
    }

    #[test]
    fn positions_are_one_based(index in 0..DECK_SIZE) {
        let pos = deck_position(index);
        prop_assert!((1..=DECK_SIZE as i16).contains(&pos));
        prop_assert_eq!(pos as usize, index + 1);
    }
}
