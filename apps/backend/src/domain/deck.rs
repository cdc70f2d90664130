use std::collections::HashSet;

use crate::errors::domain::DomainError;

pub const DECK_SIZE: usize = 5;

/// Shape check for a replacement deck: exactly five distinct ids.
///
/// Ownership is checked by the store when the positions are written.
pub fn validate_deck_ids(card_ids: &[i64]) -> Result<(), DomainError> {
    if card_ids.len() != DECK_SIZE {
        return Err(DomainError::invalid_deck(format!(
            "deck must contain exactly {DECK_SIZE} cards, got {}",
            card_ids.len()
        )));
    }

    let mut seen = HashSet::with_capacity(DECK_SIZE);
    if let Some(dup) = card_ids.iter().find(|id| !seen.insert(**id)) {
        return Err(DomainError::invalid_deck(format!(
            "card {dup} appears more than once in the deck"
        )));
    }
    Ok(())
}

/// 1-based slot for the card at `index` in a deck list.
pub fn deck_position(index: usize) -> i16 {
    (index + 1) as i16
}
