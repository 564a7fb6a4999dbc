//! Deck module - cards and the shuffled deck builder.

use crate::rng::DeckRng;
use crate::types::{CardId, Symbol};

/// A single card on the table.
///
/// The symbol is fixed at deal time; only the flipped/matched flags change
/// during play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card {
    id: CardId,
    symbol: Symbol,
    is_flipped: bool,
    is_matched: bool,
}

impl Card {
    pub fn new(id: CardId, symbol: Symbol) -> Self {
        Self {
            id,
            symbol,
            is_flipped: false,
            is_matched: false,
        }
    }

    pub fn id(&self) -> CardId {
        self.id
    }

    pub fn symbol(&self) -> Symbol {
        self.symbol
    }

    pub fn is_flipped(&self) -> bool {
        self.is_flipped
    }

    pub fn is_matched(&self) -> bool {
        self.is_matched
    }

    pub(crate) fn set_flipped(&mut self, flipped: bool) {
        self.is_flipped = flipped;
    }

    pub(crate) fn set_matched(&mut self) {
        self.is_matched = true;
    }
}

/// Deal a fresh deck: two cards per symbol, uniformly shuffled.
///
/// Card ids are the final positions (0-based), so `deck[i].id() == i`.
pub fn build_deck(symbols: &[Symbol], rng: &mut DeckRng) -> Vec<Card> {
    let mut faces: Vec<Symbol> = symbols.iter().chain(symbols.iter()).copied().collect();
    rng.shuffle(&mut faces);

    faces
        .into_iter()
        .enumerate()
        .map(|(id, symbol)| Card::new(id, symbol))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DECK_SIZE;

    #[test]
    fn test_deck_has_two_of_each_symbol() {
        let mut rng = DeckRng::new(3);
        let deck = build_deck(&Symbol::ALL, &mut rng);

        assert_eq!(deck.len(), DECK_SIZE);
        for symbol in Symbol::ALL {
            let count = deck.iter().filter(|c| c.symbol() == symbol).count();
            assert_eq!(count, 2, "symbol {:?} should appear twice", symbol);
        }
    }

    #[test]
    fn test_ids_match_positions() {
        let mut rng = DeckRng::new(5);
        let deck = build_deck(&Symbol::ALL, &mut rng);
        for (i, card) in deck.iter().enumerate() {
            assert_eq!(card.id(), i);
            assert!(!card.is_flipped());
            assert!(!card.is_matched());
        }
    }

    #[test]
    fn test_rebuild_uses_fresh_draws() {
        let mut rng = DeckRng::new(11);
        let first = build_deck(&Symbol::ALL, &mut rng);
        let second = build_deck(&Symbol::ALL, &mut rng);

        // Same RNG stream, consecutive deals: a repeat of all 16 positions would
        // mean the shuffle is not consuming randomness.
        let a: Vec<_> = first.iter().map(Card::symbol).collect();
        let b: Vec<_> = second.iter().map(Card::symbol).collect();
        assert_ne!(a, b);
    }

    #[test]
    fn test_subset_of_symbols() {
        let mut rng = DeckRng::new(1);
        let deck = build_deck(&Symbol::ALL[..3], &mut rng);
        assert_eq!(deck.len(), 6);
        assert!(deck.iter().all(|c| Symbol::ALL[..3].contains(&c.symbol())));
    }
}
