//! Round-scoped deck of cards.
//!
//! A deck is created fresh for every round; no shoe state survives a
//! round. Shuffling is a uniform Fisher-Yates permutation driven by the
//! round's `GameRng`, and dealing past the 52nd card is a loud contract
//! violation (`DeckExhausted`), never a duplicate or undefined card.

use velvet_types::cards::{Card, RANKS, SUITS};

use crate::error::EngineError;
use crate::rng::GameRng;

/// An ordered deck of the 52 canonical cards. Dealt cards move into
/// the hands that drew them; the deck never recycles.
#[derive(Clone, Debug)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// The standard 52-card deck in canonical order:
    /// hearts 2..A, diamonds 2..A, clubs 2..A, spades 2..A.
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(52);
        for suit in SUITS {
            for rank in RANKS {
                cards.push(Card::new(rank, suit));
            }
        }
        Deck { cards }
    }

    /// A freshly shuffled deck for one round.
    pub fn shuffled(rng: &mut GameRng) -> Self {
        let mut deck = Self::standard();
        rng.shuffle(&mut deck.cards);
        deck
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Deal one card from the top of the deck.
    pub fn draw(&mut self) -> Result<Card, EngineError> {
        self.cards.pop().ok_or(EngineError::DeckExhausted)
    }

    /// Deal `n` cards from the top of the deck.
    pub fn draw_n(&mut self, n: usize) -> Result<Vec<Card>, EngineError> {
        if self.cards.len() < n {
            return Err(EngineError::DeckExhausted);
        }
        let mut taken = Vec::with_capacity(n);
        for _ in 0..n {
            taken.push(self.cards.pop().ok_or(EngineError::DeckExhausted)?);
        }
        Ok(taken)
    }
}
