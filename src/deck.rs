use std::fmt;

use rand::Rng;
use thiserror::Error;

use crate::card::{Card, Rank, Suit};
use crate::constants::CARD_COUNT;
use crate::hand_evaluator::Hand;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeckError {
    #[error("all 52 cards were dealt since the last shuffle")]
    Exhausted,
}

/// The 52 card dealer
///
/// Cards are dealt from a cursor which only moves back to the top
/// of the deck when the deck is shuffled
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
    cursor: usize,
}

impl Deck {
    /// Unshuffled deck, suit by suit from deuce to ace
    pub fn new() -> Self {
        let cards: Vec<Card> = Suit::ALL
            .iter()
            .flat_map(|&suit| Rank::ALL.iter().map(move |&rank| Card::new(rank, suit)))
            .collect();
        debug_assert_eq!(cards.len(), usize::from(CARD_COUNT));
        Deck { cards, cursor: 0 }
    }

    /// Fisher-Yates shuffle, then deal from the top again
    pub fn shuffle<R: Rng>(&mut self, rng: &mut R) {
        for i in (1..self.cards.len()).rev() {
            let j = rng.gen_range(0, i + 1);
            self.cards.swap(i, j);
        }
        self.cursor = 0;
    }

    pub fn deal(&mut self) -> Result<Card, DeckError> {
        let card = *self.cards.get(self.cursor).ok_or(DeckError::Exhausted)?;
        self.cursor += 1;
        Ok(card)
    }

    /// Deal until a card held by none of the `known` hands comes up
    pub fn deal_excluding(&mut self, known: &[&Hand]) -> Result<Card, DeckError> {
        let known_mask = known.iter().fold(0u64, |acc, hand| acc | hand.mask());
        loop {
            let card = self.deal()?;
            if known_mask & card.mask() == 0 {
                return Ok(card);
            }
        }
    }

    /// Number of cards left before the deck is exhausted
    pub fn remaining(&self) -> usize {
        self.cards.len() - self.cursor
    }

    /// Current order of the deck
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

impl Default for Deck {
    fn default() -> Self {
        Deck::new()
    }
}

impl fmt::Display for Deck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for card in &self.cards {
            writeln!(f, "{}", card.name())?;
        }
        Ok(())
    }
}
