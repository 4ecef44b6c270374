use std::cell::OnceCell;
use std::convert::TryFrom;
use std::fmt;
use std::iter::FromIterator;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::card::{Card, ParseError};

/// Ordered collection of cards
///
/// Keeps the OR of every card mask so a hand can be scored without
/// walking its cards.
/// Masks of the couples (2 card subsets) and trios (3 card subsets) are
/// built on first use and kept until the next card is added.
///
/// Serialized as its bracketed code, e.g. `"[Ah,Kd]"`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Hand {
    cards: Vec<Card>,
    mask: u64,
    couples: OnceCell<Vec<u64>>,
    trios: OnceCell<Vec<u64>>,
}

impl Hand {
    /// Construct the empty hand
    pub fn empty() -> Hand {
        Hand::default()
    }

    pub fn from_cards(cards: &[Card]) -> Hand {
        cards.iter().copied().collect()
    }

    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
        self.mask |= card.mask();
        self.couples = OnceCell::new();
        self.trios = OnceCell::new();
    }

    /// Bit mask of all cards, suits in 16 bit groups
    pub fn mask(&self) -> u64 {
        self.mask
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn contains(&self, card: Card) -> bool {
        (self.mask & card.mask()) != 0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Card> {
        self.cards.iter()
    }

    /// Mask of every 2 card subset, in dealing order
    pub fn couples(&self) -> &[u64] {
        self.couples.get_or_init(|| {
            let n = self.cards.len();
            let mut couples = Vec::with_capacity(n * n.saturating_sub(1) / 2);
            for i in 0..n {
                for j in (i + 1)..n {
                    couples.push(self.cards[i].mask() | self.cards[j].mask());
                }
            }
            couples
        })
    }

    /// Mask of every 3 card subset, in dealing order
    pub fn trios(&self) -> &[u64] {
        self.trios.get_or_init(|| {
            let n = self.cards.len();
            let mut trios = Vec::new();
            for i in 0..n {
                for j in (i + 1)..n {
                    let pair = self.cards[i].mask() | self.cards[j].mask();
                    for k in (j + 1)..n {
                        trios.push(pair | self.cards[k].mask());
                    }
                }
            }
            trios
        })
    }
}

impl FromIterator<Card> for Hand {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        let mut hand = Hand::empty();
        hand.extend(iter);
        hand
    }
}

impl Extend<Card> for Hand {
    fn extend<I: IntoIterator<Item = Card>>(&mut self, iter: I) {
        for card in iter {
            self.add_card(card);
        }
    }
}

impl<'a> IntoIterator for &'a Hand {
    type Item = &'a Card;
    type IntoIter = std::slice::Iter<'a, Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.iter()
    }
}

impl Add for Hand {
    type Output = Self;

    fn add(mut self, other: Self) -> Self::Output {
        self.extend(other.cards);
        self
    }
}

impl AddAssign<Card> for Hand {
    fn add_assign(&mut self, rhs: Card) {
        self.add_card(rhs);
    }
}

impl PartialEq for Hand {
    fn eq(&self, other: &Self) -> bool {
        self.cards == other.cards
    }
}

impl Eq for Hand {}

impl FromStr for Hand {
    type Err = ParseError;

    /// Parse a bracketed list of card codes
    ///
    /// # Example
    ///
    /// ```
    /// use poker_odds::hand_evaluator::Hand;
    /// let hand: Hand = "[Ah,Kd,2s]".parse().unwrap();
    /// assert_eq!(hand.len(), 3);
    /// assert_eq!(hand.to_string(), "[Ah,Kd,2s]");
    /// ```
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let text = text.trim();
        let inner = text
            .strip_prefix('[')
            .and_then(|t| t.strip_suffix(']'))
            .ok_or_else(|| ParseError::MissingBrackets(text.to_string()))?;
        let mut hand = Hand::empty();
        if inner.trim().is_empty() {
            return Ok(hand);
        }
        for code in inner.split(',') {
            hand.add_card(code.trim().parse()?);
        }
        Ok(hand)
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let codes: Vec<String> = self.cards.iter().map(|c| c.to_string()).collect();
        write!(f, "[{}]", codes.join(","))
    }
}

impl TryFrom<String> for Hand {
    type Error = ParseError;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        text.parse()
    }
}

impl From<Hand> for String {
    fn from(hand: Hand) -> String {
        hand.to_string()
    }
}
