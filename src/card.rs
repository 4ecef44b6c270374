/*
 * Card model
 *
 * A card is stored as a rank and a suit and encoded as a single bit
 * of a 64 bit mask: the rank selects one of 13 bits and the suit
 * moves it into its own 16 bit lane
 */

use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::*;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("invalid rank character '{0}'")]
    InvalidRank(char),
    #[error("invalid suit character '{0}'")]
    InvalidSuit(char),
    #[error("card code must be two characters, got \"{0}\"")]
    InvalidLength(String),
    #[error("hand must be enclosed in brackets, got \"{0}\"")]
    MissingBrackets(String),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suit {
    Diamonds,
    Clubs,
    Hearts,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Diamonds, Suit::Clubs, Suit::Hearts, Suit::Spades];

    pub fn from_char(c: char) -> Result<Suit, ParseError> {
        SUIT_TO_CHAR
            .iter()
            .position(|&s| s == c)
            .map(|i| Suit::ALL[i])
            .ok_or(ParseError::InvalidSuit(c))
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn to_char(self) -> char {
        SUIT_TO_CHAR[self.index()]
    }

    /// Offset of the suit lane inside a card mask
    pub fn shift(self) -> u8 {
        SUIT_SHIFTS[self.index()]
    }

    pub fn name(self) -> &'static str {
        match self {
            Suit::Diamonds => "Diamonds",
            Suit::Clubs => "Clubs",
            Suit::Hearts => "Hearts",
            Suit::Spades => "Spades",
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    pub fn from_char(c: char) -> Result<Rank, ParseError> {
        RANK_TO_CHAR
            .iter()
            .position(|&r| r == c)
            .map(|i| Rank::ALL[i])
            .ok_or(ParseError::InvalidRank(c))
    }

    /// Index of the rank bit, 0 for a deuce up to 12 for an ace
    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn to_char(self) -> char {
        RANK_TO_CHAR[self.index()]
    }

    /// Single bit inside a 13 bit rank mask
    pub const fn bit(self) -> u64 {
        1u64 << self.index()
    }

    pub fn name(self) -> &'static str {
        match self {
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "Jack",
            Rank::Queen => "Queen",
            Rank::King => "King",
            Rank::Ace => "Ace",
        }
    }
}

/// A single playing card
///
/// Serialized as its two character code, e.g. `"Ah"`
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Card {
    rank: Rank,
    suit: Suit,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Card { rank, suit }
    }

    pub const fn rank(self) -> Rank {
        self.rank
    }

    pub const fn suit(self) -> Suit {
        self.suit
    }

    /// 64 bit mask with exactly one bit set
    pub fn mask(self) -> u64 {
        self.rank.bit() << self.suit.shift()
    }

    /// Long name, e.g. "Ace of Hearts"
    pub fn name(self) -> String {
        format!("{} of {}", self.rank.name(), self.suit.name())
    }
}

impl FromStr for Card {
    type Err = ParseError;

    /// Parse a card code like `Ah` or `Td`
    ///
    /// # Example
    ///
    /// ```
    /// use poker_odds::card::{Card, Rank, Suit};
    /// let card: Card = "Td".parse().unwrap();
    /// assert_eq!(card, Card::new(Rank::Ten, Suit::Diamonds));
    /// ```
    fn from_str(code: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = code.chars().collect();
        if chars.len() != 2 {
            return Err(ParseError::InvalidLength(code.to_string()));
        }
        let rank = Rank::from_char(chars[0])?;
        let suit = Suit::from_char(chars[1])?;
        Ok(Card::new(rank, suit))
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.to_char(), self.suit.to_char())
    }
}

impl TryFrom<String> for Card {
    type Error = ParseError;

    fn try_from(code: String) -> Result<Self, Self::Error> {
        code.parse()
    }
}

impl From<Card> for String {
    fn from(card: Card) -> String {
        card.to_string()
    }
}
